use thiserror::Error;

use crate::models::ScanSlot;

/// Failures surfaced to the caller of the scan engine.
///
/// Per-address and per-port probe failures are never reported through this type,
/// they only ever show up as a missing record.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("a {0} scan is already running")]
    SlotBusy(ScanSlot),

    #[error("failed to spawn scan worker: {0}")]
    Spawn(#[from] std::io::Error),
}
