//! Shared building blocks for `lanscope`.
//!
//! Everything that both the scan engine and its front-ends need to agree on lives
//! here: the record model, the address and port spaces, the cancellation token
//! and the error taxonomy.

pub mod cancel;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod progress;
pub mod utils;
