//! The `lanscope` scan engine.
//!
//! Jobs run on their own worker threads and talk back through a progress callback
//! and a one-shot completion callback. [`ScanCoordinator`] is the front door.

pub mod coordinator;
pub mod discovery;
pub mod job;
pub mod network;
pub mod ports;
pub mod vendors;

pub use coordinator::{ScanCoordinator, ScanReport, ScanRequest};
pub use discovery::{DiscoveryTools, HostDiscoveryJob};
pub use ports::{PortScanMode, PortStateJob};
