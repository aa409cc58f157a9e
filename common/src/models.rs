//! # Scan Records
//!
//! The result shapes produced by scan jobs, plus the enums a caller uses to pick
//! which job runs.

mod host;
mod port;

pub use host::{HostRecord, NO_HOSTNAME, UNKNOWN_HOSTNAME};
pub use port::{PortRecord, PortState};

use std::fmt;
use std::str::FromStr;

/// The independent job slots a coordinator manages. One job per slot at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanSlot {
    Hosts,
    OpenPorts,
    FreePorts,
}

impl ScanSlot {
    pub const ALL: [ScanSlot; 3] = [ScanSlot::Hosts, ScanSlot::OpenPorts, ScanSlot::FreePorts];

    pub fn index(self) -> usize {
        match self {
            ScanSlot::Hosts => 0,
            ScanSlot::OpenPorts => 1,
            ScanSlot::FreePorts => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanSlot::Hosts => "hosts",
            ScanSlot::OpenPorts => "open-ports",
            ScanSlot::FreePorts => "free-ports",
        }
    }
}

impl fmt::Display for ScanSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host discovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscoveryMode {
    /// One ICMP echo per address through the platform `ping` binary.
    #[default]
    Ping,
    /// One PTR lookup per address; every address yields a record.
    ReverseDns,
    /// One batched ARP broadcast over the attached segment.
    Arp,
}

impl FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ping" | "icmp" => Ok(DiscoveryMode::Ping),
            "dns" | "rdns" | "reverse-dns" => Ok(DiscoveryMode::ReverseDns),
            "arp" => Ok(DiscoveryMode::Arp),
            other => Err(format!("unknown discovery mode '{other}' (expected ping, dns or arp)")),
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiscoveryMode::Ping => "ping",
            DiscoveryMode::ReverseDns => "dns",
            DiscoveryMode::Arp => "arp",
        };
        f.write_str(name)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
