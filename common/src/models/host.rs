use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

/// Placeholder rendered for a reverse DNS lookup that found nothing.
pub const NO_HOSTNAME: &str = "no hostname";
/// Placeholder rendered for an ARP neighbour whose name could not be resolved.
pub const UNKNOWN_HOSTNAME: &str = "unknown";

/// A host found by one discovery strategy. The variant tells which one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRecord {
    Ping {
        ip: Ipv4Addr,
    },
    Dns {
        ip: Ipv4Addr,
        hostname: Option<String>,
    },
    Arp {
        ip: Ipv4Addr,
        mac: MacAddr,
        hostname: Option<String>,
        vendor: Option<String>,
    },
}

impl HostRecord {
    pub fn ip(&self) -> Ipv4Addr {
        match self {
            HostRecord::Ping { ip }
            | HostRecord::Dns { ip, .. }
            | HostRecord::Arp { ip, .. } => *ip,
        }
    }

    /// The resolved name, or the variant's placeholder. Ping records carry no name.
    pub fn hostname_label(&self) -> Option<&str> {
        match self {
            HostRecord::Ping { .. } => None,
            HostRecord::Dns { hostname, .. } => Some(hostname.as_deref().unwrap_or(NO_HOSTNAME)),
            HostRecord::Arp { hostname, .. } => {
                Some(hostname.as_deref().unwrap_or(UNKNOWN_HOSTNAME))
            }
        }
    }
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostRecord::Ping { ip } => write!(f, "{ip}"),
            HostRecord::Dns { ip, .. } => {
                write!(f, "{ip}: {}", self.hostname_label().unwrap_or(NO_HOSTNAME))
            }
            HostRecord::Arp { ip, mac, .. } => write!(
                f,
                "{} | {mac} | {ip}",
                self.hostname_label().unwrap_or(UNKNOWN_HOSTNAME)
            ),
        }
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
