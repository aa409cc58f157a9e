//! Open-port detection by completing a TCP handshake.

use std::io;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use lanscope_common::error::ScanError;
use lanscope_common::models::PortRecord;
use tracing::trace;

use crate::job::Verdict;

/// Resolves a host name or address literal once, preferring IPv4.
pub fn resolve_target(target: &str) -> Result<IpAddr, ScanError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(ScanError::InvalidTarget {
            target: target.to_string(),
            reason: "empty target".to_string(),
        });
    }
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs: Vec<SocketAddr> = (target, 0)
        .to_socket_addrs()
        .map_err(|e| ScanError::InvalidTarget {
            target: target.to_string(),
            reason: e.to_string(),
        })?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .map(SocketAddr::ip)
        .ok_or_else(|| ScanError::InvalidTarget {
            target: target.to_string(),
            reason: "name resolved to no addresses".to_string(),
        })
}

/// Kinds that mean "nobody is listening there", as opposed to a local failure.
fn is_closed(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::TimedOut
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
    )
}

pub(crate) fn probe(addr: SocketAddr, timeout: Duration) -> Verdict<PortRecord> {
    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_stream) => Verdict::Hit(PortRecord::open(addr.port())),
        Err(e) if is_closed(e.kind()) => {
            trace!(%addr, error = %e, "port closed");
            Verdict::Miss
        }
        Err(e) => Verdict::Fault(e),
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
