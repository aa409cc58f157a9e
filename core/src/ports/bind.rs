//! Free-port detection by claiming the port on every local address.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use lanscope_common::models::PortRecord;
use socket2::{Domain, Protocol, Socket, Type};
use tracing::trace;

use crate::job::Verdict;

const SOCKET_TIMEOUT: Duration = Duration::from_millis(10);

/// Binds a fresh TCP socket to `0.0.0.0:port` and releases it again.
///
/// `SO_REUSEADDR` is left off, so any existing owner of the port makes this fail.
pub fn try_claim(port: u16) -> io::Result<()> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_read_timeout(Some(SOCKET_TIMEOUT))?;
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    socket.bind(&addr.into())
}

fn is_taken(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::AddrInUse | io::ErrorKind::PermissionDenied)
}

pub(crate) fn probe(port: u16) -> Verdict<PortRecord> {
    match try_claim(port) {
        Ok(()) => Verdict::Hit(PortRecord::free(port)),
        Err(e) if is_taken(e.kind()) => {
            trace!(port, error = %e, "port taken");
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
