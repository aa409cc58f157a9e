//! # Port State Scans
//!
//! Walks a port range with one of two strategies. A **connect** scan reports the
//! ports of a (possibly remote) host that accept a TCP handshake. A **bind** scan
//! reports the local ports nothing currently owns.

pub mod bind;
pub mod connect;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use lanscope_common::cancel::CancellationToken;
use lanscope_common::models::PortRecord;
use lanscope_common::network::range::PortRange;
use tracing::debug;

use crate::job::{self, ScanJob};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortScanMode {
    RemoteConnect { target: IpAddr, timeout: Duration },
    LocalBind,
}

pub struct PortStateJob {
    mode: PortScanMode,
    range: PortRange,
    token: CancellationToken,
}

impl PortStateJob {
    pub fn new(mode: PortScanMode, range: PortRange, token: CancellationToken) -> Self {
        Self { mode, range, token }
    }
}

impl ScanJob for PortStateJob {
    type Record = PortRecord;

    fn name(&self) -> &'static str {
        match self.mode {
            PortScanMode::RemoteConnect { .. } => "open-ports",
            PortScanMode::LocalBind => "free-ports",
        }
    }

    fn run(self, progress: &mut dyn FnMut(u8)) -> Vec<PortRecord> {
        let total = self.range.len();
        match self.mode {
            PortScanMode::RemoteConnect { target, timeout } => {
                debug!(%target, range = %self.range, ?timeout, "connect scan");
                job::sweep(self.range.iter(), total, &self.token, progress, |port| {
                    connect::probe(SocketAddr::new(target, *port), timeout)
                })
            }
            PortScanMode::LocalBind => {
                debug!(range = %self.range, "bind scan");
                job::sweep(self.range.iter(), total, &self.token, progress, |port| {
                    bind::probe(*port)
                })
            }
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
