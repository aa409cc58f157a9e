//! # Host Discovery
//!
//! Finds the live hosts of a network with one of three strategies:
//!
//! * **Ping**: one ICMP echo per address through the platform `ping` binary.
//! * **Reverse DNS**: a PTR lookup per address. Every address yields a record.
//! * **ARP**: a link-layer broadcast on the interface attached to the network,
//!   enriched with reverse names and MAC vendors.
//!
//! The probes themselves sit behind traits so tests can swap them out.

pub mod arp;
pub mod dns;
pub mod ping;

use std::sync::Arc;
use std::time::Duration;

use lanscope_common::cancel::CancellationToken;
use lanscope_common::config::ScanConfig;
use lanscope_common::models::{DiscoveryMode, HostRecord};
use lanscope_common::network::range::NetworkRange;
use tracing::{debug, trace};

use crate::job::{self, ScanJob, Verdict};
use crate::network::channel::{LinkLayer, SystemLink};
use crate::vendors::{MacOuiRepo, VendorRepository};
use dns::{ResolverFactory, SystemResolver};
use ping::{Pinger, SystemPinger};

/// The probes a discovery run talks to.
#[derive(Clone)]
pub struct DiscoveryTools {
    pub pinger: Arc<dyn Pinger>,
    pub resolver: ResolverFactory,
    pub link: Arc<dyn LinkLayer>,
    pub vendors: Arc<dyn VendorRepository>,
    pub arp_window: Duration,
}

impl DiscoveryTools {
    /// The real system probes, tuned by `cfg`.
    pub fn from_config(cfg: &ScanConfig) -> Self {
        Self {
            pinger: Arc::new(SystemPinger::new(cfg.ping_timeout)),
            resolver: SystemResolver::factory(),
            link: Arc::new(SystemLink),
            vendors: Arc::new(MacOuiRepo),
            arp_window: cfg.arp_window,
        }
    }
}

pub struct HostDiscoveryJob {
    mode: DiscoveryMode,
    network: NetworkRange,
    token: CancellationToken,
    tools: DiscoveryTools,
}

impl HostDiscoveryJob {
    pub fn new(
        mode: DiscoveryMode,
        network: NetworkRange,
        token: CancellationToken,
        tools: DiscoveryTools,
    ) -> Self {
        Self {
            mode,
            network,
            token,
            tools,
        }
    }

    fn ping_sweep(&self, progress: &mut dyn FnMut(u8)) -> Vec<HostRecord> {
        let pinger = &self.tools.pinger;
        job::sweep(
            self.network.iter(),
            self.network.len(),
            &self.token,
            progress,
            |ip| match pinger.ping(*ip) {
                Ok(true) => Verdict::Hit(HostRecord::Ping { ip: *ip }),
                Ok(false) => {
                    trace!(%ip, "no echo reply");
                    Verdict::Miss
                }
                Err(e) => Verdict::Fault(e),
            },
        )
    }

    fn dns_sweep(&self, progress: &mut dyn FnMut(u8)) -> Vec<HostRecord> {
        let resolver = (self.tools.resolver)();
        job::sweep(
            self.network.iter(),
            self.network.len(),
            &self.token,
            progress,
            |ip| {
                Verdict::Hit(HostRecord::Dns {
                    ip: *ip,
                    hostname: resolver.reverse(*ip),
                })
            },
        )
    }

    fn arp_sweep(&self, progress: &mut dyn FnMut(u8)) -> Vec<HostRecord> {
        progress(0);

        let replies = arp::sweep(
            self.tools.link.as_ref(),
            &self.network,
            self.tools.arp_window,
            &self.token,
        );

        let resolver = (self.tools.resolver)();
        let mut hosts = Vec::with_capacity(replies.len());
        for reply in replies {
            // Once cancelled, the remaining neighbours keep their MACs but skip the lookup.
            let hostname = if self.token.is_set() {
                None
            } else {
                resolver.reverse(reply.sender_addr)
            };
            hosts.push(HostRecord::Arp {
                ip: reply.sender_addr,
                mac: reply.sender_mac,
                hostname,
                vendor: self.tools.vendors.get_vendor(reply.sender_mac),
            });
        }

        if self.token.is_set() {
            debug!(found = hosts.len(), "ARP discovery cancelled");
        } else {
            progress(100);
        }
        hosts
    }
}

impl ScanJob for HostDiscoveryJob {
    type Record = HostRecord;

    fn name(&self) -> &'static str {
        "hosts"
    }

    fn run(self, progress: &mut dyn FnMut(u8)) -> Vec<HostRecord> {
        debug!(mode = %self.mode, network = %self.network, "host discovery");
        match self.mode {
            DiscoveryMode::Ping => self.ping_sweep(progress),
            DiscoveryMode::ReverseDns => self.dns_sweep(progress),
            DiscoveryMode::Arp => self.arp_sweep(progress),
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
