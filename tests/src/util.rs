use std::io;
use std::net::{Ipv4Addr, TcpListener};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lanscope_core::discovery::dns::ReverseResolver;
use lanscope_core::discovery::ping::Pinger;
use lanscope_core::network::channel::LinkLayer;
use lanscope_core::vendors::NoVendors;
use lanscope_core::{DiscoveryTools, ScanCoordinator, ScanReport, ScanRequest};
use pnet::datalink::{Channel, Config, MacAddr, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

pub const WAIT: Duration = Duration::from_secs(10);

pub fn ni(
    name: &str,
    index: u32,
    mac: Option<MacAddr>,
    ips: &[IpNetwork],
    flags: u32,
) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac,
        ips: ips.to_vec(),
        flags,
    }
}

/// Window bases below the Linux ephemeral range (32768-60999), tried in order.
const WINDOW_BASES: [u16; 3] = [31980, 29980, 27980];

/// Holds every port of a `width`-wide window except the middle one, moving to the
/// next base when any port of a window is already in use.
pub fn hold_all_but_middle(width: u16) -> (u16, Vec<TcpListener>) {
    WINDOW_BASES
        .iter()
        .find_map(|&base| {
            let middle = base + width / 2;
            TcpListener::bind(("0.0.0.0", middle)).ok()?;
            (base..base + width)
                .filter(|port| *port != middle)
                .map(|port| TcpListener::bind(("0.0.0.0", port)))
                .collect::<Result<Vec<_>, _>>()
                .ok()
                .map(|held| (base, held))
        })
        .expect("every test window is in use")
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

/// Every address answers, each after `delay`.
pub struct SlowPinger {
    pub delay: Duration,
}

impl Pinger for SlowPinger {
    fn ping(&self, _addr: Ipv4Addr) -> io::Result<bool> {
        thread::sleep(self.delay);
        Ok(true)
    }
}

pub struct NoNames;

impl ReverseResolver for NoNames {
    fn reverse(&self, _addr: Ipv4Addr) -> Option<String> {
        None
    }
}

/// A machine with no usable interfaces.
pub struct NoLink;

impl LinkLayer for NoLink {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        Vec::new()
    }

    fn open(&self, _intf: &NetworkInterface, _cfg: Config) -> io::Result<Channel> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no link layer"))
    }
}

pub fn slow_tools(delay: Duration) -> DiscoveryTools {
    DiscoveryTools {
        pinger: Arc::new(SlowPinger { delay }),
        resolver: Arc::new(|| Box::new(NoNames) as Box<dyn ReverseResolver>),
        link: Arc::new(NoLink),
        vendors: Arc::new(NoVendors),
        arp_window: Duration::from_millis(50),
    }
}

/// What a started scan reported back through its callbacks.
pub struct Observed {
    pub progress: Arc<Mutex<Vec<u8>>>,
    pub done: mpsc::Receiver<ScanReport>,
}

impl Observed {
    pub fn wait(&self) -> ScanReport {
        self.done.recv_timeout(WAIT).expect("scan did not complete in time")
    }

    pub fn progress(&self) -> Vec<u8> {
        self.progress.lock().unwrap().clone()
    }
}

/// Starts `request` with callbacks that record everything they see.
pub fn start_observed(coordinator: &ScanCoordinator, request: ScanRequest) -> Observed {
    try_start_observed(coordinator, request).expect("scan should start")
}

pub fn try_start_observed(
    coordinator: &ScanCoordinator,
    request: ScanRequest,
) -> Result<Observed, lanscope_common::error::ScanError> {
    let progress = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&progress);
    let (tx, done) = mpsc::channel();

    coordinator.start(
        request,
        move |pct| sink.lock().unwrap().push(pct),
        move |report| {
            let _ = tx.send(report);
        },
    )?;

    Ok(Observed { progress, done })
}
