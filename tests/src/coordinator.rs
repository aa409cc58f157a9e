#![cfg(test)]
use std::net::{Ipv4Addr, TcpListener};
use std::time::Duration;

use lanscope_common::config::ScanConfig;
use lanscope_common::error::ScanError;
use lanscope_common::models::{DiscoveryMode, HostRecord, PortRecord, ScanSlot};
use lanscope_common::network::range::PortRange;
use lanscope_core::{ScanCoordinator, ScanReport, ScanRequest};
use tokio::sync::oneshot;

use crate::util::{slow_tools, start_observed, try_start_observed};

/// A ping sweep over 16 addresses taking about `16 * delay`.
fn slow_hosts() -> ScanRequest {
    ScanRequest::Hosts {
        mode: DiscoveryMode::Ping,
        network: "10.20.30.0/28".to_string(),
    }
}

fn hosts_of(report: ScanReport) -> Vec<HostRecord> {
    match report {
        ScanReport::Hosts(hosts) => hosts,
        ScanReport::Ports(_) => panic!("expected host records"),
    }
}

#[test]
fn stop_before_start_leaves_the_next_scan_untouched() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::ZERO));
    coordinator.stop();
    coordinator.stop();

    let observed = start_observed(&coordinator, slow_hosts());
    let hosts = hosts_of(observed.wait());

    assert_eq!(hosts.len(), 16);
    assert_eq!(observed.progress().last(), Some(&100));
}

#[test]
fn second_start_on_a_busy_slot_is_refused() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::from_millis(50)));
    let first = start_observed(&coordinator, slow_hosts());

    let second = try_start_observed(&coordinator, slow_hosts());
    assert!(matches!(second, Err(ScanError::SlotBusy(ScanSlot::Hosts))));
    assert!(coordinator.is_running(ScanSlot::Hosts));

    coordinator.stop();
    first.wait();
    assert!(!coordinator.is_running(ScanSlot::Hosts));
}

#[test]
fn stopped_scan_returns_a_prefix_without_reaching_100() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::from_millis(50)));
    let observed = start_observed(&coordinator, slow_hosts());

    std::thread::sleep(Duration::from_millis(120));
    coordinator.stop();
    let hosts = hosts_of(observed.wait());

    assert!(hosts.len() < 16);
    let expected: Vec<HostRecord> = (0..hosts.len() as u8)
        .map(|i| HostRecord::Ping { ip: Ipv4Addr::new(10, 20, 30, i) })
        .collect();
    assert_eq!(hosts, expected);
    assert!(observed.progress().iter().all(|p| *p < 100));
}

#[test]
fn restart_after_stop_runs_to_completion() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::from_millis(20)));

    let first = start_observed(&coordinator, slow_hosts());
    coordinator.stop();
    first.wait();

    let second = start_observed(&coordinator, slow_hosts());
    let hosts = hosts_of(second.wait());

    assert_eq!(hosts.len(), 16);
    assert_eq!(second.progress().last(), Some(&100));
}

#[test]
fn stopping_one_slot_leaves_the_others_running() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::from_millis(20)));

    let hosts = start_observed(&coordinator, slow_hosts());
    let free = start_observed(
        &coordinator,
        ScanRequest::FreePorts { range: PortRange::new(1, 1).unwrap() },
    );

    coordinator.stop_slot(ScanSlot::FreePorts);
    free.wait();

    assert_eq!(hosts_of(hosts.wait()).len(), 16);
}

#[test]
fn invalid_requests_are_rejected_up_front() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::ZERO));

    let bad_cidr = ScanRequest::Hosts {
        mode: DiscoveryMode::ReverseDns,
        network: "10.0.0.0/40".to_string(),
    };
    assert!(matches!(
        try_start_observed(&coordinator, bad_cidr),
        Err(ScanError::InvalidRange(_))
    ));

    let bad_target = ScanRequest::OpenPorts {
        target: "no-such-host.invalid".to_string(),
        range: PortRange::WELL_KNOWN,
        timeout: Duration::from_millis(100),
    };
    assert!(matches!(
        try_start_observed(&coordinator, bad_target),
        Err(ScanError::InvalidTarget { .. })
    ));

    assert!(ScanSlot::ALL.iter().all(|slot| !coordinator.is_running(*slot)));
}

#[test]
fn arp_without_a_link_layer_still_completes() {
    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::ZERO));
    let request = ScanRequest::Hosts {
        mode: DiscoveryMode::Arp,
        network: "10.20.30.0/24".to_string(),
    };

    let observed = start_observed(&coordinator, request);
    assert!(hosts_of(observed.wait()).is_empty());
    assert_eq!(observed.progress(), vec![0, 100]);
}

#[tokio::test]
async fn open_port_scan_finds_a_loopback_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut cfg = ScanConfig::default();
    cfg.open_target = "localhost".to_string();
    cfg.open_range = PortRange::new(port, port).unwrap();

    let coordinator = ScanCoordinator::new(&cfg);
    let (tx, rx) = oneshot::channel();
    coordinator
        .start(ScanRequest::open_ports(&cfg), |_| {}, move |report| {
            let _ = tx.send(report);
        })
        .unwrap();

    let report = tokio::time::timeout(Duration::from_secs(10), rx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report, ScanReport::Ports(vec![PortRecord::open(port)]));
}
