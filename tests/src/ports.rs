#![cfg(test)]
use std::net::TcpListener;
use std::time::Duration;

use lanscope_common::models::{PortRecord, PortState};
use lanscope_common::network::range::{expand_ports, PortRange};
use lanscope_core::{ScanCoordinator, ScanReport, ScanRequest};

use crate::util::{hold_all_but_middle, slow_tools, start_observed};

#[test]
fn free_port_window_through_the_coordinator() {
    let (base, _held) = hold_all_but_middle(4);

    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::ZERO));
    let observed = start_observed(
        &coordinator,
        ScanRequest::FreePorts { range: PortRange::new(base, base + 3).unwrap() },
    );

    assert_eq!(observed.wait(), ScanReport::Ports(vec![PortRecord::free(base + 2)]));
    assert_eq!(observed.progress(), vec![25, 50, 75, 100]);
}

#[test]
fn open_ports_are_reported_in_ascending_order() {
    let listeners: Vec<TcpListener> =
        (0..3).map(|_| TcpListener::bind("127.0.0.1:0").unwrap()).collect();
    let mut ports: Vec<u16> = listeners.iter().map(|l| l.local_addr().unwrap().port()).collect();
    ports.sort_unstable();

    let coordinator = ScanCoordinator::with_tools(slow_tools(Duration::ZERO));
    let observed = start_observed(
        &coordinator,
        ScanRequest::OpenPorts {
            target: "127.0.0.1".to_string(),
            range: PortRange::new(ports[0], ports[2]).unwrap(),
            timeout: Duration::from_millis(500),
        },
    );
    let ScanReport::Ports(found) = observed.wait() else {
        panic!("expected port records");
    };

    assert!(found.iter().all(|r| r.state == PortState::Open));
    assert!(found.windows(2).all(|w| w[0].port < w[1].port));
    for port in &ports {
        assert!(found.contains(&PortRecord::open(*port)), "port {port} missing");
    }
}

#[test]
fn port_expansion_matches_the_range() {
    let range: PortRange = "8000-8010".parse().unwrap();
    let expanded = expand_ports(range.start(), range.end()).unwrap();
    assert_eq!(expanded.len() as u64, range.len());
    assert_eq!(expanded, range.iter().collect::<Vec<_>>());
    assert!(expand_ports(10, 9).is_err());
}
