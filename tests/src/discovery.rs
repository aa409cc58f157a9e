#![cfg(test)]
use std::time::Duration;

use lanscope_common::cancel::CancellationToken;
use lanscope_common::config::ScanConfig;
use lanscope_common::models::{DiscoveryMode, NO_HOSTNAME};
use lanscope_common::network::range::{expand_hosts, NetworkRange};
use lanscope_core::job::{self, JobEvents, ScanJob};
use lanscope_core::{DiscoveryTools, HostDiscoveryJob};

use crate::util::{slow_tools, WAIT};

#[test]
fn reverse_dns_over_a_test_net_names_nothing() {
    let network = NetworkRange::parse("192.0.2.0/30").unwrap();
    let job = HostDiscoveryJob::new(
        DiscoveryMode::ReverseDns,
        network,
        CancellationToken::new(),
        slow_tools(Duration::ZERO),
    );

    let hosts = job.run(&mut |_| {});
    assert_eq!(hosts.len(), 4);
    assert!(hosts.iter().all(|h| h.hostname_label() == Some(NO_HOSTNAME)));
    let ips: Vec<_> = hosts.iter().map(|h| h.ip()).collect();
    assert_eq!(ips, expand_hosts("192.0.2.0/30").unwrap());
}

#[test]
fn spawned_discovery_reports_on_a_named_worker() {
    let network = NetworkRange::parse("10.1.1.0/30").unwrap();
    let job = HostDiscoveryJob::new(
        DiscoveryMode::Ping,
        network,
        CancellationToken::new(),
        slow_tools(Duration::ZERO),
    );
    let (tx, rx) = std::sync::mpsc::channel();

    let handle = job::spawn(
        job,
        JobEvents::new(|_| {}, move |hosts| {
            let name = std::thread::current().name().map(str::to_string);
            tx.send((hosts.len(), name)).unwrap();
        }),
    )
    .unwrap();

    let (found, worker) = rx.recv_timeout(WAIT).unwrap();
    handle.join().unwrap();
    assert_eq!(found, 4);
    assert_eq!(worker.as_deref(), Some("scan-hosts"));
}

/// Hits the machine's real resolver.
#[test]
#[ignore]
fn reverse_dns_resolves_loopback_through_the_system() {
    let tools = DiscoveryTools::from_config(&ScanConfig::default());
    let job = HostDiscoveryJob::new(
        DiscoveryMode::ReverseDns,
        NetworkRange::parse("127.0.0.1/32").unwrap(),
        CancellationToken::new(),
        tools,
    );
    let hosts = job.run(&mut |_| {});
    assert_eq!(hosts.len(), 1);
    assert_ne!(hosts[0].hostname_label(), Some(NO_HOSTNAME));
}

/// Needs the `ping` binary and a loopback that answers ICMP.
#[test]
#[ignore]
fn ping_finds_loopback() {
    let tools = DiscoveryTools::from_config(&ScanConfig::default());
    let job = HostDiscoveryJob::new(
        DiscoveryMode::Ping,
        NetworkRange::parse("127.0.0.1").unwrap(),
        CancellationToken::new(),
        tools,
    );
    assert_eq!(job.run(&mut |_| {}).len(), 1);
}
