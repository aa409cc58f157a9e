#![cfg(test)]
use std::net::Ipv4Addr;

use lanscope_common::network::interface::select_for_network;
use lanscope_common::network::range::NetworkRange;
use pnet::datalink::{MacAddr, NetworkInterface};

use crate::util::{ni, v4};

/*************************************************************
                 Tests for ARP interface choice
**************************************************************/

#[test]
fn home_lan_selects_wlan0() {
    let network = NetworkRange::parse("192.168.1.0/24").unwrap();
    let target = select_for_network(&iface_all(), &network).unwrap();
    assert_eq!(target.interface, wlan0());
    assert_eq!(target.src_addr, Ipv4Addr::new(192, 168, 1, 42));
    assert_eq!(target.src_mac, MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22));
}

#[test]
fn host_bits_in_the_network_do_not_matter() {
    let network = NetworkRange::parse("10.0.0.99/24").unwrap();
    let target = select_for_network(&iface_all(), &network).unwrap();
    assert_eq!(target.interface, eth1());
}

#[test]
fn loopback_and_tunnels_are_never_chosen() {
    let interfaces = vec![lo(), tun0()];
    for cidr in ["127.0.0.0/8", "10.96.0.0/16"] {
        let network = NetworkRange::parse(cidr).unwrap();
        assert!(select_for_network(&interfaces, &network).is_none(), "{cidr}");
    }
}

#[test]
fn unattached_network_selects_nothing() {
    let network = NetworkRange::parse("172.31.0.0/16").unwrap();
    assert!(select_for_network(&iface_all(), &network).is_none());
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

fn iface_all() -> Vec<NetworkInterface> {
    vec![lo(), tun0(), wlan0(), eth1(), docker0()]
}

fn lo() -> NetworkInterface {
    ni("lo", 1, Some(MacAddr::new(0, 0, 0, 0, 0, 0)), &[v4(127, 0, 0, 1, 8)], 65609)
}

fn tun0() -> NetworkInterface {
    ni("tun0", 5, None, &[v4(10, 96, 0, 57, 16)], 69841)
}

fn wlan0() -> NetworkInterface {
    ni(
        "wlan0",
        3,
        Some(MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22)),
        &[v4(192, 168, 1, 42, 24)],
        69699,
    )
}

fn eth1() -> NetworkInterface {
    ni(
        "eth1",
        4,
        Some(MacAddr::new(0x52, 0x54, 0x00, 0x12, 0x34, 0x56)),
        &[v4(10, 0, 0, 15, 24)],
        69699,
    )
}

fn docker0() -> NetworkInterface {
    ni(
        "docker0",
        7,
        Some(MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x01)),
        &[v4(172, 17, 0, 1, 16)],
        69699,
    )
}
