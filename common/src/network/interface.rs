//! Picks the local interface a link-layer sweep has to go out on.
//!
//! ARP never crosses a router, so the only usable interface is one whose own IPv4
//! network contains the network being swept.

use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::util::MacAddr;

use crate::network::range::NetworkRange;
use crate::utils::interface::NetworkInterfaceExtension;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback cannot carry Ethernet frames.
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// None of the interface's IPv4 networks covers the swept network.
    NotAttached,
}

/// The interface chosen for a sweep, with the addresses the frames are sent from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub interface: NetworkInterface,
    pub src_mac: MacAddr,
    pub src_addr: Ipv4Addr,
}

pub fn check_viability(
    interface: &NetworkInterface,
    network: &NetworkRange,
) -> Result<LinkTarget, ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    let Some(src_mac) = interface.mac.filter(|mac| *mac != MacAddr::zero()) else {
        return Err(ViabilityError::NoMacAddress);
    };
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    let own_net = interface
        .ipv4_net_containing(network.network())
        .ok_or(ViabilityError::NotAttached)?;

    Ok(LinkTarget {
        interface: interface.clone(),
        src_mac,
        src_addr: own_net.ip(),
    })
}

/// First viable interface attached to `network`, in the order given.
pub fn select_for_network(
    interfaces: &[NetworkInterface],
    network: &NetworkRange,
) -> Option<LinkTarget> {
    interfaces
        .iter()
        .find_map(|interface| check_viability(interface, network).ok())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
