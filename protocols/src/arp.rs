use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::EtherTypes;
use pnet::util::MacAddr;

use crate::{ARP_LEN, ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS, ethernet};

/// The sender half of an ARP reply: who answered, and from which hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpReply {
    pub sender_addr: Ipv4Addr,
    pub sender_mac: MacAddr,
}

/// Builds a broadcast "who-has `dst_addr`" frame, padded to the Ethernet minimum.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;
    let mut arp_packet = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(6);
    arp_packet.set_proto_addr_len(4);
    arp_packet.set_operation(ArpOperations::Request);
    arp_packet.set_sender_hw_addr(src_mac);
    arp_packet.set_target_hw_addr(MacAddr::zero());
    arp_packet.set_sender_proto_addr(src_addr);
    arp_packet.set_target_proto_addr(dst_addr);
    Ok(Vec::from(buffer))
}

/// Builds the reply `sender` would send back to a request from `requester`.
pub fn create_reply(
    sender_mac: MacAddr,
    sender_addr: Ipv4Addr,
    requester_mac: MacAddr,
    requester_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, sender_mac, requester_mac, EtherTypes::Arp)?;
    let mut arp_packet = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(6);
    arp_packet.set_proto_addr_len(4);
    arp_packet.set_operation(ArpOperations::Reply);
    arp_packet.set_sender_hw_addr(sender_mac);
    arp_packet.set_target_hw_addr(requester_mac);
    arp_packet.set_sender_proto_addr(sender_addr);
    arp_packet.set_target_proto_addr(requester_addr);
    Ok(Vec::from(buffer))
}

/// Extracts the sender of an ARP reply. Anything else on the wire yields `None`.
pub fn parse_reply(frame: &[u8]) -> Option<ArpReply> {
    let eth = ethernet::get_packet_from_u8(frame).ok()?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }
    let arp = ArpPacket::new(eth.payload())?;
    if arp.get_operation() != ArpOperations::Reply {
        return None;
    }
    Some(ArpReply {
        sender_addr: arp.get_sender_proto_addr(),
        sender_mac: arp.get_sender_hw_addr(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::EthernetPacket;

    const OWN_MAC: MacAddr = MacAddr(0x02, 0x00, 0x00, 0x00, 0x00, 0x01);
    const PEER_MAC: MacAddr = MacAddr(0x3c, 0x22, 0xfb, 0x10, 0x20, 0x30);

    #[test]
    fn request_is_broadcast_who_has() {
        let frame = create_request(
            OWN_MAC,
            Ipv4Addr::new(192, 168, 1, 10),
            Ipv4Addr::new(192, 168, 1, 42),
        )
        .unwrap();
        assert_eq!(frame.len(), MIN_ETH_FRAME_NO_FCS);

        let eth = EthernetPacket::new(&frame).unwrap();
        assert_eq!(eth.get_destination(), MacAddr::broadcast());
        assert_eq!(eth.get_source(), OWN_MAC);
        assert_eq!(eth.get_ethertype(), EtherTypes::Arp);

        let arp = ArpPacket::new(eth.payload()).unwrap();
        assert_eq!(arp.get_operation(), ArpOperations::Request);
        assert_eq!(arp.get_sender_proto_addr(), Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(arp.get_target_proto_addr(), Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(arp.get_target_hw_addr(), MacAddr::zero());
    }

    #[test]
    fn reply_is_parsed_back() {
        let frame = create_reply(
            PEER_MAC,
            Ipv4Addr::new(192, 168, 1, 42),
            OWN_MAC,
            Ipv4Addr::new(192, 168, 1, 10),
        )
        .unwrap();
        let reply = parse_reply(&frame).unwrap();
        assert_eq!(reply.sender_addr, Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(reply.sender_mac, PEER_MAC);
    }

    #[test]
    fn requests_are_not_replies() {
        let frame = create_request(
            PEER_MAC,
            Ipv4Addr::new(192, 168, 1, 42),
            Ipv4Addr::new(192, 168, 1, 10),
        )
        .unwrap();
        assert_eq!(parse_reply(&frame), None);
    }

    #[test]
    fn non_arp_and_garbage_frames_are_ignored() {
        let mut ipv4_frame = [0u8; MIN_ETH_FRAME_NO_FCS];
        ethernet::make_header(&mut ipv4_frame, PEER_MAC, OWN_MAC, EtherTypes::Ipv4).unwrap();
        assert_eq!(parse_reply(&ipv4_frame), None);
        assert_eq!(parse_reply(&[0xff; 6]), None);
    }
}
