//! A **link-layer** sweep of a directly attached network.
//!
//! Every address of the network gets one broadcast ARP request in a single batch,
//! then replies are collected for a fixed window. Opening the raw channel needs
//! elevated privileges; when that fails the sweep degrades to finding nothing.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use lanscope_common::cancel::CancellationToken;
use lanscope_common::network::interface::{self, LinkTarget};
use lanscope_common::network::range::NetworkRange;
use lanscope_protocols::arp::{self, ArpReply};
use pnet::datalink::{DataLinkReceiver, DataLinkSender};
use tracing::{debug, trace, warn};

use crate::network::channel::{self, LinkLayer};

/// Sends the requests and gathers the answers. Never fails; see the module docs.
pub fn sweep(
    link: &dyn LinkLayer,
    network: &NetworkRange,
    window: Duration,
    token: &CancellationToken,
) -> Vec<ArpReply> {
    if token.is_set() {
        return Vec::new();
    }

    let interfaces = link.interfaces();
    let Some(target) = interface::select_for_network(&interfaces, network) else {
        warn!(%network, "no interface is attached to the network, skipping ARP");
        return Vec::new();
    };

    if !is_root::is_root() {
        debug!("not running as root, raw link-layer access may be refused");
    }

    let cfg = channel::get_config();
    let opened =
        channel::open_eth_channel(&target.interface, &cfg, |intf, cfg| link.open(intf, cfg));
    let (mut tx, mut rx) = match opened {
        Ok(pair) => pair,
        Err(e) => {
            warn!("ARP unavailable, reporting no hosts: {e:#}");
            return Vec::new();
        }
    };

    let sent = broadcast_requests(tx.as_mut(), &target, network);
    debug!(sent, interface = %target.interface.name, "ARP requests sent");

    collect_replies(rx.as_mut(), network, window, token)
}

fn broadcast_requests(
    tx: &mut dyn DataLinkSender,
    target: &LinkTarget,
    network: &NetworkRange,
) -> usize {
    let mut sent = 0;
    for addr in network.iter().filter(|addr| *addr != target.src_addr) {
        let frame = match arp::create_request(target.src_mac, target.src_addr, addr) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(%addr, "failed to build ARP request: {e:#}");
                continue;
            }
        };
        match tx.send_to(&frame, None) {
            Some(Ok(())) => sent += 1,
            Some(Err(e)) => debug!(%addr, error = %e, "failed to send ARP request"),
            None => debug!(%addr, "link layer dropped ARP request"),
        }
    }
    sent
}

/// Replies from inside `network`, first answer per address, in arrival order.
fn collect_replies(
    rx: &mut dyn DataLinkReceiver,
    network: &NetworkRange,
    window: Duration,
    token: &CancellationToken,
) -> Vec<ArpReply> {
    let deadline = Instant::now() + window;
    let mut seen = HashSet::new();
    let mut replies = Vec::new();

    while Instant::now() < deadline {
        if token.is_set() {
            debug!(collected = replies.len(), "cancellation observed while listening");
            break;
        }
        match rx.next() {
            Ok(frame) => {
                if let Some(reply) = arp::parse_reply(frame)
                    && network.contains(reply.sender_addr)
                    && seen.insert(reply.sender_addr)
                {
                    trace!(ip = %reply.sender_addr, mac = %reply.sender_mac, "ARP reply");
                    replies.push(reply);
                }
            }
            // Read timeouts land here too.
            Err(e) => trace!(error = %e, "link-layer read returned nothing"),
        }
    }
    replies
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
