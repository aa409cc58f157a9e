use colored::*;
use lanscope_common::models::HostRecord;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Heading line for a host: its name when the strategy has one, else its address.
pub fn host_heading(host: &HostRecord) -> String {
    match host.hostname_label() {
        Some(name) => name.to_string(),
        None => host.ip().to_string(),
    }
}

/// Tree rows below the heading, chosen by the record's strategy.
pub fn host_details(host: &HostRecord) -> Vec<Detail> {
    let ipv4: Detail = ("IPv4".to_string(), host.ip().to_string().color(colors::IPV4_ADDR));
    match host {
        HostRecord::Ping { .. } => Vec::new(),
        HostRecord::Dns { .. } => vec![ipv4],
        HostRecord::Arp { mac, vendor, .. } => {
            let mut details: Vec<Detail> =
                vec![("MAC".to_string(), mac.to_string().color(colors::MAC_ADDR))];
            if let Some(vendor) = vendor {
                details.push(("Vendor".to_string(), vendor.as_str().color(colors::VENDOR)));
            }
            details.push(ipv4);
            details
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
