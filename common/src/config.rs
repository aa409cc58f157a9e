use std::time::Duration;

use crate::models::DiscoveryMode;
use crate::network::range::PortRange;

pub const DEFAULT_NETWORK: &str = "192.168.1.0/24";
pub const DEFAULT_OPEN_TARGET: &str = "127.0.0.1";
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_millis(300);
pub const DEFAULT_ARP_WINDOW: Duration = Duration::from_secs(2);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Every knob a front-end may override. `Default` gives the stock scan settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// CIDR network swept by host discovery.
    pub network: String,
    pub discovery_mode: DiscoveryMode,
    /// Wall-clock budget for one ping probe.
    pub ping_timeout: Duration,
    /// How long ARP replies are collected after the broadcast.
    pub arp_window: Duration,
    /// Host name or address probed by the open port scan.
    pub open_target: String,
    pub open_range: PortRange,
    pub connect_timeout: Duration,
    pub free_range: PortRange,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            discovery_mode: DiscoveryMode::Ping,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            arp_window: DEFAULT_ARP_WINDOW,
            open_target: DEFAULT_OPEN_TARGET.to_string(),
            open_range: PortRange::WELL_KNOWN,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            free_range: PortRange::ALL,
        }
    }
}
