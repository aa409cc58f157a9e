//! # Address and Port Spaces
//!
//! Turns a CIDR network or a port interval into the ordered units a scan job walks
//! through. The lengths double as progress denominators.

use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start: u64 = u32::from(self.start_addr).into();
        let end: u64 = u32::from(self.end_addr).into();
        if start > end { 0 } else { end - start + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An IPv4 network given in CIDR notation.
///
/// Host bits in the base address are accepted and masked off, so
/// `192.168.1.77/24` describes the same network as `192.168.1.0/24`.
/// A bare address is treated as a `/32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange {
    net: Ipv4Network,
}

impl NetworkRange {
    pub fn parse(cidr: &str) -> Result<Self, ScanError> {
        let trimmed = cidr.trim();
        if trimmed.is_empty() {
            return Err(ScanError::InvalidRange("empty network".to_string()));
        }
        let given: Ipv4Network = trimmed
            .parse()
            .map_err(|e| ScanError::InvalidRange(format!("'{trimmed}': {e}")))?;
        let net = Ipv4Network::new(given.network(), given.prefix())
            .map_err(|e| ScanError::InvalidRange(format!("'{trimmed}': {e}")))?;
        Ok(Self { net })
    }

    pub fn network(&self) -> Ipv4Addr {
        self.net.network()
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.net.broadcast()
    }

    pub fn prefix(&self) -> u8 {
        self.net.prefix()
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.net.contains(addr)
    }

    /// Number of addresses, network and broadcast included.
    pub fn len(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_range(&self) -> Ipv4Range {
        Ipv4Range::new(self.network(), self.broadcast())
    }

    /// Addresses in ascending numeric order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        self.as_range().iter()
    }
}

impl FromStr for NetworkRange {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix())
    }
}

/// Inclusive TCP port interval, `1 <= start <= end <= 65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub const WELL_KNOWN: PortRange = PortRange { start: 1, end: 1024 };
    pub const ALL: PortRange = PortRange { start: 1, end: u16::MAX };

    pub fn new(start: u16, end: u16) -> Result<Self, ScanError> {
        if start == 0 {
            return Err(ScanError::InvalidRange("port 0 cannot be scanned".to_string()));
        }
        if start > end {
            return Err(ScanError::InvalidRange(format!(
                "start port {start} is greater than end port {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl FromStr for PortRange {
    type Err = ScanError;

    /// Accepts `start-end` or a single port.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_port = |part: &str| {
            part.trim()
                .parse::<u16>()
                .map_err(|e| ScanError::InvalidRange(format!("'{}': {e}", part.trim())))
        };

        match s.split_once('-') {
            Some((start, end)) => PortRange::new(parse_port(start)?, parse_port(end)?),
            None => {
                let port = parse_port(s)?;
                PortRange::new(port, port)
            }
        }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Every address of `cidr`, ascending, network and broadcast included.
pub fn expand_hosts(cidr: &str) -> Result<Vec<Ipv4Addr>, ScanError> {
    Ok(NetworkRange::parse(cidr)?.iter().collect())
}

/// Every port from `start` to `end`, inclusive and ascending.
pub fn expand_ports(start: u16, end: u16) -> Result<Vec<u16>, ScanError> {
    Ok(PortRange::new(start, end)?.iter().collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
