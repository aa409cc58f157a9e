pub mod hosts;
pub mod ip;
pub mod ports;
pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use lanscope_common::config::{
    DEFAULT_ARP_WINDOW, DEFAULT_CONNECT_TIMEOUT, DEFAULT_NETWORK, DEFAULT_OPEN_TARGET,
    DEFAULT_PING_TIMEOUT, ScanConfig,
};
use lanscope_common::models::DiscoveryMode;
use lanscope_common::network::range::PortRange;

#[derive(Parser)]
#[command(name = "lanscope", version)]
#[command(about = "Finds live hosts on a local network and checks TCP port state.")]
pub struct CommandLine {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover live hosts on a network
    #[command(alias = "d", alias = "discover")]
    Hosts(HostsArgs),
    /// List the ports of a host that accept TCP connections
    #[command(alias = "o")]
    Open(OpenArgs),
    /// List the local TCP ports nothing is bound to
    #[command(alias = "f")]
    Free(FreeArgs),
    /// Show this machine's outbound IPv4 address
    #[command(alias = "i")]
    Ip,
}

#[derive(Args)]
pub struct HostsArgs {
    /// Discovery strategy: ping, dns or arp
    #[arg(short, long, default_value_t = DiscoveryMode::Ping)]
    pub mode: DiscoveryMode,

    /// Network to sweep, in CIDR notation
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Per-address ping budget
    #[arg(long, default_value_t = DEFAULT_PING_TIMEOUT.as_millis() as u64)]
    pub ping_timeout_ms: u64,

    /// How long to collect ARP replies
    #[arg(long, default_value_t = DEFAULT_ARP_WINDOW.as_millis() as u64)]
    pub arp_window_ms: u64,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Host name or address to probe
    #[arg(short, long, default_value = DEFAULT_OPEN_TARGET)]
    pub target: String,

    /// Ports to probe, `start-end` or a single port
    #[arg(short, long, default_value_t = PortRange::WELL_KNOWN)]
    pub ports: PortRange,

    /// Per-port connect budget
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,
}

#[derive(Args)]
pub struct FreeArgs {
    /// Ports to check, `start-end` or a single port
    #[arg(short, long, default_value_t = PortRange::ALL)]
    pub ports: PortRange,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl HostsArgs {
    pub fn apply(&self, cfg: &mut ScanConfig) {
        cfg.discovery_mode = self.mode;
        cfg.network = self.network.clone();
        cfg.ping_timeout = Duration::from_millis(self.ping_timeout_ms);
        cfg.arp_window = Duration::from_millis(self.arp_window_ms);
    }
}

impl OpenArgs {
    pub fn apply(&self, cfg: &mut ScanConfig) {
        cfg.open_target = self.target.clone();
        cfg.open_range = self.ports;
        cfg.connect_timeout = Duration::from_millis(self.timeout_ms);
    }
}

impl FreeArgs {
    pub fn apply(&self, cfg: &mut ScanConfig) {
        cfg.free_range = self.ports;
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn hosts_defaults_match_the_stock_config() {
        let cli = CommandLine::try_parse_from(["lanscope", "hosts"]).unwrap();
        let Commands::Hosts(args) = cli.command else {
            panic!("expected the hosts subcommand");
        };
        let mut cfg = ScanConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg, ScanConfig::default());
    }

    #[test]
    fn hosts_flags_override_the_config() {
        let cli = CommandLine::try_parse_from([
            "lanscope", "-v", "d", "-m", "arp", "-n", "10.0.0.0/24", "--arp-window-ms", "500",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Hosts(args) = cli.command else {
            panic!("expected the hosts subcommand");
        };
        let mut cfg = ScanConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.discovery_mode, DiscoveryMode::Arp);
        assert_eq!(cfg.network, "10.0.0.0/24");
        assert_eq!(cfg.arp_window, Duration::from_millis(500));
    }

    #[test]
    fn port_ranges_are_parsed() {
        let cli =
            CommandLine::try_parse_from(["lanscope", "open", "-p", "20-25", "-t", "localhost"])
                .unwrap();
        let Commands::Open(args) = cli.command else {
            panic!("expected the open subcommand");
        };
        assert_eq!(args.ports, PortRange::new(20, 25).unwrap());
        assert_eq!(args.target, "localhost");
    }

    #[test]
    fn bad_port_range_is_a_usage_error() {
        assert!(CommandLine::try_parse_from(["lanscope", "free", "-p", "90-10"]).is_err());
    }
}
