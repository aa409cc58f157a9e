use std::io;
use std::time::Duration;

use anyhow::{Context, bail};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};

const READ_TIMEOUT: Duration = Duration::from_millis(50);

pub type EthernetPair = (Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>);

/// Access to the machine's link layer: which interfaces exist and how to open one.
pub trait LinkLayer: Send + Sync {
    fn interfaces(&self) -> Vec<NetworkInterface>;
    fn open(&self, intf: &NetworkInterface, cfg: Config) -> io::Result<Channel>;
}

/// The real link layer, backed by `pnet`.
pub struct SystemLink;

impl LinkLayer for SystemLink {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        datalink::interfaces()
    }

    fn open(&self, intf: &NetworkInterface, cfg: Config) -> io::Result<Channel> {
        datalink::channel(intf, cfg)
    }
}

/// Reads return after [`READ_TIMEOUT`] so callers can watch a deadline.
pub fn get_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

pub fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> anyhow::Result<EthernetPair>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let ch: Channel =
        channel_opener(intf, *cfg).with_context(|| format!("opening on {}", intf.name))?;
    match ch {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => bail!("non-ethernet channel for {}", intf.name),
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
