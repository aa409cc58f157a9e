use std::net::{IpAddr, UdpSocket};

use anyhow::Context;

use crate::terminal::print;

/// Any routable address works; connecting a UDP socket only picks a route.
const ROUTE_PROBE: &str = "8.8.8.8:80";

/// The local address the OS would use for outbound traffic. No packet is sent.
pub fn outbound_ipv4() -> anyhow::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").context("binding a UDP socket")?;
    socket
        .connect(ROUTE_PROBE)
        .context("no route to the public internet")?;
    Ok(socket.local_addr()?.ip())
}

pub fn ip() -> anyhow::Result<()> {
    print::header("local address");
    let addr = outbound_ipv4()?;
    print::aligned_line("IPv4", addr.to_string());
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
