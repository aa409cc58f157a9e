//! ICMP reachability through the platform `ping` binary.
//!
//! Raw ICMP sockets need privileges the other strategies do not, so a single echo
//! request is delegated to the system tool and only its exit status is read.

use std::io;
use std::net::Ipv4Addr;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub trait Pinger: Send + Sync {
    /// `Ok(true)` when `addr` answered within the probe budget.
    fn ping(&self, addr: Ipv4Addr) -> io::Result<bool>;
}

pub struct SystemPinger {
    timeout: Duration,
}

impl SystemPinger {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn command(&self, addr: Ipv4Addr) -> Command {
        let mut cmd = Command::new("ping");
        cmd.args(ping_args(addr, self.timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Pinger for SystemPinger {
    fn ping(&self, addr: Ipv4Addr) -> io::Result<bool> {
        let child = self.command(addr).spawn()?;
        wait_with_deadline(child, self.timeout)
    }
}

#[cfg(target_os = "windows")]
fn ping_args(addr: Ipv4Addr, timeout: Duration) -> Vec<String> {
    vec![
        "-n".into(),
        "1".into(),
        "-w".into(),
        timeout.as_millis().to_string(),
        addr.to_string(),
    ]
}

#[cfg(target_os = "macos")]
fn ping_args(addr: Ipv4Addr, timeout: Duration) -> Vec<String> {
    vec![
        "-c".into(),
        "1".into(),
        "-W".into(),
        timeout.as_millis().to_string(),
        addr.to_string(),
    ]
}

// iputils and busybox only take whole seconds; the deadline below enforces the rest.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn ping_args(addr: Ipv4Addr, timeout: Duration) -> Vec<String> {
    let secs = timeout.as_secs().max(1);
    vec![
        "-c".into(),
        "1".into(),
        "-W".into(),
        secs.to_string(),
        addr.to_string(),
    ]
}

/// Waits for `child` to exit, killing it once `timeout` has elapsed.
fn wait_with_deadline(mut child: Child, timeout: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status.success());
        }
        if Instant::now() >= deadline {
            // The child may have exited between the two calls.
            let _ = child.kill();
            let _ = child.wait();
            return Ok(false);
        }
        thread::sleep(POLL_INTERVAL);
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
