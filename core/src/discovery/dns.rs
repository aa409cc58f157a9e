//! Reverse (PTR) lookups through the system resolver configuration.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::Resolver;
use hickory_resolver::error::ResolveErrorKind;
use tracing::{debug, trace, warn};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(1);
const LOOKUP_ATTEMPTS: usize = 1;

pub trait ReverseResolver {
    /// The name `addr` resolves back to, without the trailing root dot.
    fn reverse(&self, addr: Ipv4Addr) -> Option<String>;
}

/// Builds a resolver for one job.
///
/// The system resolver owns an async runtime internally, so it has to be created
/// and dropped on the worker thread rather than shared with the caller.
pub type ResolverFactory = Arc<dyn Fn() -> Box<dyn ReverseResolver> + Send + Sync>;

pub struct SystemResolver {
    inner: Option<Resolver>,
}

impl SystemResolver {
    /// Reads `/etc/resolv.conf` (or the platform equivalent) and the hosts file.
    ///
    /// A machine without resolver configuration gets a resolver that never finds
    /// a name, which is the same outcome as every lookup failing.
    pub fn from_system_conf() -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                warn!("no usable resolver configuration, reverse lookups disabled: {e}");
                return Self { inner: None };
            }
        };
        opts.timeout = LOOKUP_TIMEOUT;
        opts.attempts = LOOKUP_ATTEMPTS;

        match Resolver::new(config, opts) {
            Ok(resolver) => Self {
                inner: Some(resolver),
            },
            Err(e) => {
                warn!("failed to start resolver, reverse lookups disabled: {e}");
                Self { inner: None }
            }
        }
    }

    pub fn factory() -> ResolverFactory {
        Arc::new(|| Box::new(SystemResolver::from_system_conf()) as Box<dyn ReverseResolver>)
    }
}

impl ReverseResolver for SystemResolver {
    fn reverse(&self, addr: Ipv4Addr) -> Option<String> {
        let resolver = self.inner.as_ref()?;
        match resolver.reverse_lookup(IpAddr::V4(addr)) {
            Ok(lookup) => lookup
                .iter()
                .next()
                .map(|name| trim_root(&name.to_string()))
                .filter(|name| !name.is_empty()),
            Err(e) => {
                match e.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => trace!(%addr, "no PTR record"),
                    _ => debug!(%addr, error = %e, "reverse lookup failed"),
                }
                None
            }
        }
    }
}

fn trim_root(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
