//! # Scan Coordinator
//!
//! The single entry point for front-ends. It keeps one slot per kind of scan
//! (hosts, open ports, free ports), runs at most one job per slot, and owns the
//! cancellation token of each slot's current job.
//!
//! Every `start` installs a brand-new token. A `stop` aimed at an earlier job can
//! therefore never cancel a later one.

use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use lanscope_common::cancel::CancellationToken;
use lanscope_common::config::ScanConfig;
use lanscope_common::error::ScanError;
use lanscope_common::models::{DiscoveryMode, HostRecord, PortRecord, ScanSlot};
use lanscope_common::network::range::{NetworkRange, PortRange};
use tracing::debug;

use crate::discovery::{DiscoveryTools, HostDiscoveryJob};
use crate::job::{self, JobEvents};
use crate::ports::{PortScanMode, PortStateJob, connect};

/// What to scan. Built by the front-end, checked by [`ScanCoordinator::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRequest {
    Hosts {
        mode: DiscoveryMode,
        network: String,
    },
    OpenPorts {
        target: String,
        range: PortRange,
        timeout: Duration,
    },
    FreePorts {
        range: PortRange,
    },
}

impl ScanRequest {
    pub fn slot(&self) -> ScanSlot {
        match self {
            ScanRequest::Hosts { .. } => ScanSlot::Hosts,
            ScanRequest::OpenPorts { .. } => ScanSlot::OpenPorts,
            ScanRequest::FreePorts { .. } => ScanSlot::FreePorts,
        }
    }

    pub fn hosts(cfg: &ScanConfig) -> Self {
        ScanRequest::Hosts {
            mode: cfg.discovery_mode,
            network: cfg.network.clone(),
        }
    }

    pub fn open_ports(cfg: &ScanConfig) -> Self {
        ScanRequest::OpenPorts {
            target: cfg.open_target.clone(),
            range: cfg.open_range,
            timeout: cfg.connect_timeout,
        }
    }

    pub fn free_ports(cfg: &ScanConfig) -> Self {
        ScanRequest::FreePorts {
            range: cfg.free_range,
        }
    }
}

/// The records a finished (or cancelled) job handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanReport {
    Hosts(Vec<HostRecord>),
    Ports(Vec<PortRecord>),
}

/// A request whose inputs have been parsed and resolved.
enum Checked {
    Hosts(DiscoveryMode, NetworkRange),
    Ports(PortScanMode, PortRange),
}

fn check(request: ScanRequest) -> Result<Checked, ScanError> {
    match request {
        ScanRequest::Hosts { mode, network } => {
            Ok(Checked::Hosts(mode, NetworkRange::parse(&network)?))
        }
        ScanRequest::OpenPorts {
            target,
            range,
            timeout,
        } => {
            if timeout.is_zero() {
                return Err(ScanError::InvalidTimeout(
                    "connect timeout must be greater than zero".to_string(),
                ));
            }
            let target: IpAddr = connect::resolve_target(&target)?;
            Ok(Checked::Ports(
                PortScanMode::RemoteConnect { target, timeout },
                range,
            ))
        }
        ScanRequest::FreePorts { range } => Ok(Checked::Ports(PortScanMode::LocalBind, range)),
    }
}

#[derive(Default)]
struct Slot {
    running: Arc<AtomicBool>,
    token: Mutex<Option<CancellationToken>>,
}

impl Slot {
    fn token(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Marks a slot idle again when dropped, including when the worker unwinds.
struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ScanCoordinator {
    slots: [Slot; 3],
    tools: DiscoveryTools,
}

impl ScanCoordinator {
    /// A coordinator wired to the real system probes.
    pub fn new(cfg: &ScanConfig) -> Self {
        Self::with_tools(DiscoveryTools::from_config(cfg))
    }

    pub fn with_tools(tools: DiscoveryTools) -> Self {
        Self {
            slots: Default::default(),
            tools,
        }
    }

    /// Starts `request` on its slot's worker without waiting for the job.
    ///
    /// Invalid input is rejected before anything runs. `on_progress` and
    /// `on_complete` are called from the worker thread; `on_complete` fires
    /// exactly once, after the slot has been marked idle again.
    ///
    /// # Blocking
    ///
    /// An open-ports target given as a host name is resolved here, on the
    /// caller's thread, so `start` blocks for as long as the system resolver
    /// takes. Address literals never block. Async callers should wrap the call
    /// in `tokio::task::block_in_place` or `spawn_blocking`.
    pub fn start(
        &self,
        request: ScanRequest,
        on_progress: impl FnMut(u8) + Send + 'static,
        on_complete: impl FnOnce(ScanReport) + Send + 'static,
    ) -> Result<ScanSlot, ScanError> {
        let slot = request.slot();
        let checked = check(request)?;

        let state = &self.slots[slot.index()];
        if state
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ScanError::SlotBusy(slot));
        }
        let guard = SlotGuard(Arc::clone(&state.running));

        let token = CancellationToken::new();
        *state.token() = Some(token.clone());

        match checked {
            Checked::Hosts(mode, network) => {
                let job = HostDiscoveryJob::new(mode, network, token, self.tools.clone());
                job::spawn(
                    job,
                    JobEvents::new(on_progress, move |hosts| {
                        drop(guard);
                        on_complete(ScanReport::Hosts(hosts));
                    }),
                )?;
            }
            Checked::Ports(mode, range) => {
                let job = PortStateJob::new(mode, range, token);
                job::spawn(
                    job,
                    JobEvents::new(on_progress, move |ports| {
                        drop(guard);
                        on_complete(ScanReport::Ports(ports));
                    }),
                )?;
            }
        }

        debug!(%slot, "scan dispatched");
        Ok(slot)
    }

    /// Asks every running job to wind down. Returns without waiting.
    pub fn stop(&self) {
        for slot in ScanSlot::ALL {
            self.stop_slot(slot);
        }
    }

    pub fn stop_slot(&self, slot: ScanSlot) {
        if let Some(token) = self.slots[slot.index()].token().as_ref() {
            token.set();
        }
    }

    pub fn is_running(&self, slot: ScanSlot) -> bool {
        self.slots[slot.index()].running.load(Ordering::Acquire)
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
