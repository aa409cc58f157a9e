use anyhow::Context;
use lanscope_core::{ScanCoordinator, ScanReport, ScanRequest};
use tokio::sync::oneshot;
use tracing::{Instrument, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::progress;

/// How a scan ended from the user's point of view.
pub struct Outcome {
    pub report: ScanReport,
    pub interrupted: bool,
}

/// Starts `request`, draws its progress and waits for the records.
///
/// Ctrl-C stops the scan instead of killing the process, so whatever the job had
/// found by then is still returned.
pub async fn run(
    coordinator: &ScanCoordinator,
    request: ScanRequest,
    label: &str,
) -> anyhow::Result<Outcome> {
    let span = progress::scan_bar(label)?;
    let bar = span.clone();
    let (tx, rx) = oneshot::channel::<ScanReport>();

    // `start` may resolve a host name before it returns.
    tokio::task::block_in_place(|| {
        coordinator.start(
            request,
            move |pct| bar.pb_set_position(u64::from(pct)),
            move |report| {
                let _ = tx.send(report);
            },
        )
    })?;

    wait_for(coordinator, rx).instrument(span).await
}

async fn wait_for(
    coordinator: &ScanCoordinator,
    mut rx: oneshot::Receiver<ScanReport>,
) -> anyhow::Result<Outcome> {
    tokio::select! {
        report = &mut rx => {
            let report = report.context("scan worker exited without a result")?;
            return Ok(Outcome { report, interrupted: false });
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, stopping the scan and keeping what was found");
            coordinator.stop();
        }
    }

    let report = rx.await.context("scan worker exited without a result")?;
    Ok(Outcome {
        report,
        interrupted: true,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
