//! # Scan Jobs
//!
//! A job is one scan run: it walks its units on a dedicated worker thread, reports
//! a percentage after every unit and hands its records to a completion callback
//! exactly once, whether it ran to the end or saw the cancellation token.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use lanscope_common::cancel::CancellationToken;
use lanscope_common::progress::Progress;
use tracing::{debug, info, info_span, warn};

/// Called with the current percentage, from the worker thread.
pub type ProgressFn = Box<dyn FnMut(u8) + Send>;
/// Called once with the final records, from the worker thread.
pub type CompletionFn<R> = Box<dyn FnOnce(Vec<R>) + Send>;

/// A unit of scan work that can be moved onto a worker and run to completion.
pub trait ScanJob: Send + 'static {
    type Record: Send + 'static;

    /// Short label used for the worker thread and log span.
    fn name(&self) -> &'static str;

    /// Runs the scan on the current thread.
    fn run(self, progress: &mut dyn FnMut(u8)) -> Vec<Self::Record>;
}

pub struct JobEvents<R> {
    on_progress: ProgressFn,
    on_complete: CompletionFn<R>,
}

impl<R> JobEvents<R> {
    pub fn new(
        on_progress: impl FnMut(u8) + Send + 'static,
        on_complete: impl FnOnce(Vec<R>) + Send + 'static,
    ) -> Self {
        Self {
            on_progress: Box::new(on_progress),
            on_complete: Box::new(on_complete),
        }
    }
}

/// Moves `job` onto its own named thread.
///
/// The completion callback fires exactly once when the job returns. If the thread
/// cannot be created, nothing runs and both callbacks are dropped.
pub fn spawn<J: ScanJob>(job: J, events: JobEvents<J::Record>) -> io::Result<JoinHandle<()>> {
    let name = job.name();
    let JobEvents {
        mut on_progress,
        on_complete,
    } = events;

    thread::Builder::new()
        .name(format!("scan-{name}"))
        .spawn(move || {
            let span = info_span!("job", kind = name);
            let _guard = span.enter();

            let started = Instant::now();
            info!("scan started");
            let records = job.run(&mut *on_progress);
            info!(
                found = records.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "scan finished"
            );

            on_complete(records);
        })
}

/// How a single probe turned out.
#[derive(Debug)]
pub(crate) enum Verdict<R> {
    Hit(R),
    Miss,
    /// Something other than the expected negative outcomes went wrong.
    Fault(io::Error),
}

/// Walks `units` in order, checking `token` before each one.
///
/// Faults are logged and counted as misses; they never stop the sweep.
pub(crate) fn sweep<U, R>(
    units: impl IntoIterator<Item = U>,
    total: u64,
    token: &CancellationToken,
    progress: &mut dyn FnMut(u8),
    mut probe: impl FnMut(&U) -> Verdict<R>,
) -> Vec<R>
where
    U: std::fmt::Display,
{
    let mut found: Vec<R> = Vec::new();
    let mut tracker = Progress::new(total);
    let mut faults: usize = 0;

    if total == 0 {
        progress(100);
        return found;
    }

    for (idx, unit) in units.into_iter().enumerate() {
        if token.is_set() {
            debug!(processed = idx, total, "cancellation observed");
            break;
        }

        match probe(&unit) {
            Verdict::Hit(record) => found.push(record),
            Verdict::Miss => {}
            Verdict::Fault(e) => {
                faults += 1;
                debug!(%unit, error = %e, "probe fault");
            }
        }

        progress(tracker.advance(idx as u64 + 1));
    }

    if faults > 0 {
        warn!(faults, "some probes failed unexpectedly and were counted as negative");
    }

    found
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
