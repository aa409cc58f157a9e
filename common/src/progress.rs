/// Percentage tracker for a job walking `total` units.
///
/// Values are `floor(done / total * 100)` and never go backwards. A job with no
/// units counts against a denominator of one, so it can only report 0 or 100.
#[derive(Debug, Clone)]
pub struct Progress {
    total: u64,
    last: u8,
}

impl Progress {
    pub fn new(total: u64) -> Self {
        Self {
            total: total.max(1),
            last: 0,
        }
    }

    /// Records that `done` units (1-based) have completed and returns the percentage.
    pub fn advance(&mut self, done: u64) -> u8 {
        let done = done.min(self.total);
        let percent = (u128::from(done) * 100 / u128::from(self.total)) as u8;
        self.last = self.last.max(percent);
        self.last
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
