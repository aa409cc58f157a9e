//! Percent bars for running scans, drawn by `tracing-indicatif` from a span.

use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const BAR_TEMPLATE: &str = "{spinner:.blue} {msg} [{bar:40.green/black}] {pos:>3}% {elapsed:.dim}";

/// A span that shows a 0..=100 bar while it is entered.
pub fn scan_bar(label: &str) -> anyhow::Result<Span> {
    let style = ProgressStyle::with_template(BAR_TEMPLATE)?
        .progress_chars("█▓░")
        .tick_strings(&["▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"]);

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&style);
    span.pb_set_length(100);
    span.pb_set_message(label);
    Ok(span)
}
