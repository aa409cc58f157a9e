use std::time::{Duration, Instant};

use anyhow::bail;
use colored::*;
use lanscope_common::config::ScanConfig;
use lanscope_common::models::HostRecord;
use lanscope_core::{ScanCoordinator, ScanReport, ScanRequest};

use crate::commands::scan;
use crate::terminal::{colors, format, print};

pub async fn hosts(cfg: &ScanConfig) -> anyhow::Result<()> {
    print::header("host discovery");
    print::aligned_line("Network", cfg.network.as_str());
    print::aligned_line("Strategy", cfg.discovery_mode.to_string());

    let coordinator = ScanCoordinator::new(cfg);
    let label = format!("{} sweep of {}", cfg.discovery_mode, cfg.network);

    let start_time: Instant = Instant::now();
    let outcome = scan::run(&coordinator, ScanRequest::hosts(cfg), &label).await?;
    let ScanReport::Hosts(hosts) = outcome.report else {
        bail!("host discovery returned port records");
    };

    discovery_ends(&hosts, start_time.elapsed(), outcome.interrupted);
    Ok(())
}

fn discovery_ends(hosts: &[HostRecord], total_time: Duration, interrupted: bool) {
    if hosts.is_empty() {
        print::header("zero hosts detected");
        print::no_results("No hosts found.");
        return;
    }

    print::header(if interrupted { "partial discovery" } else { "network discovery" });
    for (idx, host) in hosts.iter().enumerate() {
        print_host_tree(host, idx);
    }
    print_summary(hosts.len(), total_time);
}

fn print_host_tree(host: &HostRecord, idx: usize) {
    print::tree_head(idx, &format::host_heading(host));
    print::as_tree_one_level(format::host_details(host));
}

fn print_summary(hosts_len: usize, total_time: Duration) {
    let plain = format!(
        "Discovery Complete: {hosts_len} active hosts identified in {:.2}s",
        total_time.as_secs_f64()
    );
    print::fat_separator();
    print::centerln(&plain, |text| text.color(colors::TEXT_DEFAULT).bold());
}
