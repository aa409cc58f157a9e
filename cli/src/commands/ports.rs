use std::time::Instant;

use anyhow::bail;
use colored::*;
use lanscope_common::config::ScanConfig;
use lanscope_common::models::PortRecord;
use lanscope_core::{ScanCoordinator, ScanReport, ScanRequest};

use crate::commands::scan;
use crate::terminal::{colors, print};

pub async fn open(cfg: &ScanConfig) -> anyhow::Result<()> {
    print::header("open port scan");
    print::aligned_line("Target", cfg.open_target.as_str());
    print::aligned_line("Ports", cfg.open_range.to_string());

    let label = format!("connecting to {}", cfg.open_target);
    run_and_list(cfg, ScanRequest::open_ports(cfg), &label, "No open ports found.").await
}

pub async fn free(cfg: &ScanConfig) -> anyhow::Result<()> {
    print::header("free port scan");
    print::aligned_line("Ports", cfg.free_range.to_string());

    run_and_list(
        cfg,
        ScanRequest::free_ports(cfg),
        "binding local ports",
        "No free ports found.",
    )
    .await
}

async fn run_and_list(
    cfg: &ScanConfig,
    request: ScanRequest,
    label: &str,
    empty_msg: &str,
) -> anyhow::Result<()> {
    let coordinator = ScanCoordinator::new(cfg);
    let start_time = Instant::now();
    let outcome = scan::run(&coordinator, request, label).await?;
    let ScanReport::Ports(ports) = outcome.report else {
        bail!("port scan returned host records");
    };

    if ports.is_empty() {
        print::no_results(empty_msg);
        return Ok(());
    }

    if outcome.interrupted {
        print::header("partial results");
    }
    list_ports(&ports);

    let plain = format!(
        "{} ports listed in {:.2}s",
        ports.len(),
        start_time.elapsed().as_secs_f64()
    );
    print::fat_separator();
    print::centerln(&plain, |text| text.color(colors::TEXT_DEFAULT).bold());
    Ok(())
}

fn list_ports(ports: &[PortRecord]) {
    for record in ports {
        print::found(&format!("Port {}", record.port));
    }
}
