use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::application::services::{MonitorService, MonitorSettings};
use crate::domain::entities::snapshot::FleetSnapshot;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::random::RandomSource;
use crate::infrastructure::clock::ManualClock;
use crate::infrastructure::summarizers::digest::DigestSummarizer;
use crate::presentation::cli::formatters::alert_fmt::{print_alerts, print_summary};
use crate::presentation::cli::formatters::status_fmt::print_section_header;
use crate::presentation::cli::formatters::table_fmt::format_device_table;

/// Run `ticks` ticks on a manual clock that starts at `start` and advances one
/// sample period before every tick.
///
/// # Errors
///
/// Returns an error if a tick fails.
pub fn simulate(
    settings: MonitorSettings,
    ticks: u64,
    start: DateTime<Utc>,
    rng: Box<dyn RandomSource>,
    notifier: Arc<dyn Notifier>,
) -> Result<FleetSnapshot> {
    let clock = Arc::new(ManualClock::new(start));
    let monitor = MonitorService::new(settings, clock.clone(), rng, notifier);
    let period = monitor.profile().sample_period();

    for _ in 0..ticks {
        clock.advance(period);
        monitor.run_once()?;
    }

    monitor.snapshot()
}

/// Entry point of the `simulate` command.
///
/// # Errors
///
/// Returns an error if the simulation fails or the snapshot cannot be
/// serialized.
pub fn run_simulate(
    settings: MonitorSettings,
    ticks: u64,
    json: bool,
    rng: Box<dyn RandomSource>,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    let snapshot = simulate(settings, ticks, Utc::now(), rng, notifier)?;

    if json {
        let output =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{output}");
        return Ok(());
    }

    println!();
    print_section_header(&format!(
        "Fleet after {} tick(s) · {}",
        snapshot.tick,
        snapshot.taken_at.format("%H:%M:%S")
    ));
    println!("{}", format_device_table(&snapshot.devices, &snapshot.thresholds));

    print_alerts(&snapshot.active_alerts);

    if let Some(summary) = DigestSummarizer::default().digest(&snapshot) {
        print_section_header("Summary");
        print_summary(&summary);
    }
    println!(
        "{}",
        format!(
            "thresholds: CPU {} · RAM {} · sustained {}s",
            snapshot.thresholds.cpu_threshold(),
            snapshot.thresholds.ram_threshold(),
            snapshot.thresholds.sustain_secs()
        )
        .dimmed()
    );

    Ok(())
}
