use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;

use crate::application::services::{MonitorService, SummaryOutcome, SummaryService};

/// Run the monitor until Ctrl+C.
///
/// Ticks the fleet every `tick_period`. When a summary service is given it
/// runs on its own `summary_period` timer, polled alongside the tick loop, so
/// a slow or retrying summarizer never delays a tick.
///
/// # Errors
///
/// Returns an error if the shutdown signal handler cannot be installed.
pub async fn run_monitor(
    monitor: &MonitorService,
    summary: Option<&SummaryService>,
    tick_period: Duration,
    summary_period: Duration,
) -> Result<()> {
    tracing::info!(
        tick_secs = tick_period.as_secs(),
        summaries = summary.is_some(),
        "monitor started"
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let summaries = async {
        match summary {
            Some(service) => summary_loop(service, summary_period).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        () = tick_loop(monitor, tick_period) => {}
        () = summaries => {}
        result = &mut shutdown => {
            result?;
            tracing::info!("Shutdown signal received, stopping monitor");
            println!("\nFleetwatch stopped.");
        }
    }

    Ok(())
}

/// Tick every `period`, starting one period from now: the seeded history
/// already ends with a sample stamped at startup.
async fn tick_loop(monitor: &MonitorService, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;

    loop {
        interval.tick().await;
        if let Err(e) = monitor.run_once() {
            tracing::error!("Tick failed: {e}");
        }
    }
}

/// Request a summary every `period`, starting one period from now.
pub async fn summary_loop(service: &SummaryService, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // first tick completes immediately; wait a full period before summarizing
    interval.tick().await;

    loop {
        interval.tick().await;
        match service.run_once().await {
            SummaryOutcome::Published(summary) => {
                tracing::info!(provider = %summary.provider, "{}", summary.headline);
            }
            SummaryOutcome::Empty => tracing::debug!("summarizer had nothing to report"),
            SummaryOutcome::CoolingDown { until } => {
                tracing::debug!(%until, "summary skipped");
            }
            SummaryOutcome::Failed(reason) => tracing::debug!("summary cycle failed: {reason}"),
        }
    }
}
