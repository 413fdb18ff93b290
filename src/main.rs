use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fleetwatch::application::config::AppConfig;
use fleetwatch::application::services::{MonitorService, RetryPolicy, SummaryService};
use fleetwatch::domain::ports::clock::Clock;
use fleetwatch::domain::ports::notifier::Notifier;
use fleetwatch::infrastructure::clock::SystemClock;
use fleetwatch::infrastructure::notifications::create_notifier;
use fleetwatch::infrastructure::random::RngSource;
use fleetwatch::infrastructure::summarizers::create_summarizer;
use fleetwatch::presentation::cli::app::{Cli, Commands};
use fleetwatch::presentation::cli::commands::config::run_config;
use fleetwatch::presentation::cli::commands::run::{run_monitor, summary_loop};
use fleetwatch::presentation::cli::commands::simulate::run_simulate;
use fleetwatch::presentation::cli::commands::{apply_overrides, monitor_settings};
use fleetwatch::presentation::tui::app::run_tui;

fn print_banner(config: &AppConfig) {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  FLEETWATCH · Device Fleet Monitor".bold().cyan());
    println!(
        "{}",
        format!(
            "  {} devices · tick {}s · CPU>{}% RAM>{}% for {}s",
            config.general.fleet_size,
            config.general.tick_secs.max(1),
            config.thresholds.cpu_percent,
            config.thresholds.ram_percent,
            config.thresholds.sustain_secs
        )
        .dimmed()
    );
    println!("{}", "━".repeat(40).cyan());
}

/// `RUST_LOG` wins when set. The dashboard routes logs to a sink so they
/// never draw over the alternate screen.
fn setup_tracing(verbose: bool, interactive: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if interactive {
        builder.with_writer(io::sink).init();
    } else {
        builder.init();
    }
}

/// Config file in use: `--config` when given, the default location otherwise.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<(AppConfig, Option<PathBuf>)> {
    if let Some(path) = path {
        Ok((AppConfig::load_from(path)?, Some(path.clone())))
    } else {
        let config = AppConfig::load()?;
        Ok((config, AppConfig::config_path().ok()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Some(Commands::Watch { .. }));
    setup_tracing(cli.verbose, interactive);

    // Load configuration, then fold in command-line overrides
    let (mut config, source) = load_config(cli.config.as_ref())?;
    if let Some(overrides) = cli.command.as_ref().and_then(Commands::overrides) {
        apply_overrides(&mut config, overrides);
    }

    if let Some(Commands::Config) = cli.command {
        return run_config(&config, source.as_deref());
    }

    // Manual DI: main.rs is the only place that knows concrete types
    let settings = monitor_settings(&config)?;
    let notifier: Arc<dyn Notifier> = Arc::new(create_notifier(
        &config.notifications,
        interactive || matches!(cli.command, Some(Commands::Simulate { json: true, .. })),
    ));
    let rng = Box::new(RngSource::from_optional_seed(config.general.seed));

    if let Some(Commands::Simulate { ticks, json, .. }) = cli.command {
        return run_simulate(settings, ticks, json, rng, notifier);
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let monitor = Arc::new(MonitorService::new(
        settings,
        Arc::clone(&clock),
        rng,
        Arc::clone(&notifier),
    ));
    let summary = config.summary.enabled.then(|| {
        Arc::new(SummaryService::new(
            Arc::clone(&monitor),
            create_summarizer(&config.summary),
            Arc::clone(&notifier),
            Arc::clone(&clock),
            RetryPolicy::from(&config.summary),
        ))
    });
    let tick_period = Duration::from_secs(monitor.profile().sample_period_secs);
    let summary_period = Duration::from_secs(config.summary.interval_secs.max(1));

    if interactive {
        let background = summary.as_ref().map(|service| {
            let service = Arc::clone(service);
            tokio::spawn(async move { summary_loop(&service, summary_period).await })
        });
        let result = run_tui(&monitor, summary.as_deref());
        if let Some(handle) = background {
            handle.abort();
        }
        return result;
    }

    print_banner(&config);
    run_monitor(&monitor, summary.as_deref(), tick_period, summary_period).await
}
