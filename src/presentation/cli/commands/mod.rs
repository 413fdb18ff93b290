pub mod config;
pub mod run;
pub mod simulate;

use anyhow::{Context, Result};

use crate::application::config::AppConfig;
use crate::application::services::MonitorSettings;
use crate::domain::value_objects::thresholds::ThresholdConfig;
use crate::presentation::cli::app::FleetOverrides;

/// Folds command-line overrides into the loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, overrides: &FleetOverrides) {
    if let Some(devices) = overrides.devices {
        config.general.fleet_size = devices;
    }
    if let Some(cpu) = overrides.cpu {
        config.thresholds.cpu_percent = cpu;
    }
    if let Some(ram) = overrides.ram {
        config.thresholds.ram_percent = ram;
    }
    if let Some(sustain) = overrides.sustain {
        config.thresholds.sustain_secs = sustain;
    }
    if overrides.seed.is_some() {
        config.general.seed = overrides.seed;
    }
}

/// Validated monitor settings for the effective configuration.
///
/// # Errors
///
/// Returns an error if the thresholds, fleet size, tick period or history
/// capacity are out of range.
pub fn monitor_settings(config: &AppConfig) -> Result<MonitorSettings> {
    let thresholds = ThresholdConfig::try_from(&config.thresholds)
        .context("Invalid [thresholds] configuration")?;
    let fleet_size = config
        .fleet_size()
        .context("Invalid [general] configuration")?;
    let profile = config
        .simulation_profile()
        .context("Invalid [general]/[simulation] configuration")?;
    Ok(MonitorSettings {
        fleet_size,
        thresholds,
        profile,
    })
}
