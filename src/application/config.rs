use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::simulation::{SimulationProfile, MAX_FLEET_SIZE};
use crate::domain::value_objects::thresholds::{ConfigError, ThresholdConfig};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// General settings: tick period, fleet size, optional RNG seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_tick")]
    pub tick_secs: u64,
    #[serde(default = "default_fleet_size")]
    pub fleet_size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Operator alerting thresholds, validated into a [`ThresholdConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_cpu_percent")]
    pub cpu_percent: f64,
    #[serde(default = "default_ram_percent")]
    pub ram_percent: f64,
    #[serde(default = "default_sustain")]
    pub sustain_secs: i64,
}

/// Synthetic telemetry tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_warning_chance")]
    pub warning_chance: f64,
    #[serde(default = "default_error_chance")]
    pub error_chance: f64,
    #[serde(default = "default_offline_chance")]
    pub offline_chance: f64,
    #[serde(default = "default_recovery_chance")]
    pub recovery_chance: f64,
}

/// Fleet summary provider settings (digest or noop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_summary_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,
    #[serde(default = "default_quota_cooldown")]
    pub quota_cooldown_secs: u64,
}

/// Notification channels: terminal, log file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub terminal: bool,
    #[serde(default)]
    pub log_file: Option<String>,
}

// --- Defaults ---

const fn default_tick() -> u64 {
    3
}

const fn default_fleet_size() -> usize {
    12
}

const fn default_cpu_percent() -> f64 {
    80.0
}

const fn default_ram_percent() -> f64 {
    85.0
}

const fn default_sustain() -> i64 {
    30
}

const fn default_history_capacity() -> usize {
    20
}

const fn default_warning_chance() -> f64 {
    0.05
}

const fn default_error_chance() -> f64 {
    0.02
}

const fn default_offline_chance() -> f64 {
    0.01
}

const fn default_recovery_chance() -> f64 {
    0.30
}

const fn default_true() -> bool {
    true
}

fn default_provider() -> String {
    "digest".into()
}

const fn default_summary_interval() -> u64 {
    60
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_backoff_base() -> u64 {
    500
}

const fn default_quota_cooldown() -> u64 {
    300
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick(),
            fleet_size: default_fleet_size(),
            seed: None,
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            cpu_percent: default_cpu_percent(),
            ram_percent: default_ram_percent(),
            sustain_secs: default_sustain(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            warning_chance: default_warning_chance(),
            error_chance: default_error_chance(),
            offline_chance: default_offline_chance(),
            recovery_chance: default_recovery_chance(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            provider: default_provider(),
            interval_secs: default_summary_interval(),
            max_retries: default_max_retries(),
            backoff_base_ms: default_backoff_base(),
            quota_cooldown_secs: default_quota_cooldown(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            terminal: default_true(),
            log_file: None,
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Default config location: `<config_dir>/fleetwatch/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("fleetwatch").join("config.toml"))
    }

    /// Simulation profile with the sampling period taken from `general.tick_secs`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `general.tick_secs` or
    /// `simulation.history_capacity` exceeds what the simulator supports.
    pub fn simulation_profile(&self) -> Result<SimulationProfile, ConfigError> {
        SimulationProfile {
            history_capacity: self.simulation.history_capacity,
            sample_period_secs: self.general.tick_secs,
            warning_chance: self.simulation.warning_chance,
            error_chance: self.simulation.error_chance,
            offline_chance: self.simulation.offline_chance,
            recovery_chance: self.simulation.recovery_chance,
        }
        .validated()
    }

    /// # Errors
    ///
    /// Returns `ConfigError::FleetTooLarge` above [`MAX_FLEET_SIZE`] devices.
    pub fn fleet_size(&self) -> Result<usize, ConfigError> {
        let value = self.general.fleet_size;
        if value > MAX_FLEET_SIZE {
            return Err(ConfigError::FleetTooLarge {
                value,
                max: MAX_FLEET_SIZE,
            });
        }
        Ok(value)
    }
}

impl TryFrom<&ThresholdSettings> for ThresholdConfig {
    type Error = ConfigError;

    fn try_from(settings: &ThresholdSettings) -> Result<Self, Self::Error> {
        Self::new(
            settings.cpu_percent,
            settings.ram_percent,
            settings.sustain_secs,
        )
    }
}
