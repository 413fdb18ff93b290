use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::metric_kind::MetricKind;

/// Rejected operator configuration. The previous configuration stays in effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{metric} threshold must be a percentage within 0..=100, got {value}")]
    ThresholdOutOfRange { metric: MetricKind, value: f64 },
    #[error("sustain duration must be a positive number of seconds, got {0}")]
    NonPositiveSustain(i64),
    #[error("history capacity must be at most {max} samples, got {value}")]
    HistoryCapacityOutOfRange { value: usize, max: usize },
    #[error("sample period must be at most {max} seconds, got {value}")]
    SamplePeriodOutOfRange { value: u64, max: u64 },
    #[error("fleet size must be at most {max} devices, got {value}")]
    FleetTooLarge { value: usize, max: usize },
}

/// A validated utilization threshold in `[0, 100]`.
///
/// Compared, hashed and ordered by value so that it can take part in an
/// alert condition's identity. `-0.0` is normalised to `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdPct(f64);

impl ThresholdPct {
    /// # Errors
    ///
    /// Returns `ConfigError::ThresholdOutOfRange` for non-finite values or
    /// values outside `[0, 100]`.
    pub fn new(metric: MetricKind, value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            // `0.0 == -0.0`, so this also folds the negative zero
            Ok(Self(if value == 0.0 { 0.0 } else { value }))
        } else {
            Err(ConfigError::ThresholdOutOfRange { metric, value })
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for ThresholdPct {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for ThresholdPct {}

impl Hash for ThresholdPct {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for ThresholdPct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThresholdPct {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Serialize for ThresholdPct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl std::fmt::Display for ThresholdPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Operator-owned alerting parameters, read by the rule engine each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdConfig {
    cpu_threshold: ThresholdPct,
    ram_threshold: ThresholdPct,
    sustain_secs: u64,
}

impl ThresholdConfig {
    /// Validate and build a configuration. Values are never clamped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a threshold lies outside `[0, 100]` or the
    /// sustain duration is not positive.
    pub fn new(cpu_percent: f64, ram_percent: f64, sustain_secs: i64) -> Result<Self, ConfigError> {
        let cpu_threshold = ThresholdPct::new(MetricKind::Cpu, cpu_percent)?;
        let ram_threshold = ThresholdPct::new(MetricKind::Ram, ram_percent)?;
        let sustain_secs = u64::try_from(sustain_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::NonPositiveSustain(sustain_secs))?;
        Ok(Self {
            cpu_threshold,
            ram_threshold,
            sustain_secs,
        })
    }

    #[must_use]
    pub const fn cpu_threshold(&self) -> ThresholdPct {
        self.cpu_threshold
    }

    #[must_use]
    pub const fn ram_threshold(&self) -> ThresholdPct {
        self.ram_threshold
    }

    #[must_use]
    pub const fn sustain_secs(&self) -> u64 {
        self.sustain_secs
    }

    /// Copy of this configuration with a new CPU threshold.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ThresholdOutOfRange` for an invalid percentage.
    pub fn with_cpu(self, percent: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            cpu_threshold: ThresholdPct::new(MetricKind::Cpu, percent)?,
            ..self
        })
    }

    /// Copy of this configuration with a new RAM threshold.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ThresholdOutOfRange` for an invalid percentage.
    pub fn with_ram(self, percent: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ram_threshold: ThresholdPct::new(MetricKind::Ram, percent)?,
            ..self
        })
    }

    /// Copy of this configuration with a new sustain duration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPositiveSustain` when `secs <= 0`.
    pub fn with_sustain(self, secs: i64) -> Result<Self, ConfigError> {
        Self::new(self.cpu_threshold.value(), self.ram_threshold.value(), secs)
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_threshold: ThresholdPct(80.0),
            ram_threshold: ThresholdPct(85.0),
            sustain_secs: 30,
        }
    }
}
