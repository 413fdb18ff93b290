use crate::domain::entities::history::MetricHistory;
use crate::domain::value_objects::thresholds::ConfigError;

/// Tunables of the synthetic telemetry source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    pub history_capacity: usize,
    pub sample_period_secs: u64,
    pub warning_chance: f64,
    pub error_chance: f64,
    pub offline_chance: f64,
    pub recovery_chance: f64,
}

impl SimulationProfile {
    pub const MAX_HISTORY_CAPACITY: usize = 10_000;
    /// One day. Keeps the backfilled history span far inside chrono's range.
    pub const MAX_SAMPLE_PERIOD_SECS: u64 = 86_400;

    /// Reject a capacity or period above the supported maximum, then
    /// normalize the rest.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HistoryCapacityOutOfRange` or
    /// `ConfigError::SamplePeriodOutOfRange`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.history_capacity > Self::MAX_HISTORY_CAPACITY {
            return Err(ConfigError::HistoryCapacityOutOfRange {
                value: self.history_capacity,
                max: Self::MAX_HISTORY_CAPACITY,
            });
        }
        if self.sample_period_secs > Self::MAX_SAMPLE_PERIOD_SECS {
            return Err(ConfigError::SamplePeriodOutOfRange {
                value: self.sample_period_secs,
                max: Self::MAX_SAMPLE_PERIOD_SECS,
            });
        }
        Ok(self.normalized())
    }

    /// Copy with every probability forced into `[0, 1]` (NaN becomes 0), and
    /// capacity and period clamped into `1..=MAX`.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn probability(p: f64) -> f64 {
            if p.is_nan() {
                0.0
            } else {
                p.clamp(0.0, 1.0)
            }
        }
        Self {
            history_capacity: self.history_capacity.clamp(1, Self::MAX_HISTORY_CAPACITY),
            sample_period_secs: self.sample_period_secs.clamp(1, Self::MAX_SAMPLE_PERIOD_SECS),
            warning_chance: probability(self.warning_chance),
            error_chance: probability(self.error_chance),
            offline_chance: probability(self.offline_chance),
            recovery_chance: probability(self.recovery_chance),
        }
    }

    #[must_use]
    pub fn sample_period(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.sample_period_secs).unwrap_or(i64::MAX))
    }
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            history_capacity: MetricHistory::DEFAULT_CAPACITY,
            sample_period_secs: 3,
            warning_chance: 0.05,
            error_chance: 0.02,
            offline_chance: 0.01,
            recovery_chance: 0.30,
        }
    }
}
