use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;

/// Clamp a utilization value into `[0, 100]`. `NaN` collapses to the lower bound.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        MIN_PERCENT
    } else {
        value.clamp(MIN_PERCENT, MAX_PERCENT)
    }
}

/// One utilization reading of a device, every dimension in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub cpu: f64,
    pub ram: f64,
    pub disk: f64,
    pub network: f64,
}

impl MetricSample {
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, cpu: f64, ram: f64, disk: f64, network: f64) -> Self {
        Self {
            timestamp,
            cpu,
            ram,
            disk,
            network,
        }
    }

    /// `true` when every dimension lies within `[0, 100]`.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        [self.cpu, self.ram, self.disk, self.network]
            .iter()
            .all(|v| (MIN_PERCENT..=MAX_PERCENT).contains(v))
    }
}
