use serde::{Deserialize, Serialize};

use crate::domain::entities::sample::MetricSample;

use super::thresholds::{ThresholdConfig, ThresholdPct};

/// Resource dimension watched by the sustained-threshold rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Ram,
}

impl MetricKind {
    pub const ALL: [Self; 2] = [Self::Cpu, Self::Ram];

    /// Reads this dimension out of a sample.
    #[must_use]
    pub fn value_of(self, sample: &MetricSample) -> f64 {
        match self {
            Self::Cpu => sample.cpu,
            Self::Ram => sample.ram,
        }
    }

    /// The threshold currently configured for this dimension.
    #[must_use]
    pub const fn threshold_in(self, config: &ThresholdConfig) -> ThresholdPct {
        match self {
            Self::Cpu => config.cpu_threshold(),
            Self::Ram => config.ram_threshold(),
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Ram => "ram",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "CPU"),
            Self::Ram => write!(f, "RAM"),
        }
    }
}
