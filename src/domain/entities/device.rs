use chrono::{DateTime, Utc};
use serde::Serialize;

use super::history::MetricHistory;
use super::sample::MetricSample;
use crate::domain::value_objects::device_kind::DeviceKind;
use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::metric_kind::MetricKind;

/// Stable device identifier, assigned once at fleet creation and never reused.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dev-{:03}", self.0)
    }
}

/// A monitored device and its retained telemetry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    pub location: String,
    pub address: String,
    pub history: MetricHistory,
    pub last_update: DateTime<Utc>,
}

impl Device {
    #[must_use]
    pub fn latest(&self) -> Option<&MetricSample> {
        self.history.latest()
    }

    /// Most recent value of one dimension, if any sample exists.
    #[must_use]
    pub fn latest_value(&self, metric: MetricKind) -> Option<f64> {
        self.latest().map(|s| metric.value_of(s))
    }
}
