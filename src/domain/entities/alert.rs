use chrono::{DateTime, Utc};
use serde::Serialize;

use super::device::DeviceId;
use crate::domain::value_objects::metric_kind::MetricKind;
use crate::domain::value_objects::thresholds::{ThresholdConfig, ThresholdPct};

/// Identity of an alert condition.
///
/// Two breaches of the same device and metric under the same threshold and
/// sustain duration share a key. Changing either parameter yields a new key,
/// so a dismissal never carries over to a differently-configured condition.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionKey {
    pub device_id: DeviceId,
    pub metric: MetricKind,
    pub threshold: ThresholdPct,
    pub sustain_secs: u64,
}

impl ConditionKey {
    /// Key for `metric` on `device_id` under the configuration in effect.
    #[must_use]
    pub const fn new(device_id: DeviceId, metric: MetricKind, config: &ThresholdConfig) -> Self {
        Self {
            device_id,
            metric,
            threshold: metric.threshold_in(config),
            sustain_secs: config.sustain_secs(),
        }
    }
}

impl std::fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}>{}@{}s",
            self.device_id,
            self.metric.slug(),
            self.threshold,
            self.sustain_secs
        )
    }
}

/// A condition that currently qualifies, as produced by the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCondition {
    key: ConditionKey,
    device_name: String,
    observed_value: f64,
}

impl AlertCondition {
    #[must_use]
    pub const fn new(key: ConditionKey, device_name: String, observed_value: f64) -> Self {
        Self {
            key,
            device_name,
            observed_value,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &ConditionKey {
        &self.key
    }

    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Value of the most recent sample in the qualifying window.
    #[must_use]
    pub const fn observed_value(&self) -> f64 {
        self.observed_value
    }
}

/// An active alert. Immutable once raised; it only ever leaves the active set
/// through dismissal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub key: ConditionKey,
    pub device_id: DeviceId,
    pub device_name: String,
    pub metric: MetricKind,
    pub observed_value: f64,
    pub threshold: ThresholdPct,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    #[must_use]
    pub fn raise(condition: &AlertCondition, now: DateTime<Utc>) -> Self {
        let key = condition.key;
        Self {
            key,
            device_id: key.device_id,
            device_name: condition.device_name.clone(),
            metric: key.metric,
            observed_value: condition.observed_value,
            threshold: key.threshold,
            raised_at: now,
        }
    }

    /// One-line human description.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} {} at {:.1}% (threshold {} sustained {}s)",
            self.device_name, self.metric, self.observed_value, self.threshold, self.key.sustain_secs
        )
    }
}
