use super::window;
use super::Rule;
use crate::domain::entities::alert::{AlertCondition, ConditionKey};
use crate::domain::entities::device::Device;
use crate::domain::value_objects::metric_kind::MetricKind;
use crate::domain::value_objects::thresholds::ThresholdConfig;

/// Fires when every sample in the trailing window is strictly above the
/// configured threshold for its metric.
pub struct SustainedThresholdRule {
    metric: MetricKind,
}

impl SustainedThresholdRule {
    #[must_use]
    pub const fn new(metric: MetricKind) -> Self {
        Self { metric }
    }

    #[must_use]
    pub const fn cpu() -> Self {
        Self::new(MetricKind::Cpu)
    }

    #[must_use]
    pub const fn ram() -> Self {
        Self::new(MetricKind::Ram)
    }
}

impl Rule for SustainedThresholdRule {
    fn name(&self) -> &'static str {
        match self.metric {
            MetricKind::Cpu => "cpu_sustained",
            MetricKind::Ram => "ram_sustained",
        }
    }

    fn evaluate(
        &self,
        device: &Device,
        config: &ThresholdConfig,
        points_needed: usize,
    ) -> Option<AlertCondition> {
        let threshold = self.metric.threshold_in(config);
        let observed = window::sustained_above(
            &device.history,
            self.metric,
            threshold.value(),
            points_needed,
        )?;
        let key = ConditionKey::new(device.id, self.metric, config);
        Some(AlertCondition::new(key, device.name.clone(), observed))
    }
}
