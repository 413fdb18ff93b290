pub mod sustained;
pub mod window;

use crate::domain::entities::alert::AlertCondition;
use crate::domain::entities::device::Device;
use crate::domain::lifecycle::DismissalSet;
use crate::domain::value_objects::thresholds::ThresholdConfig;

pub use sustained::SustainedThresholdRule;

/// A deterministic rule evaluated against one device's retained history.
/// Rules are pure functions: device + thresholds in, condition out. No I/O.
pub trait Rule: Send + Sync {
    /// Returns the unique name of this rule
    fn name(&self) -> &'static str;

    /// Evaluates the rule over the trailing `points_needed` samples of `device`
    fn evaluate(
        &self,
        device: &Device,
        config: &ThresholdConfig,
        points_needed: usize,
    ) -> Option<AlertCondition>;
}

/// Returns the default sustained CPU and RAM rules, CPU first
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SustainedThresholdRule::cpu()),
        Box::new(SustainedThresholdRule::ram()),
    ]
}

/// Engine that runs a collection of rules against every device
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
    sample_period_secs: u64,
}

impl RuleEngine {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>, sample_period_secs: u64) -> Self {
        Self {
            rules,
            sample_period_secs: sample_period_secs.max(1),
        }
    }

    #[must_use]
    pub const fn sample_period_secs(&self) -> u64 {
        self.sample_period_secs
    }

    /// Samples required to cover the configured sustain duration.
    #[must_use]
    pub fn points_needed(&self, config: &ThresholdConfig) -> usize {
        window::points_needed(config.sustain_secs(), self.sample_period_secs)
    }

    /// Currently-qualifying conditions whose key has not been dismissed, in
    /// device order and rule order within a device.
    #[must_use]
    pub fn evaluate(
        &self,
        devices: &[Device],
        config: &ThresholdConfig,
        dismissed: &DismissalSet,
    ) -> Vec<AlertCondition> {
        let points = self.points_needed(config);
        devices
            .iter()
            .filter(|device| device.history.len() >= points)
            .flat_map(move |device| {
                self.rules
                    .iter()
                    .filter_map(move |rule| rule.evaluate(device, config, points))
            })
            .filter(|condition| !dismissed.contains(condition.key()))
            .collect()
    }
}
