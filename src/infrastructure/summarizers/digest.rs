use async_trait::async_trait;

use crate::domain::entities::{FleetSnapshot, FleetSummary};
use crate::domain::ports::{FleetSummarizer, SummaryError};
use crate::domain::value_objects::{DeviceStatus, MetricKind};

const DEFAULT_MAX_HIGHLIGHTS: usize = 8;

/// Local, deterministic digest of a fleet snapshot: status counts, fleet
/// averages, active alerts, degraded devices and the hottest device per metric.
pub struct DigestSummarizer {
    max_highlights: usize,
}

impl DigestSummarizer {
    #[must_use]
    pub const fn new(max_highlights: usize) -> Self {
        Self { max_highlights }
    }

    #[must_use]
    pub fn digest(&self, snapshot: &FleetSnapshot) -> Option<FleetSummary> {
        if snapshot.devices.is_empty() {
            return None;
        }

        let counts = snapshot
            .status_counts()
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(status, n)| format!("{n} {}", status.to_string().to_lowercase()))
            .collect::<Vec<_>>()
            .join(", ");
        let averages = MetricKind::ALL
            .iter()
            .filter_map(|m| snapshot.average(*m).map(|avg| format!("avg {m} {avg:.1}%")))
            .collect::<Vec<_>>()
            .join(", ");
        let headline = format!(
            "{} devices ({counts}); {} active alert(s); {averages}",
            snapshot.devices.len(),
            snapshot.active_alerts.len(),
        );

        let mut highlights: Vec<String> = snapshot.active_alerts.iter().map(|a| a.title()).collect();
        highlights.extend(
            snapshot
                .devices
                .iter()
                .filter(|d| d.status != DeviceStatus::Online)
                .map(|d| format!("{} ({}) is {}", d.name, d.location, d.status)),
        );
        for metric in MetricKind::ALL {
            if let Some((device, value)) = snapshot.hottest(metric, 1).first() {
                highlights.push(format!("hottest {metric}: {} at {value:.1}%", device.name));
            }
        }
        highlights.truncate(self.max_highlights);

        Some(FleetSummary {
            generated_at: snapshot.taken_at,
            provider: self.name().to_string(),
            headline,
            highlights,
        })
    }
}

impl Default for DigestSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HIGHLIGHTS)
    }
}

#[async_trait]
impl FleetSummarizer for DigestSummarizer {
    fn name(&self) -> &'static str {
        "digest"
    }

    async fn summarize(
        &self,
        snapshot: &FleetSnapshot,
    ) -> Result<Option<FleetSummary>, SummaryError> {
        Ok(self.digest(snapshot))
    }
}
