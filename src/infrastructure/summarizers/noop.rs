use async_trait::async_trait;

use crate::domain::entities::{FleetSnapshot, FleetSummary};
use crate::domain::ports::{FleetSummarizer, SummaryError};

/// No-op summarizer that always returns `None`.
///
/// Used when summaries are disabled or as a fallback when the configured
/// provider is unknown.
pub struct NoopSummarizer;

impl NoopSummarizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for NoopSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FleetSummarizer for NoopSummarizer {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn summarize(
        &self,
        _snapshot: &FleetSnapshot,
    ) -> Result<Option<FleetSummary>, SummaryError> {
        Ok(None)
    }
}
