use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::snapshot::FleetSnapshot;
use crate::domain::entities::summary::FleetSummary;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("summary service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("summary request timed out")]
    Timeout,
    #[error("summary quota exceeded")]
    QuotaExceeded { retry_after_secs: Option<u64> },
    #[error("invalid summary: {0}")]
    InvalidResponse(String),
}

impl SummaryError {
    /// Failures worth retrying immediately with backoff.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::Timeout)
    }
}

#[async_trait]
pub trait FleetSummarizer: Send + Sync {
    /// Short provider name, shown next to published summaries.
    fn name(&self) -> &'static str;

    /// Summarize a fleet snapshot.
    ///
    /// Returns `Ok(None)` when the provider has nothing to report.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError` if the provider is unavailable, times out,
    /// is over quota, or produces an unusable summary.
    async fn summarize(&self, snapshot: &FleetSnapshot)
        -> Result<Option<FleetSummary>, SummaryError>;
}
