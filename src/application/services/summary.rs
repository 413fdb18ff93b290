use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::monitor::MonitorService;
use crate::application::config::SummaryConfig;
use crate::domain::entities::summary::FleetSummary;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::summarizer::{FleetSummarizer, SummaryError};

/// Retry and quota handling for summary requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub quota_cooldown: Duration,
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (0-based): `base * 2^attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.backoff_base.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&SummaryConfig::default())
    }
}

impl From<&SummaryConfig> for RetryPolicy {
    fn from(config: &SummaryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            quota_cooldown: Duration::from_secs(config.quota_cooldown_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Published(FleetSummary),
    Empty,
    CoolingDown { until: DateTime<Utc> },
    Failed(String),
}

/// Periodic fleet summaries, independent from the tick loop.
///
/// Works on a cloned snapshot, so a slow or failing provider never holds the
/// fleet state.
pub struct SummaryService {
    monitor: Arc<MonitorService>,
    summarizer: Box<dyn FleetSummarizer>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
    cooldown_until: Mutex<Option<DateTime<Utc>>>,
    latest: RwLock<Option<FleetSummary>>,
}

impl SummaryService {
    #[must_use]
    pub fn new(
        monitor: Arc<MonitorService>,
        summarizer: Box<dyn FleetSummarizer>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            monitor,
            summarizer,
            notifier,
            clock,
            policy,
            cooldown_until: Mutex::new(None),
            latest: RwLock::new(None),
        }
    }

    /// Most recently published summary.
    #[must_use]
    pub fn latest(&self) -> Option<FleetSummary> {
        self.latest.read().ok().and_then(|guard| guard.clone())
    }

    /// Request one summary, retrying transient failures with exponential
    /// backoff. Skipped entirely while a quota cooldown is in effect.
    pub async fn run_once(&self) -> SummaryOutcome {
        let now = self.clock.now();
        if let Some(until) = self.cooldown_remaining(now) {
            tracing::debug!(%until, "summary skipped, quota cooldown in effect");
            return SummaryOutcome::CoolingDown { until };
        }

        let snapshot = match self.monitor.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Summary snapshot failed: {e}");
                return SummaryOutcome::Failed(e.to_string());
            }
        };

        let mut attempt = 0u32;
        loop {
            match self.summarizer.summarize(&snapshot).await {
                Ok(Some(summary)) => {
                    self.publish(&summary);
                    return SummaryOutcome::Published(summary);
                }
                Ok(None) => return SummaryOutcome::Empty,
                Err(SummaryError::QuotaExceeded { retry_after_secs }) => {
                    let wait = retry_after_secs
                        .map_or(self.policy.quota_cooldown, Duration::from_secs);
                    let until = self.start_cooldown(wait);
                    tracing::warn!(%until, provider = self.summarizer.name(), "summary quota exceeded");
                    return SummaryOutcome::CoolingDown { until };
                }
                Err(e) if e.is_transient() && attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(attempt);
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Summary request failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!(provider = self.summarizer.name(), "Summary failed: {e}");
                    return SummaryOutcome::Failed(e.to_string());
                }
            }
        }
    }

    fn publish(&self, summary: &FleetSummary) {
        if let Ok(mut latest) = self.latest.write() {
            *latest = Some(summary.clone());
        }
        if let Err(e) = self.notifier.notify_summary(summary) {
            tracing::warn!("Summary notification failed: {e}");
        }
    }

    fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut guard = self.cooldown_until.lock().ok()?;
        match *guard {
            Some(until) if now < until => Some(until),
            Some(_) => {
                *guard = None;
                None
            }
            None => None,
        }
    }

    fn start_cooldown(&self, wait: Duration) -> DateTime<Utc> {
        let wait = chrono::Duration::from_std(wait).unwrap_or(chrono::Duration::MAX);
        let until = self
            .clock
            .now()
            .checked_add_signed(wait)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if let Ok(mut guard) = self.cooldown_until.lock() {
            *guard = Some(until);
        }
        until
    }
}
