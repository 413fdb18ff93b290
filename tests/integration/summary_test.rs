#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use fleetwatch::application::services::{
    MonitorService, MonitorSettings, RetryPolicy, SummaryOutcome, SummaryService,
};
use fleetwatch::domain::entities::alert::Alert;
use fleetwatch::domain::entities::snapshot::FleetSnapshot;
use fleetwatch::domain::entities::summary::FleetSummary;
use fleetwatch::domain::ports::notifier::{NotificationError, Notifier};
use fleetwatch::domain::ports::summarizer::{FleetSummarizer, SummaryError};
use fleetwatch::domain::simulation::SimulationProfile;
use fleetwatch::domain::value_objects::ThresholdConfig;
use fleetwatch::infrastructure::clock::ManualClock;
use fleetwatch::infrastructure::random::RngSource;
use fleetwatch::infrastructure::summarizers::digest::DigestSummarizer;

type Reply = Result<Option<FleetSummary>, SummaryError>;

/// Answers from a queue; once drained, keeps publishing a fixed summary.
struct Scripted {
    replies: Mutex<VecDeque<Reply>>,
    calls: Arc<AtomicUsize>,
}

impl Scripted {
    fn new(replies: Vec<Reply>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let summarizer = Self {
            replies: Mutex::new(replies.into()),
            calls: Arc::clone(&calls),
        };
        (summarizer, calls)
    }
}

#[async_trait]
impl FleetSummarizer for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn summarize(&self, snapshot: &FleetSnapshot) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Some(summary_at(snapshot.taken_at, "steady"))))
    }
}

#[derive(Default)]
struct Published(Mutex<Vec<String>>);

impl Notifier for Published {
    fn notify_raised(&self, _alert: &Alert) -> Result<(), NotificationError> {
        Ok(())
    }

    fn notify_dismissed(&self, _alert: &Alert) -> Result<(), NotificationError> {
        Ok(())
    }

    fn notify_summary(&self, summary: &FleetSummary) -> Result<(), NotificationError> {
        self.0.lock().expect("lock").push(summary.headline.clone());
        Ok(())
    }
}

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-05-10T08:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn summary_at(at: DateTime<Utc>, headline: &str) -> FleetSummary {
    FleetSummary {
        generated_at: at,
        provider: "scripted".to_string(),
        headline: headline.to_string(),
        highlights: vec![],
    }
}

fn policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        backoff_base: Duration::from_millis(500),
        quota_cooldown: Duration::from_secs(300),
    }
}

struct Harness {
    service: SummaryService,
    monitor: Arc<MonitorService>,
    clock: Arc<ManualClock>,
    published: Arc<Published>,
}

fn harness(summarizer: Box<dyn FleetSummarizer>) -> Harness {
    let clock = Arc::new(ManualClock::new(start()));
    let published = Arc::new(Published::default());
    let settings = MonitorSettings {
        fleet_size: 4,
        thresholds: ThresholdConfig::default(),
        profile: SimulationProfile::default(),
    };
    let monitor = Arc::new(MonitorService::new(
        settings,
        clock.clone(),
        Box::new(RngSource::seeded(12)),
        published.clone(),
    ));
    let service = SummaryService::new(
        Arc::clone(&monitor),
        summarizer,
        published.clone(),
        clock.clone(),
        policy(),
    );
    Harness {
        service,
        monitor,
        clock,
        published,
    }
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_with_backoff() {
    let (summarizer, calls) = Scripted::new(vec![
        Err(SummaryError::Timeout),
        Err(SummaryError::ServiceUnavailable("503".to_string())),
    ]);
    let h = harness(Box::new(summarizer));

    let began = tokio::time::Instant::now();
    let outcome = h.service.run_once().await;
    let waited = began.elapsed();

    assert!(matches!(outcome, SummaryOutcome::Published(ref s) if s.headline == "steady"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // 500ms, then 1000ms
    assert!(waited >= Duration::from_millis(1500), "{waited:?}");
    assert!(waited < Duration::from_millis(1600), "{waited:?}");
    assert_eq!(h.service.latest().map(|s| s.headline), Some("steady".to_string()));
    assert_eq!(*h.published.0.lock().expect("lock"), vec!["steady".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_max_retries() {
    let (summarizer, calls) = Scripted::new(vec![Err(SummaryError::Timeout); 10]);
    let h = harness(Box::new(summarizer));

    let outcome = h.service.run_once().await;

    assert_eq!(
        outcome,
        SummaryOutcome::Failed(SummaryError::Timeout.to_string())
    );
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert!(h.service.latest().is_none());
}

#[tokio::test(start_paused = true)]
async fn invalid_response_is_not_retried() {
    let (summarizer, calls) =
        Scripted::new(vec![Err(SummaryError::InvalidResponse("garbled".to_string()))]);
    let h = harness(Box::new(summarizer));

    let outcome = h.service.run_once().await;

    assert!(matches!(outcome, SummaryOutcome::Failed(ref reason) if reason.contains("garbled")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_reply_keeps_previous_summary() {
    let (summarizer, _calls) = Scripted::new(vec![
        Ok(Some(summary_at(start(), "first"))),
        Ok(None),
    ]);
    let h = harness(Box::new(summarizer));

    assert!(matches!(h.service.run_once().await, SummaryOutcome::Published(_)));
    assert_eq!(h.service.run_once().await, SummaryOutcome::Empty);
    assert_eq!(h.service.latest().map(|s| s.headline), Some("first".to_string()));
    assert_eq!(h.published.0.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn quota_cooldown_skips_calls_until_it_expires() {
    let (summarizer, calls) = Scripted::new(vec![Err(SummaryError::QuotaExceeded {
        retry_after_secs: Some(30),
    })]);
    let h = harness(Box::new(summarizer));
    let until = start() + chrono::Duration::seconds(30);

    assert_eq!(h.service.run_once().await, SummaryOutcome::CoolingDown { until });
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    h.clock.advance(chrono::Duration::seconds(29));
    assert_eq!(h.service.run_once().await, SummaryOutcome::CoolingDown { until });
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    h.clock.advance(chrono::Duration::seconds(1));
    assert!(matches!(h.service.run_once().await, SummaryOutcome::Published(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn quota_without_hint_uses_configured_cooldown() {
    let (summarizer, _calls) = Scripted::new(vec![Err(SummaryError::QuotaExceeded {
        retry_after_secs: None,
    })]);
    let h = harness(Box::new(summarizer));

    assert_eq!(
        h.service.run_once().await,
        SummaryOutcome::CoolingDown {
            until: start() + chrono::Duration::seconds(300)
        }
    );
}

#[tokio::test]
async fn digest_summarizes_the_live_fleet() {
    let h = harness(Box::new(DigestSummarizer::default()));
    for _ in 0..3 {
        h.clock.advance(chrono::Duration::seconds(3));
        h.monitor.run_once().expect("tick");
    }

    let SummaryOutcome::Published(summary) = h.service.run_once().await else {
        panic!("digest should always publish for a non-empty fleet");
    };
    assert_eq!(summary.provider, "digest");
    assert!(summary.headline.starts_with("4 devices"), "{}", summary.headline);
    assert_eq!(summary.generated_at, start() + chrono::Duration::seconds(9));
    assert_eq!(h.service.latest(), Some(summary));
}
