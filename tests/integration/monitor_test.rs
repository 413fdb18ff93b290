#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use fleetwatch::application::services::{MonitorService, MonitorSettings};
use fleetwatch::domain::entities::alert::{Alert, ConditionKey};
use fleetwatch::domain::entities::device::DeviceId;
use fleetwatch::domain::entities::summary::FleetSummary;
use fleetwatch::domain::ports::notifier::{NotificationError, Notifier};
use fleetwatch::domain::ports::random::RandomSource;
use fleetwatch::domain::simulation::SimulationProfile;
use fleetwatch::domain::value_objects::{DeviceStatus, MetricKind, ThresholdConfig};
use fleetwatch::infrastructure::clock::ManualClock;
use fleetwatch::infrastructure::random::RngSource;

/// Pushes every metric up and never changes a device status.
struct AlwaysHigh;

impl RandomSource for AlwaysHigh {
    fn next_unit(&mut self) -> f64 {
        0.999
    }
}

#[derive(Default)]
struct Recorder {
    raised: Mutex<Vec<ConditionKey>>,
    dismissed: Mutex<Vec<ConditionKey>>,
    fail: bool,
}

impl Recorder {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn raised(&self) -> Vec<ConditionKey> {
        self.raised.lock().expect("lock").clone()
    }

    fn dismissed(&self) -> Vec<ConditionKey> {
        self.dismissed.lock().expect("lock").clone()
    }
}

impl Notifier for Recorder {
    fn notify_raised(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.raised.lock().expect("lock").push(alert.key);
        if self.fail {
            return Err(NotificationError::ChannelUnavailable("test".to_string()));
        }
        Ok(())
    }

    fn notify_dismissed(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.dismissed.lock().expect("lock").push(alert.key);
        Ok(())
    }

    fn notify_summary(&self, _summary: &FleetSummary) -> Result<(), NotificationError> {
        Ok(())
    }
}

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

struct Harness {
    monitor: MonitorService,
    clock: Arc<ManualClock>,
    notifier: Arc<Recorder>,
}

impl Harness {
    fn new(fleet_size: usize, rng: Box<dyn RandomSource>, notifier: Recorder) -> Self {
        let clock = Arc::new(ManualClock::new(start()));
        let notifier = Arc::new(notifier);
        let settings = MonitorSettings {
            fleet_size,
            thresholds: ThresholdConfig::default(),
            profile: SimulationProfile::default(),
        };
        let monitor = MonitorService::new(settings, clock.clone(), rng, notifier.clone());
        Self {
            monitor,
            clock,
            notifier,
        }
    }

    fn hot(fleet_size: usize) -> Self {
        Self::new(fleet_size, Box::new(AlwaysHigh), Recorder::default())
    }

    fn tick(&self) -> fleetwatch::application::services::TickReport {
        self.clock.advance(Duration::seconds(3));
        self.monitor.run_once().expect("tick")
    }
}

#[test]
fn hot_fleet_raises_cpu_and_ram_once() {
    let harness = Harness::hot(3);
    let report = harness.tick();
    assert_eq!(report.tick, 1);
    assert_eq!(report.devices, 3);
    assert_eq!(report.raised.len(), 6);
    assert_eq!(report.active_alerts, 6);

    for _ in 0..5 {
        let report = harness.tick();
        assert!(report.raised.is_empty());
        assert_eq!(report.qualifying, 6);
        assert_eq!(report.active_alerts, 6);
    }
    assert_eq!(harness.notifier.raised().len(), 6);
}

#[test]
fn raised_alerts_follow_device_then_metric_order() {
    let harness = Harness::hot(2);
    let keys: Vec<(u32, MetricKind)> = harness
        .tick()
        .raised
        .iter()
        .map(|a| (a.device_id.get(), a.metric))
        .collect();
    assert_eq!(
        keys,
        vec![
            (1, MetricKind::Cpu),
            (1, MetricKind::Ram),
            (2, MetricKind::Cpu),
            (2, MetricKind::Ram),
        ]
    );
}

#[test]
fn snapshot_reflects_the_last_completed_tick() {
    let harness = Harness::hot(4);
    let before = harness.monitor.snapshot().expect("snapshot");
    assert_eq!(before.tick, 0);
    assert!(before.active_alerts.is_empty());

    harness.tick();
    harness.tick();
    let after = harness.monitor.snapshot().expect("snapshot");
    assert_eq!(after.tick, 2);
    assert_eq!(after.taken_at, start() + Duration::seconds(6));
    assert!(after
        .devices
        .iter()
        .all(|d| d.last_update == start() + Duration::seconds(6)));
    assert!(after
        .devices
        .iter()
        .all(|d| d.status == DeviceStatus::Online));
    assert_eq!(after.active_alerts.len(), 8);
}

#[test]
fn dismissal_is_durable_across_ticks() {
    let harness = Harness::hot(1);
    harness.tick();
    let thresholds = harness.monitor.thresholds().expect("thresholds");
    let key = ConditionKey::new(DeviceId::new(1), MetricKind::Cpu, &thresholds);

    let removed = harness.monitor.dismiss(&key).expect("dismiss");
    assert_eq!(removed.map(|a| a.key), Some(key));
    assert_eq!(harness.notifier.dismissed(), vec![key]);

    for _ in 0..5 {
        let report = harness.tick();
        assert!(report.raised.is_empty());
        assert_eq!(report.active_alerts, 1);
    }
    let snapshot = harness.monitor.snapshot().expect("snapshot");
    assert_eq!(snapshot.dismissed_count, 1);
    assert!(snapshot.active_alerts.iter().all(|a| a.key != key));
}

#[test]
fn dismissing_an_unseen_key_suppresses_it() {
    let harness = Harness::hot(1);
    let key = ConditionKey::new(DeviceId::new(1), MetricKind::Ram, &ThresholdConfig::default());
    assert!(harness.monitor.dismiss(&key).expect("dismiss").is_none());
    assert!(harness.notifier.dismissed().is_empty());

    let report = harness.tick();
    assert_eq!(report.raised.len(), 1);
    assert_eq!(report.raised[0].metric, MetricKind::Cpu);
}

#[test]
fn dismiss_all_then_new_threshold_raises_again() {
    let harness = Harness::hot(2);
    harness.tick();
    let removed = harness.monitor.dismiss_all().expect("dismiss all");
    assert_eq!(removed.len(), 4);
    assert!(harness.tick().raised.is_empty());

    let lowered = harness
        .monitor
        .thresholds()
        .expect("thresholds")
        .with_cpu(70.0)
        .expect("valid");
    harness.monitor.update_thresholds(lowered).expect("update");
    let report = harness.tick();
    assert_eq!(report.raised.len(), 2);
    assert!(report.raised.iter().all(|a| a.metric == MetricKind::Cpu));
    assert!(report
        .raised
        .iter()
        .all(|a| a.threshold == lowered.cpu_threshold()));
}

#[test]
fn invalid_threshold_edit_leaves_configuration_alone() {
    let harness = Harness::hot(1);
    let current = harness.monitor.thresholds().expect("thresholds");
    assert!(current.with_cpu(120.0).is_err());
    assert!(current.with_sustain(0).is_err());
    assert!(ThresholdConfig::new(f64::NAN, 85.0, 30).is_err());
    assert_eq!(harness.monitor.thresholds().expect("thresholds"), current);
}

#[test]
fn full_minute_window_waits_for_cold_seed_samples_to_evict() {
    let harness = Harness::hot(1);
    let minute = harness
        .monitor
        .thresholds()
        .expect("thresholds")
        .with_sustain(60)
        .expect("valid");
    harness.monitor.update_thresholds(minute).expect("update");

    // backfilled history climbs ~5 points per sample from its seed:
    // RAM 79.95, 84.94, 89.93.. and CPU 59.96 .. 79.92, 84.91..
    let mut raised = Vec::new();
    for _ in 0..6 {
        let report = harness.tick();
        raised.extend(report.raised.iter().map(|a| (report.tick, a.metric)));
    }
    assert_eq!(raised, vec![(2, MetricKind::Ram), (5, MetricKind::Cpu)]);
}

#[test]
fn notifier_failures_do_not_stop_the_tick() {
    let harness = Harness::new(2, Box::new(AlwaysHigh), Recorder::failing());
    let report = harness.tick();
    assert_eq!(report.raised.len(), 4);
    assert_eq!(harness.notifier.raised().len(), 4);
    assert_eq!(harness.tick().tick, 2);
}

#[test]
fn readers_only_see_whole_ticks() {
    let harness = Harness::new(10, Box::new(RngSource::seeded(8)), Recorder::default());
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..200 {
                harness.tick();
            }
        });
        scope.spawn(|| {
            for _ in 0..200 {
                let snapshot = harness.monitor.snapshot().expect("snapshot");
                let first = snapshot.devices[0].last_update;
                assert!(snapshot.devices.iter().all(|d| d.last_update == first));
                assert!(snapshot
                    .devices
                    .iter()
                    .all(|d| d.history.len() == SimulationProfile::default().history_capacity));
            }
        });
    });
    assert_eq!(harness.monitor.snapshot().expect("snapshot").tick, 200);
}
