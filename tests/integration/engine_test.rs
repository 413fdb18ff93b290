#![allow(clippy::expect_used)]

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fleetwatch::domain::entities::alert::ConditionKey;
use fleetwatch::domain::entities::device::{Device, DeviceId};
use fleetwatch::domain::entities::history::MetricHistory;
use fleetwatch::domain::entities::sample::MetricSample;
use fleetwatch::domain::lifecycle::{dismiss, reconcile, AlertBook, ConditionState, DismissalSet};
use fleetwatch::domain::ports::random::RandomSource;
use fleetwatch::domain::rules::{default_rules, RuleEngine};
use fleetwatch::domain::simulation::{advance, create_fleet, next_sample, SimulationProfile};
use fleetwatch::domain::value_objects::{DeviceKind, DeviceStatus, MetricKind, ThresholdConfig};
use fleetwatch::infrastructure::random::RngSource;

const PERIOD_SECS: i64 = 3;

/// Replays a fixed list of unit values, wrapping around.
struct Scripted {
    values: Vec<f64>,
    next: usize,
}

impl Scripted {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn device_with(id: u32, samples: &[(f64, f64)], capacity: usize) -> Device {
    let base = start();
    let mut history = MetricHistory::with_capacity(capacity);
    for (i, (cpu, ram)) in samples.iter().enumerate() {
        let offset = i64::try_from(i).expect("small index") * PERIOD_SECS;
        history.push(MetricSample::new(base + Duration::seconds(offset), *cpu, *ram, 65.0, 20.0));
    }
    let last_update = history.latest().map_or(base, |s| s.timestamp);
    Device {
        id: DeviceId::new(id),
        name: format!("SRV-{id:03}"),
        kind: DeviceKind::Server,
        status: DeviceStatus::Online,
        location: "NYC-DC1".to_string(),
        address: format!("10.0.0.{id}"),
        history,
        last_update,
    }
}

fn flat(id: u32, cpu: f64, ram: f64, count: usize) -> Device {
    device_with(id, &vec![(cpu, ram); count], MetricHistory::DEFAULT_CAPACITY)
}

fn engine() -> RuleEngine {
    RuleEngine::new(default_rules(), 3)
}

#[test]
fn random_walk_never_leaves_percent_range() {
    let mut rng = RngSource::seeded(2024);
    let profile = SimulationProfile::default();
    let mut fleet = create_fleet(25, start(), &profile, &mut rng);
    for step in 1..=500 {
        let now = start() + Duration::seconds(step * PERIOD_SECS);
        fleet = advance(&fleet, now, &profile, &mut rng);
        for device in &fleet {
            let sample = device.latest().expect("sample");
            assert!(sample.is_within_bounds(), "{} out of range: {sample:?}", device.name);
        }
    }
}

#[test]
fn extreme_draws_are_clamped() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..1_000 {
        let prev = MetricSample::new(
            start(),
            rng.random_range(0.0..=100.0),
            rng.random_range(0.0..=100.0),
            rng.random_range(0.0..=100.0),
            rng.random_range(0.0..=100.0),
        );
        let draws = [
            rng.random::<f64>(),
            f64::NAN,
            f64::INFINITY,
            -f64::INFINITY,
        ];
        let next = next_sample(Some(&prev), start(), &mut Scripted::new(&draws));
        assert!(next.is_within_bounds(), "{next:?}");
    }
}

#[test]
fn history_grows_to_capacity_then_stays_there() {
    let capacity = 5;
    let initial = 2;
    let mut fleet = vec![device_with(1, &[(10.0, 10.0); 2], capacity)];
    let profile = SimulationProfile {
        history_capacity: capacity,
        ..SimulationProfile::default()
    };
    let mut rng = RngSource::seeded(3);
    for ticks in 1..=12usize {
        let now = start() + Duration::seconds(i64::try_from(ticks).expect("small") * 100);
        fleet = advance(&fleet, now, &profile, &mut rng);
        assert_eq!(fleet[0].history.len(), (ticks + initial).min(capacity));
        assert_eq!(fleet[0].last_update, now);
    }
}

#[test]
fn seeded_fleet_starts_full_and_never_exceeds_capacity() {
    let profile = SimulationProfile::default();
    let mut rng = RngSource::seeded(17);
    let mut fleet = create_fleet(8, start(), &profile, &mut rng);
    for step in 1..=30 {
        fleet = advance(&fleet, start() + Duration::seconds(step * PERIOD_SECS), &profile, &mut rng);
        assert!(fleet
            .iter()
            .all(|d| d.history.len() == MetricHistory::DEFAULT_CAPACITY));
    }
}

#[test]
fn same_seed_produces_the_same_fleet() {
    let profile = SimulationProfile::default();
    let run = |seed: u64| {
        let mut rng = RngSource::seeded(seed);
        let mut fleet = create_fleet(6, start(), &profile, &mut rng);
        for step in 1..=10 {
            fleet = advance(&fleet, start() + Duration::seconds(step * PERIOD_SECS), &profile, &mut rng);
        }
        fleet
    };
    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
}

#[test]
fn device_with_short_history_is_skipped() {
    let config = ThresholdConfig::new(80.0, 85.0, 60).expect("valid");
    assert_eq!(engine().points_needed(&config), 20);

    let short = flat(1, 99.0, 99.0, 19);
    assert!(engine()
        .evaluate(&[short], &config, &DismissalSet::new())
        .is_empty());
}

#[test]
fn all_samples_in_window_must_exceed() {
    let config = ThresholdConfig::new(80.0, 85.0, 30).expect("valid");
    let mut samples = vec![(95.0, 10.0); 20];
    // oldest sample of the 10-point window sits exactly on the threshold
    samples[10] = (80.0, 10.0);
    let device = device_with(1, &samples, 20);
    assert!(engine()
        .evaluate(&[device], &config, &DismissalSet::new())
        .is_empty());

    // the same dip outside the window does not matter
    samples[10] = (95.0, 10.0);
    samples[9] = (10.0, 10.0);
    let device = device_with(1, &samples, 20);
    let conditions = engine().evaluate(&[device], &config, &DismissalSet::new());
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].key().metric, MetricKind::Cpu);
}

#[test]
fn sustained_minute_at_three_second_sampling() {
    let config = ThresholdConfig::new(90.0, 90.0, 60).expect("valid");
    let device = flat(7, 95.0, 40.0, 20);

    let conditions = engine().evaluate(&[device], &config, &DismissalSet::new());
    assert_eq!(conditions.len(), 1);
    let condition = &conditions[0];
    assert_eq!(condition.key().device_id, DeviceId::new(7));
    assert_eq!(condition.key().metric, MetricKind::Cpu);
    assert!((condition.observed_value() - 95.0).abs() < f64::EPSILON);

    let mut samples = vec![(95.0, 40.0); 19];
    samples.push((50.0, 40.0));
    let recovered = device_with(7, &samples, 20);
    assert!(engine()
        .evaluate(&[recovered], &config, &DismissalSet::new())
        .is_empty());
}

#[test]
fn key_is_stable_across_ticks_and_changes_with_config() {
    let config = ThresholdConfig::new(80.0, 85.0, 30).expect("valid");
    let first = engine().evaluate(&[flat(1, 95.0, 10.0, 20)], &config, &DismissalSet::new());
    let second = engine().evaluate(&[flat(1, 97.0, 10.0, 20)], &config, &DismissalSet::new());
    assert_eq!(first[0].key(), second[0].key());

    let raised = config.with_cpu(85.0).expect("valid");
    let third = engine().evaluate(&[flat(1, 97.0, 10.0, 20)], &raised, &DismissalSet::new());
    assert_ne!(first[0].key(), third[0].key());

    let longer = config.with_sustain(45).expect("valid");
    let fourth = engine().evaluate(&[flat(1, 97.0, 10.0, 20)], &longer, &DismissalSet::new());
    assert_ne!(first[0].key(), fourth[0].key());
}

#[test]
fn reconcile_keeps_existing_alerts_untouched() {
    let config = ThresholdConfig::default();
    let t0 = start();
    let t1 = t0 + Duration::seconds(PERIOD_SECS);

    let first = engine().evaluate(&[flat(1, 95.0, 10.0, 20)], &config, &DismissalSet::new());
    let active = reconcile(&[], &first, t0);
    assert_eq!(active.len(), 1);

    let hotter = engine().evaluate(&[flat(1, 99.0, 10.0, 20)], &config, &DismissalSet::new());
    let active = reconcile(&active, &hotter, t1);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].raised_at, t0);
    assert!((active[0].observed_value - 95.0).abs() < f64::EPSILON);
}

#[test]
fn alerts_survive_recovery() {
    let config = ThresholdConfig::default();
    let mut book = AlertBook::new();
    let hot = engine().evaluate(&[flat(1, 95.0, 10.0, 20)], &config, book.dismissed());
    assert_eq!(book.reconcile(&hot, start()).len(), 1);

    let calm = engine().evaluate(&[flat(1, 5.0, 10.0, 20)], &config, book.dismissed());
    assert!(calm.is_empty());
    for step in 1..=10 {
        book.reconcile(&calm, start() + Duration::seconds(step));
    }
    assert_eq!(book.active().len(), 1);
}

#[test]
fn dismissed_condition_does_not_return_within_five_ticks() {
    let config = ThresholdConfig::default();
    let device = flat(1, 95.0, 10.0, 20);
    let key = ConditionKey::new(DeviceId::new(1), MetricKind::Cpu, &config);

    let mut book = AlertBook::new();
    let conditions = engine().evaluate(std::slice::from_ref(&device), &config, book.dismissed());
    book.reconcile(&conditions, start());
    assert_eq!(book.state_of(&key), ConditionState::Active);

    assert!(book.dismiss(&key).is_some());
    assert_eq!(book.state_of(&key), ConditionState::Dismissed);

    for step in 1..=5 {
        let now = start() + Duration::seconds(step * PERIOD_SECS);
        let filtered = engine().evaluate(std::slice::from_ref(&device), &config, book.dismissed());
        assert!(filtered.is_empty());
        // an unfiltered feed is refused as well
        let unfiltered = engine().evaluate(std::slice::from_ref(&device), &config, &DismissalSet::new());
        assert!(book.reconcile(&unfiltered, now).is_empty());
        assert!(book.active().is_empty());
    }
}

#[test]
fn pure_dismiss_records_inactive_keys() {
    let config = ThresholdConfig::default();
    let key = ConditionKey::new(DeviceId::new(4), MetricKind::Ram, &config);
    let (active, dismissed) = dismiss(&[], &DismissalSet::new(), &key);
    assert!(active.is_empty());
    assert!(dismissed.contains(&key));

    let device = flat(4, 10.0, 99.0, 20);
    assert!(engine().evaluate(&[device], &config, &dismissed).is_empty());
}

#[test]
fn dismissal_does_not_cover_a_new_threshold() {
    let config = ThresholdConfig::default();
    let device = flat(1, 95.0, 10.0, 20);
    let mut book = AlertBook::new();
    let conditions = engine().evaluate(std::slice::from_ref(&device), &config, book.dismissed());
    book.reconcile(&conditions, start());
    book.dismiss_all();

    let lowered = config.with_cpu(70.0).expect("valid");
    let conditions = engine().evaluate(std::slice::from_ref(&device), &lowered, book.dismissed());
    assert_eq!(book.reconcile(&conditions, start()).len(), 1);
}

#[test]
fn random_fleets_only_alert_on_fully_hot_windows() {
    let config = ThresholdConfig::new(60.0, 70.0, 15).expect("valid");
    let points = engine().points_needed(&config);
    let profile = SimulationProfile::default();
    let mut rng = RngSource::seeded(31);
    let mut fleet = create_fleet(30, start(), &profile, &mut rng);

    for step in 1..=200 {
        fleet = advance(&fleet, start() + Duration::seconds(step * PERIOD_SECS), &profile, &mut rng);
        let conditions = engine().evaluate(&fleet, &config, &DismissalSet::new());
        for condition in &conditions {
            let device = fleet
                .iter()
                .find(|d| d.id == condition.key().device_id)
                .expect("device");
            let metric = condition.key().metric;
            let threshold = metric.threshold_in(&config).value();
            let window: Vec<f64> = device
                .history
                .iter()
                .rev()
                .take(points)
                .map(|s| metric.value_of(s))
                .collect();
            assert!(window.iter().all(|v| *v > threshold));
            assert!((condition.observed_value() - window[0]).abs() < f64::EPSILON);
        }
    }
}
