use chrono::{DateTime, Utc};

use crate::domain::entities::sample::{clamp_percent, MetricSample};
use crate::domain::ports::random::RandomSource;

/// Width of the symmetric per-tick drift interval, in percentage points.
pub const DRIFT_WIDTH: f64 = 10.0;

pub const CPU_SEED: (f64, f64) = (20.0, 60.0);
pub const RAM_SEED: (f64, f64) = (30.0, 80.0);
pub const DISK_SEED: (f64, f64) = (60.0, 70.0);
pub const NETWORK_SEED: (f64, f64) = (10.0, 30.0);

/// Next sample of a bounded random walk.
///
/// With a previous sample each dimension drifts by a uniform delta in
/// `[-DRIFT_WIDTH / 2, DRIFT_WIDTH / 2)` and is clamped to `[0, 100]`. Without
/// one, dimensions are seeded from their per-metric ranges. Randoms are drawn
/// in the order cpu, ram, disk, network.
pub fn next_sample<R>(previous: Option<&MetricSample>, now: DateTime<Utc>, rng: &mut R) -> MetricSample
where
    R: RandomSource + ?Sized,
{
    match previous {
        Some(prev) => MetricSample::new(
            now,
            drift(prev.cpu, rng),
            drift(prev.ram, rng),
            drift(prev.disk, rng),
            drift(prev.network, rng),
        ),
        None => MetricSample::new(
            now,
            seed(CPU_SEED, rng),
            seed(RAM_SEED, rng),
            seed(DISK_SEED, rng),
            seed(NETWORK_SEED, rng),
        ),
    }
}

fn drift<R: RandomSource + ?Sized>(previous: f64, rng: &mut R) -> f64 {
    clamp_percent(previous + (rng.next_unit() - 0.5) * DRIFT_WIDTH)
}

fn seed<R: RandomSource + ?Sized>((low, high): (f64, f64), rng: &mut R) -> f64 {
    clamp_percent(rng.uniform(low, high))
}
