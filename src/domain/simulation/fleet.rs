use chrono::{DateTime, Utc};

use super::catalog;
use super::generator::next_sample;
use super::profile::SimulationProfile;
use crate::domain::entities::device::{Device, DeviceId};
use crate::domain::entities::history::MetricHistory;
use crate::domain::ports::random::RandomSource;
use crate::domain::value_objects::device_status::DeviceStatus;

/// Largest fleet the simulator accepts. Device ids are `u32`.
pub const MAX_FLEET_SIZE: usize = 10_000;

/// Seed `count` devices, each with a full history of chained samples spaced
/// one sampling period apart and ending at `now`.
///
/// At most [`MAX_FLEET_SIZE`] devices are created; configuration rejects
/// anything larger before it gets here.
pub fn create_fleet<R>(
    count: usize,
    now: DateTime<Utc>,
    profile: &SimulationProfile,
    rng: &mut R,
) -> Vec<Device>
where
    R: RandomSource + ?Sized,
{
    let profile = profile.normalized();
    let period = profile.sample_period();
    let backfill = i32::try_from(profile.history_capacity).unwrap_or(i32::MAX);

    let count = u32::try_from(count.min(MAX_FLEET_SIZE)).unwrap_or(u32::MAX);

    (1..=count)
        .map(|ordinal| {
            let kind = catalog::pick_kind(rng);
            let location = catalog::pick_location(rng).to_string();
            let address = catalog::random_address(rng);

            let mut history = MetricHistory::with_capacity(profile.history_capacity);
            for step in (0..backfill).rev() {
                let timestamp = now - period * step;
                let sample = next_sample(history.latest(), timestamp, rng);
                history.push(sample);
            }

            Device {
                id: DeviceId::new(ordinal),
                name: catalog::device_name(kind, ordinal),
                kind,
                status: DeviceStatus::Online,
                location,
                address,
                history,
                last_update: now,
            }
        })
        .collect()
}

/// Next generation of the fleet: one new sample per device (evicting the
/// oldest at capacity), `last_update = now`, and a freshly rolled status.
pub fn advance<R>(
    devices: &[Device],
    now: DateTime<Utc>,
    profile: &SimulationProfile,
    rng: &mut R,
) -> Vec<Device>
where
    R: RandomSource + ?Sized,
{
    let profile = profile.normalized();
    devices
        .iter()
        .map(|device| {
            let mut next = device.clone();
            let sample = next_sample(device.latest(), now, rng);
            next.history.push(sample);
            next.last_update = now;
            next.status = roll_status(device.status, &profile, rng);
            next
        })
        .collect()
}

/// History-independent status roll.
///
/// Four randoms are always drawn, in order: warning, error, offline,
/// recovery. Later transitions override earlier ones. Recovery to `Online`
/// only applies when `current` was not `Online` at the start of the tick.
pub fn roll_status<R>(current: DeviceStatus, profile: &SimulationProfile, rng: &mut R) -> DeviceStatus
where
    R: RandomSource + ?Sized,
{
    let warning = rng.chance(profile.warning_chance);
    let error = rng.chance(profile.error_chance);
    let offline = rng.chance(profile.offline_chance);
    let recover = rng.chance(profile.recovery_chance);

    let mut next = current;
    if warning {
        next = DeviceStatus::Warning;
    }
    if error {
        next = DeviceStatus::Error;
    }
    if offline {
        next = DeviceStatus::Offline;
    }
    if recover && !current.is_online() {
        next = DeviceStatus::Online;
    }
    next
}
