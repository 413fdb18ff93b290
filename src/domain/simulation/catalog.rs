use crate::domain::ports::random::RandomSource;
use crate::domain::value_objects::device_kind::DeviceKind;

/// Datacenter sites devices are spread across.
pub const LOCATIONS: [&str; 6] = [
    "NYC-DC1", "NYC-DC2", "LON-DC1", "FRA-DC1", "SIN-DC1", "SFO-EDGE",
];

pub fn pick_kind<R: RandomSource + ?Sized>(rng: &mut R) -> DeviceKind {
    DeviceKind::ALL[rng.index(DeviceKind::ALL.len())]
}

pub fn pick_location<R: RandomSource + ?Sized>(rng: &mut R) -> &'static str {
    LOCATIONS[rng.index(LOCATIONS.len())]
}

/// Private IPv4 address in `10.0.0.0/8`; the last octet is never 0 or 255.
pub fn random_address<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    format!(
        "10.{}.{}.{}",
        rng.index(256),
        rng.index(256),
        1 + rng.index(254)
    )
}

/// Display name such as `SRV-004`.
#[must_use]
pub fn device_name(kind: DeviceKind, ordinal: u32) -> String {
    format!("{}-{ordinal:03}", kind.name_prefix())
}
