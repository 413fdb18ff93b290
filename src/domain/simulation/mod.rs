//! Synthetic telemetry: the bounded random-walk generator and the fleet
//! store transitions built on it.

pub mod catalog;
pub mod fleet;
pub mod generator;
pub mod profile;

pub use fleet::{advance, create_fleet, roll_status, MAX_FLEET_SIZE};
pub use generator::next_sample;
pub use profile::SimulationProfile;
