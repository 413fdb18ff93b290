pub mod alert;
pub mod device;
pub mod history;
pub mod sample;
pub mod snapshot;
pub mod summary;

pub use alert::{Alert, AlertCondition, ConditionKey};
pub use device::{Device, DeviceId};
pub use history::MetricHistory;
pub use sample::MetricSample;
pub use snapshot::FleetSnapshot;
pub use summary::FleetSummary;
