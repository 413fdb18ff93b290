pub mod device_kind;
pub mod device_status;
pub mod metric_kind;
pub mod thresholds;

pub use device_kind::DeviceKind;
pub use device_status::DeviceStatus;
pub use metric_kind::MetricKind;
pub use thresholds::{ConfigError, ThresholdConfig, ThresholdPct};
