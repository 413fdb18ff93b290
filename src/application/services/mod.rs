pub mod monitor;
pub mod summary;

pub use monitor::{MonitorService, MonitorSettings, TickReport};
pub use summary::{RetryPolicy, SummaryOutcome, SummaryService};
