use chrono::{DateTime, Utc};

/// Wall-clock time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
