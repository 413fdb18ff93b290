pub mod clock;
pub mod notifier;
pub mod random;
pub mod summarizer;

pub use clock::Clock;
pub use notifier::{NotificationError, Notifier};
pub use random::RandomSource;
pub use summarizer::{FleetSummarizer, SummaryError};
