pub mod digest;
pub mod noop;

use crate::application::config::SummaryConfig;
use crate::domain::ports::FleetSummarizer;

use self::digest::DigestSummarizer;
use self::noop::NoopSummarizer;

/// Create the summarizer selected by configuration.
///
/// Returns [`NoopSummarizer`] when summaries are disabled or the provider is unknown.
#[must_use]
pub fn create_summarizer(config: &SummaryConfig) -> Box<dyn FleetSummarizer> {
    if !config.enabled {
        return Box::new(NoopSummarizer::new());
    }
    match config.provider.trim() {
        "digest" => Box::new(DigestSummarizer::default()),
        "noop" => Box::new(NoopSummarizer::new()),
        _ => {
            tracing::warn!(
                provider = %config.provider,
                "unknown summary provider, falling back to noop"
            );
            Box::new(NoopSummarizer::new())
        }
    }
}
