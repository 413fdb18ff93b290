use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short narrative summary of the fleet produced by a summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub generated_at: DateTime<Utc>,
    pub provider: String,
    pub headline: String,
    pub highlights: Vec<String>,
}

impl FleetSummary {
    /// Headline followed by one bullet per highlight.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.headline.clone();
        for line in &self.highlights {
            out.push_str("\n  - ");
            out.push_str(line);
        }
        out
    }
}
