use std::io::Write;
use std::path::PathBuf;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::summary::FleetSummary;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const DEFAULT_LOG_PATH: &str = "~/.local/share/fleetwatch/alerts.log";

/// Appends one JSON object per event to a log file.
pub struct LogFileNotifier {
    path: PathBuf,
}

impl LogFileNotifier {
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    fn append_json_line(&self, value: &serde_json::Value) -> Result<(), NotificationError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotificationError::SendFailed(format!("cannot create log directory: {e}"))
            })?;
        }

        let json = serde_json::to_string(value)
            .map_err(|e| NotificationError::SendFailed(format!("JSON serialization error: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| NotificationError::SendFailed(format!("cannot open log file: {e}")))?;

        writeln!(file, "{json}")
            .map_err(|e| NotificationError::SendFailed(format!("cannot write log file: {e}")))
    }

    fn alert_entry(event: &str, alert: &Alert) -> serde_json::Value {
        serde_json::json!({
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "key": alert.key.to_string(),
            "device_id": alert.device_id,
            "device": alert.device_name,
            "metric": alert.metric,
            "observed": alert.observed_value,
            "threshold": alert.threshold,
            "sustain_secs": alert.key.sustain_secs,
            "raised_at": alert.raised_at.to_rfc3339(),
        })
    }
}

impl Default for LogFileNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl Notifier for LogFileNotifier {
    fn notify_raised(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.append_json_line(&Self::alert_entry("raised", alert))
    }

    fn notify_dismissed(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.append_json_line(&Self::alert_entry("dismissed", alert))
    }

    fn notify_summary(&self, summary: &FleetSummary) -> Result<(), NotificationError> {
        let entry = serde_json::json!({
            "event": "summary",
            "timestamp": summary.generated_at.to_rfc3339(),
            "provider": summary.provider,
            "headline": summary.headline,
            "highlights": summary.highlights,
        });
        self.append_json_line(&entry)
    }
}
