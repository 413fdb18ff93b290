use crate::domain::entities::alert::Alert;
use crate::domain::entities::summary::FleetSummary;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Fans every event out to a list of channels.
///
/// A failing channel never stops delivery to the ones after it; the first
/// failure is reported once all channels have been tried.
pub struct CompositeNotifier {
    channels: Vec<Box<dyn Notifier>>,
}

impl CompositeNotifier {
    #[must_use]
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    fn fan_out(
        &self,
        event: &str,
        deliver: impl Fn(&dyn Notifier) -> Result<(), NotificationError>,
    ) -> Result<(), NotificationError> {
        self.channels
            .iter()
            .filter_map(|channel| deliver(channel.as_ref()).err())
            .inspect(|e| tracing::warn!(event, "Notification channel failed: {e}"))
            .fold(Ok(()), |result, e| result.and(Err(e)))
    }
}

impl Default for CompositeNotifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Notifier for CompositeNotifier {
    fn notify_raised(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.fan_out("raised", |n| n.notify_raised(alert))
    }

    fn notify_dismissed(&self, alert: &Alert) -> Result<(), NotificationError> {
        self.fan_out("dismissed", |n| n.notify_dismissed(alert))
    }

    fn notify_summary(&self, summary: &FleetSummary) -> Result<(), NotificationError> {
        self.fan_out("summary", |n| n.notify_summary(summary))
    }
}
