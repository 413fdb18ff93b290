use thiserror::Error;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::summary::FleetSummary;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

pub trait Notifier: Send + Sync {
    /// Announce a newly raised alert.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails to send
    /// or the channel is unavailable.
    fn notify_raised(&self, alert: &Alert) -> Result<(), NotificationError>;

    /// Announce that an operator dismissed an alert.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails.
    fn notify_dismissed(&self, alert: &Alert) -> Result<(), NotificationError>;

    /// Publish a fleet summary.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification fails.
    fn notify_summary(&self, summary: &FleetSummary) -> Result<(), NotificationError>;
}
