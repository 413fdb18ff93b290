pub mod composite;
pub mod log_file;
pub mod terminal;

use crate::application::config::NotificationConfig;

use self::composite::CompositeNotifier;
use self::log_file::LogFileNotifier;
use self::terminal::TerminalNotifier;

/// Build the notifier chain described by `config`.
///
/// `interactive` suppresses the terminal channel so that it cannot draw over
/// a full-screen dashboard.
#[must_use]
pub fn create_notifier(config: &NotificationConfig, interactive: bool) -> CompositeNotifier {
    let mut notifiers: Vec<Box<dyn crate::domain::ports::Notifier>> = Vec::new();
    if config.terminal && !interactive {
        notifiers.push(Box::new(TerminalNotifier::new()));
    }
    if let Some(path) = &config.log_file {
        notifiers.push(Box::new(LogFileNotifier::new(path)));
    }
    CompositeNotifier::new(notifiers)
}
