use std::borrow::Cow;

use colored::Colorize;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::summary::FleetSummary;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::metric_kind::MetricKind;

const SEPARATOR_WIDTH: usize = 70;

/// Prints alerts and summaries to stdout.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn notify_raised(&self, alert: &Alert) -> Result<(), NotificationError> {
        let separator = "\u{2500}".repeat(SEPARATOR_WIDTH);

        println!("\n{}", separator.dimmed());
        println!("{} {}", metric_badge(alert.metric), sanitize(&alert.title()).bold());
        println!(
            "{}",
            format!(
                "{} \u{00b7} raised {} \u{00b7} key {}",
                sanitize(&alert.device_name),
                alert.raised_at.format("%H:%M:%S"),
                alert.key
            )
            .dimmed()
        );
        println!("{}\n", separator.dimmed());
        Ok(())
    }

    fn notify_dismissed(&self, alert: &Alert) -> Result<(), NotificationError> {
        println!(
            "{} {}",
            "[dismissed]".green(),
            sanitize(&alert.title()).dimmed()
        );
        Ok(())
    }

    fn notify_summary(&self, summary: &FleetSummary) -> Result<(), NotificationError> {
        let separator = "\u{2550}".repeat(SEPARATOR_WIDTH);

        println!("\n{}", separator.cyan());
        println!(
            "{}",
            format!(" Fleet summary ({}) ", sanitize(&summary.provider))
                .on_cyan()
                .black()
                .bold()
        );
        println!("{}", separator.cyan());
        println!("{}", sanitize(&summary.headline).bold());
        for line in &summary.highlights {
            println!("  \u{2022} {}", sanitize(line));
        }
        println!("{}\n", separator.cyan());
        Ok(())
    }
}

/// Strip ANSI escape sequences and C0/C1 control characters from a string,
/// preserving only printable content, newlines, and tabs.
fn sanitize(s: &str) -> Cow<'_, str> {
    if s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
    {
        Cow::Owned(
            s.chars()
                .filter(|&c| !matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

#[must_use]
fn metric_badge(metric: MetricKind) -> String {
    match metric {
        MetricKind::Cpu => format!(" {metric} ").on_red().white().bold().to_string(),
        MetricKind::Ram => format!(" {metric} ").on_yellow().black().bold().to_string(),
    }
}
