use colored::Colorize;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::summary::FleetSummary;

/// One line per alert: title, raise time and condition key.
#[must_use]
pub fn format_alert_line(alert: &Alert) -> String {
    format!(
        "{} {} {}",
        alert.title().bold(),
        format!("since {}", alert.raised_at.format("%H:%M:%S")).dimmed(),
        format!("[{}]", alert.key).cyan()
    )
}

pub fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        print_no_alerts();
        return;
    }
    println!();
    println!(
        "{}",
        format!(" {} active alert(s) ", alerts.len())
            .on_red()
            .white()
            .bold()
    );
    for alert in alerts {
        println!("  {}", format_alert_line(alert));
    }
    println!();
}

pub fn print_no_alerts() {
    println!();
    println!("{}", "No active alerts".green().bold());
    println!();
}

pub fn print_summary(summary: &FleetSummary) {
    println!("{}", summary.headline.bold());
    for line in &summary.highlights {
        println!("  \u{2022} {line}");
    }
}
