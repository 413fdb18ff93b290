use colored::{ColoredString, Colorize};

use crate::domain::value_objects::device_status::DeviceStatus;

/// Distance below the threshold at which a value is painted as a warning.
const WARNING_MARGIN: f64 = 10.0;

/// Where a value sits relative to its alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Above,
    Near,
    Below,
    Unrated,
}

#[must_use]
pub fn band(value: f64, threshold: Option<f64>) -> Band {
    match threshold {
        Some(limit) if value > limit => Band::Above,
        Some(limit) if value > limit - WARNING_MARGIN => Band::Near,
        Some(_) => Band::Below,
        None => Band::Unrated,
    }
}

/// Paints `text` by how close `value` sits to `threshold`.
///
/// Without a threshold the text is returned uncolored.
#[must_use]
pub fn paint_against(text: &str, value: f64, threshold: Option<f64>) -> ColoredString {
    match band(value, threshold) {
        Band::Above => text.red().bold(),
        Band::Near => text.yellow(),
        Band::Below => text.green(),
        Band::Unrated => text.normal(),
    }
}

/// `"93.5%"` colored against `threshold`.
#[must_use]
pub fn colorize_percent(value: f64, threshold: Option<f64>) -> ColoredString {
    paint_against(&format!("{value:.1}%"), value, threshold)
}

#[must_use]
pub fn paint_status(text: &str, status: DeviceStatus) -> ColoredString {
    match status {
        DeviceStatus::Online => text.green(),
        DeviceStatus::Warning => text.yellow(),
        DeviceStatus::Error => text.red().bold(),
        DeviceStatus::Offline => text.dimmed(),
    }
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
