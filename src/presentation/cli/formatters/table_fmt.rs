use crate::domain::entities::device::Device;
use crate::domain::value_objects::metric_kind::MetricKind;
use crate::domain::value_objects::thresholds::ThresholdConfig;
use crate::presentation::cli::formatters::status_fmt::{paint_against, paint_status};

/// Formats the fleet as an aligned table, one row per device in fleet order.
///
/// CPU and RAM cells are colored against their thresholds. Devices without
/// samples show `-` in every metric column.
///
/// # Returns
///
/// A multi-line string with header, separator, and device rows.
#[must_use]
pub fn format_device_table(devices: &[Device], thresholds: &ThresholdConfig) -> String {
    let header = format!(
        "{:<10} {:<9} {:<8} {:<9} {:<15} {:>6} {:>6} {:>6} {:>6}",
        "NAME", "KIND", "STATUS", "LOCATION", "ADDRESS", "CPU%", "RAM%", "DISK%", "NET%"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];

    for device in devices {
        let name: String = device.name.chars().take(10).collect();
        let status = paint_status(&format!("{:<8}", device.status.to_string()), device.status);
        let metrics = device.latest().map_or_else(
            || format!("{:>6} {:>6} {:>6} {:>6}", "-", "-", "-", "-"),
            |sample| {
                let cpu = paint_against(
                    &format!("{:>6.1}", sample.cpu),
                    sample.cpu,
                    Some(MetricKind::Cpu.threshold_in(thresholds).value()),
                );
                let ram = paint_against(
                    &format!("{:>6.1}", sample.ram),
                    sample.ram,
                    Some(MetricKind::Ram.threshold_in(thresholds).value()),
                );
                format!(
                    "{cpu} {ram} {:>6.1} {:>6.1}",
                    sample.disk, sample.network
                )
            },
        );
        rows.push(format!(
            "{:<10} {:<9} {status} {:<9} {:<15} {metrics}",
            name,
            device.kind.to_string(),
            device.location,
            device.address
        ));
    }

    rows.join("\n")
}
