use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Sparkline};
use ratatui::Frame;

use crate::domain::entities::device::Device;
use crate::domain::value_objects::metric_kind::MetricKind;
use crate::domain::value_objects::thresholds::ThresholdConfig;
use crate::presentation::tui::widgets::fleet_table::status_color;

/// History values as sparkline bars on a fixed 0-100 scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bars(device: &Device, metric: MetricKind) -> Vec<u64> {
    device
        .history
        .values(metric)
        .into_iter()
        .map(|v| v.round().clamp(0.0, 100.0) as u64)
        .collect()
}

fn sparkline_color(device: &Device, metric: MetricKind, thresholds: &ThresholdConfig) -> Color {
    let limit = metric.threshold_in(thresholds).value();
    match device.latest_value(metric) {
        Some(v) if v > limit => Color::Red,
        Some(_) => Color::Cyan,
        None => Color::DarkGray,
    }
}

fn metadata(device: &Device, alert_count: usize) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(device.name.as_str(), Style::default().bold()),
            Span::raw("  "),
            Span::styled(
                device.status.to_string(),
                Style::default().fg(status_color(device.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("kind ", label),
            Span::raw(device.kind.to_string()),
            Span::styled("  at ", label),
            Span::raw(device.location.as_str()),
            Span::styled("  ip ", label),
            Span::raw(device.address.as_str()),
        ]),
    ];
    if let Some(sample) = device.latest() {
        lines.push(Line::from(vec![
            Span::styled("disk ", label),
            Span::raw(format!("{:.1}%", sample.disk)),
            Span::styled("  net ", label),
            Span::raw(format!("{:.1}%", sample.network)),
            Span::styled("  updated ", label),
            Span::raw(device.last_update.format("%H:%M:%S").to_string()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("samples ", label),
        Span::raw(format!("{}/{}", device.history.len(), device.history.capacity())),
        Span::styled("  alerts ", label),
        Span::raw(alert_count.to_string()),
    ]));
    lines
}

/// Metadata and CPU/RAM history of the selected device.
pub fn render_device_detail(
    frame: &mut Frame,
    device: Option<&Device>,
    alert_count: usize,
    thresholds: &ThresholdConfig,
    area: Rect,
) {
    let Some(device) = device else {
        let empty = Paragraph::new("No device selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::bordered().title("Device"));
        frame.render_widget(empty, area);
        return;
    };

    let [info_area, cpu_area, ram_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let info = Paragraph::new(metadata(device, alert_count)).block(Block::bordered().title("Device"));
    frame.render_widget(info, info_area);

    for (metric, metric_area) in [(MetricKind::Cpu, cpu_area), (MetricKind::Ram, ram_area)] {
        let data = bars(device, metric);
        let title = device.latest_value(metric).map_or_else(
            || format!("{metric} history"),
            |v| {
                format!(
                    "{metric} {v:.1}% (threshold {})",
                    metric.threshold_in(thresholds)
                )
            },
        );
        let sparkline = Sparkline::default()
            .block(Block::bordered().title(title))
            .data(&data)
            .max(100)
            .style(Style::default().fg(sparkline_color(device, metric, thresholds)));
        frame.render_widget(sparkline, metric_area);
    }
}
