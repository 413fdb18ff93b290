use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::entities::snapshot::FleetSnapshot;
use crate::domain::entities::summary::FleetSummary;
use crate::presentation::tui::widgets::fleet_table::status_color;

fn header_line(snapshot: Option<&FleetSnapshot>) -> Line<'static> {
    let title = Span::styled(
        " FLEETWATCH ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let Some(snapshot) = snapshot else {
        return Line::from(vec![
            title,
            Span::styled("│ waiting for first tick", Style::default().fg(Color::DarkGray)),
        ]);
    };

    let thresholds = &snapshot.thresholds;
    let mut spans = vec![
        title,
        Span::raw("│ "),
        Span::styled(format!("tick {}", snapshot.tick), Style::default().fg(Color::Yellow)),
        Span::raw(" │ "),
        Span::raw(format!(
            "CPU>{} RAM>{} for {}s",
            thresholds.cpu_threshold(),
            thresholds.ram_threshold(),
            thresholds.sustain_secs()
        )),
        Span::raw(" │"),
    ];
    for (status, count) in snapshot.status_counts() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{} {count}", status.emoji()),
            Style::default().fg(status_color(status)),
        ));
    }
    let alert_style = if snapshot.active_alerts.is_empty() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("{} alert(s)", snapshot.active_alerts.len()),
        alert_style,
    ));
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        snapshot.taken_at.format("%H:%M:%S").to_string(),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// Two lines: fleet state, then the latest summary headline.
pub fn render_header(
    frame: &mut Frame,
    snapshot: Option<&FleetSnapshot>,
    summary: Option<&FleetSummary>,
    area: Rect,
) {
    let summary_line = summary.map_or_else(
        || Line::from(Span::styled(" no summary yet", Style::default().fg(Color::DarkGray))),
        |s| {
            Line::from(vec![
                Span::styled(format!(" [{}] ", s.provider), Style::default().fg(Color::Cyan)),
                Span::styled(s.headline.clone(), Style::default().add_modifier(Modifier::DIM)),
            ])
        },
    );
    frame.render_widget(Paragraph::new(vec![header_line(snapshot), summary_line]), area);
}
