use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::domain::entities::alert::Alert;
use crate::domain::value_objects::metric_kind::MetricKind;

const fn metric_color(metric: MetricKind) -> Color {
    match metric {
        MetricKind::Cpu => Color::Red,
        MetricKind::Ram => Color::Magenta,
    }
}

/// Active alerts in raise order. The selected one is the target of `d`.
pub fn render_alert_panel(
    frame: &mut Frame,
    alerts: &[Alert],
    dismissed_count: usize,
    list_state: &mut ListState,
    is_focused: bool,
    area: Rect,
) {
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!("Alerts ({} active, {dismissed_count} dismissed)", alerts.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let highlight_style = if is_focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let items: Vec<ListItem<'_>> = if alerts.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No active alerts",
            Style::default().fg(Color::Green),
        )))]
    } else {
        alerts
            .iter()
            .map(|alert| {
                let style = Style::default()
                    .fg(metric_color(alert.metric))
                    .add_modifier(Modifier::BOLD);
                let line1 = Line::from(vec![
                    Span::styled(format!("[{}] ", alert.metric), style),
                    Span::raw(alert.title()),
                ]);
                let line2 = Line::from(vec![Span::styled(
                    format!(
                        "  since {} · {}",
                        alert.raised_at.format("%H:%M:%S"),
                        alert.key
                    ),
                    Style::default().add_modifier(Modifier::DIM),
                )]);
                ListItem::new(vec![line1, line2])
            })
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, list_state);
}
