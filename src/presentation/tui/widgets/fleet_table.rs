use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::domain::entities::device::Device;
use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::metric_kind::MetricKind;
use crate::domain::value_objects::thresholds::ThresholdConfig;
use crate::presentation::tui::event::{SortColumn, SortOrder, StatusFilter};

/// How the fleet table is filtered and ordered.
#[derive(Debug, Clone, Default)]
pub struct FleetView {
    pub filter: StatusFilter,
    pub search: String,
    pub column: SortColumn,
    pub order: SortOrder,
}

impl FleetView {
    /// Case-insensitive substring match on name or location. An empty query
    /// matches everything.
    fn matches_search(&self, device: &Device) -> bool {
        let query = self.search.trim().to_lowercase();
        query.is_empty()
            || device.name.to_lowercase().contains(&query)
            || device.location.to_lowercase().contains(&query)
    }

    /// Devices passing the filter and search, in display order.
    ///
    /// Ties keep fleet order.
    #[must_use]
    pub fn apply<'a>(&self, devices: &'a [Device]) -> Vec<&'a Device> {
        let mut visible: Vec<&Device> = devices
            .iter()
            .filter(|d| self.filter.matches(d.status) && self.matches_search(d))
            .collect();

        visible.sort_by(|a, b| {
            let cmp = match self.column {
                SortColumn::Name => a.name.cmp(&b.name),
                SortColumn::Cpu => compare_latest(a, b, MetricKind::Cpu),
                SortColumn::Ram => compare_latest(a, b, MetricKind::Ram),
                SortColumn::Status => a.status.cmp(&b.status),
            };
            match self.order {
                SortOrder::Asc => cmp,
                SortOrder::Desc => cmp.reverse(),
            }
        });

        visible
    }
}

/// Devices without samples sort below any value.
fn compare_latest(a: &Device, b: &Device, metric: MetricKind) -> Ordering {
    match (a.latest_value(metric), b.latest_value(metric)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Build the header label for a column, appending the sort arrow when active.
fn header_label(title: &str, column: SortColumn, view: &FleetView) -> String {
    if column == view.column {
        format!("{title} {}", view.order)
    } else {
        title.to_owned()
    }
}

#[must_use]
pub const fn status_color(status: DeviceStatus) -> Color {
    match status {
        DeviceStatus::Online => Color::Green,
        DeviceStatus::Warning => Color::Yellow,
        DeviceStatus::Error => Color::Red,
        DeviceStatus::Offline => Color::DarkGray,
    }
}

fn metric_cell(value: Option<f64>, threshold: f64) -> Cell<'static> {
    match value {
        Some(v) if v > threshold => Cell::from(format!("{v:.1}")).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Some(v) => Cell::from(format!("{v:.1}")),
        None => Cell::from("-").style(Style::default().fg(Color::DarkGray)),
    }
}

/// Render the filtered, sorted fleet into `area`.
pub fn render_fleet_table(
    frame: &mut Frame,
    devices: &[&Device],
    thresholds: &ThresholdConfig,
    view: &FleetView,
    table_state: &mut TableState,
    is_focused: bool,
    area: Rect,
) {
    // --- Header ---
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let headers = [
        header_label("Name", SortColumn::Name, view),
        "Kind".to_owned(),
        header_label("Status", SortColumn::Status, view),
        "Location".to_owned(),
        header_label("CPU%", SortColumn::Cpu, view),
        header_label("RAM%", SortColumn::Ram, view),
        "Disk%".to_owned(),
        "Net%".to_owned(),
    ];

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::from(Span::styled(h.as_str(), header_style)))
        .collect();

    let header_row = Row::new(header_cells).height(1);

    // --- Rows ---
    let cpu_limit = thresholds.cpu_threshold().value();
    let ram_limit = thresholds.ram_threshold().value();
    let rows: Vec<Row> = devices
        .iter()
        .map(|d| {
            let latest = d.latest();
            let cells = vec![
                Cell::from(d.name.clone()),
                Cell::from(d.kind.to_string()),
                Cell::from(d.status.to_string())
                    .style(Style::default().fg(status_color(d.status))),
                Cell::from(d.location.clone()),
                metric_cell(latest.map(|s| s.cpu), cpu_limit),
                metric_cell(latest.map(|s| s.ram), ram_limit),
                Cell::from(latest.map_or_else(|| "-".to_owned(), |s| format!("{:.1}", s.disk))),
                Cell::from(latest.map_or_else(|| "-".to_owned(), |s| format!("{:.1}", s.network))),
            ];
            Row::new(cells).height(1)
        })
        .collect();

    // --- Column widths ---
    let widths = [
        Constraint::Min(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
    ];

    // --- Highlight style ---
    let highlight_style = if is_focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    // --- Block ---
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut title = format!("Fleet ({})", devices.len());
    if view.filter != StatusFilter::All {
        title.push_str(&format!(" [{}]", view.filter));
    }
    if !view.search.is_empty() {
        title.push_str(&format!(" /{}", view.search));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block)
        .row_highlight_style(highlight_style);

    frame.render_stateful_widget(table, area, table_state);
}
