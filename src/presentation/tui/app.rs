use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListState, Paragraph, TableState};
use ratatui::{Frame, Terminal};

use crate::application::services::{MonitorService, SummaryService};
use crate::domain::entities::device::Device;
use crate::domain::entities::snapshot::FleetSnapshot;
use crate::domain::value_objects::thresholds::{ConfigError, ThresholdConfig};
use crate::presentation::tui::event::{ActivePanel, InputMode};
use crate::presentation::tui::widgets::alert_panel::render_alert_panel;
use crate::presentation::tui::widgets::device_detail::render_device_detail;
use crate::presentation::tui::widgets::fleet_table::{render_fleet_table, FleetView};
use crate::presentation::tui::widgets::header::render_header;

/// Step applied by the CPU and RAM threshold keys, in percent.
const THRESHOLD_STEP: f64 = 5.0;

struct App<'a> {
    monitor: &'a MonitorService,
    summary: Option<&'a SummaryService>,

    snapshot: Option<FleetSnapshot>,

    active_panel: ActivePanel,
    input_mode: InputMode,
    view: FleetView,
    table_state: TableState,
    alert_list_state: ListState,
    status_line: Option<String>,

    should_quit: bool,
    tick_rate: Duration,
}

impl<'a> App<'a> {
    #[must_use]
    fn new(monitor: &'a MonitorService, summary: Option<&'a SummaryService>) -> Self {
        Self {
            monitor,
            summary,
            snapshot: None,
            active_panel: ActivePanel::default(),
            input_mode: InputMode::default(),
            view: FleetView::default(),
            table_state: TableState::default(),
            alert_list_state: ListState::default(),
            status_line: None,
            should_quit: false,
            tick_rate: Duration::from_secs(monitor.profile().sample_period_secs.max(1)),
        }
    }

    /// Advance the fleet one tick, then refresh.
    fn on_tick(&mut self) {
        if let Err(e) = self.monitor.run_once() {
            self.status_line = Some(format!("Tick failed: {e}"));
        }
        self.refresh_data();
    }

    fn refresh_data(&mut self) {
        match self.monitor.snapshot() {
            Ok(snapshot) => self.snapshot = Some(snapshot),
            Err(e) => self.status_line = Some(format!("Snapshot failed: {e}")),
        }
        // Clamp selection indices to new data bounds
        self.clamp_selections();
    }

    fn visible_devices(&self) -> Vec<&Device> {
        self.snapshot
            .as_ref()
            .map_or_else(Vec::new, |s| self.view.apply(&s.devices))
    }

    fn alert_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.active_alerts.len())
    }

    fn clamp_selections(&mut self) {
        let device_count = self.visible_devices().len();
        clamp(&mut self.table_state, device_count);
        let alert_count = self.alert_count();
        if let Some(sel) = self.alert_list_state.selected() {
            if alert_count == 0 {
                self.alert_list_state.select(None);
            } else if sel >= alert_count {
                self.alert_list_state.select(Some(alert_count - 1));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.input_mode == InputMode::Search {
            self.handle_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.active_panel = self.active_panel.next(),
            KeyCode::BackTab => self.active_panel = self.active_panel.prev(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char('s') => self.view.column = self.view.column.next(),
            KeyCode::Char('o') => self.view.order = self.view.order.toggle(),
            KeyCode::Char('f') => {
                self.view.filter = self.view.filter.next();
                self.clamp_selections();
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                self.view.search.clear();
                self.clamp_selections();
            }
            KeyCode::Char('d') => self.dismiss_selected(),
            KeyCode::Char('D') => self.dismiss_all(),
            KeyCode::Char('+' | '=') => {
                self.edit_thresholds(|t| t.with_cpu(t.cpu_threshold().value() + THRESHOLD_STEP));
            }
            KeyCode::Char('-') => {
                self.edit_thresholds(|t| t.with_cpu(t.cpu_threshold().value() - THRESHOLD_STEP));
            }
            KeyCode::Char(']') => {
                self.edit_thresholds(|t| t.with_ram(t.ram_threshold().value() + THRESHOLD_STEP));
            }
            KeyCode::Char('[') => {
                self.edit_thresholds(|t| t.with_ram(t.ram_threshold().value() - THRESHOLD_STEP));
            }
            KeyCode::Char('>') => {
                let step = self.sustain_step();
                self.edit_thresholds(|t| t.with_sustain(sustain_of(t).saturating_add(step)));
            }
            KeyCode::Char('<') => {
                let step = self.sustain_step();
                self.edit_thresholds(|t| t.with_sustain(sustain_of(t).saturating_sub(step)));
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.view.search.clear();
            }
            KeyCode::Backspace => {
                self.view.search.pop();
            }
            KeyCode::Char(c) => self.view.search.push(c),
            _ => {}
        }
        self.clamp_selections();
    }

    fn sustain_step(&self) -> i64 {
        i64::try_from(self.monitor.profile().sample_period_secs).unwrap_or(i64::MAX)
    }

    /// Apply `edit` to the current thresholds. Rejected edits leave the
    /// monitor untouched and are reported in the status line.
    fn edit_thresholds(&mut self, edit: impl FnOnce(ThresholdConfig) -> Result<ThresholdConfig, ConfigError>) {
        let current = match self.monitor.thresholds() {
            Ok(current) => current,
            Err(e) => {
                self.status_line = Some(format!("Cannot read thresholds: {e}"));
                return;
            }
        };
        self.status_line = Some(match edit(current) {
            Ok(next) => match self.monitor.update_thresholds(next) {
                Ok(()) => format!(
                    "Thresholds: CPU>{} RAM>{} for {}s",
                    next.cpu_threshold(),
                    next.ram_threshold(),
                    next.sustain_secs()
                ),
                Err(e) => format!("Update failed: {e}"),
            },
            Err(e) => format!("Rejected: {e}"),
        });
        self.refresh_data();
    }

    fn dismiss_selected(&mut self) {
        let Some(alert) = self.alert_list_state.selected().and_then(|i| {
            self.snapshot
                .as_ref()
                .and_then(|s| s.active_alerts.get(i))
                .cloned()
        }) else {
            self.status_line = Some("No alert selected (Tab to the alert panel, j/k to pick)".to_string());
            return;
        };
        self.status_line = Some(match self.monitor.dismiss(&alert.key) {
            Ok(_) => format!("Dismissed {}", alert.key),
            Err(e) => format!("Dismiss failed: {e}"),
        });
        self.refresh_data();
    }

    fn dismiss_all(&mut self) {
        self.status_line = Some(match self.monitor.dismiss_all() {
            Ok(removed) => format!("Dismissed {} alert(s)", removed.len()),
            Err(e) => format!("Dismiss failed: {e}"),
        });
        self.refresh_data();
    }

    fn scroll_down(&mut self) {
        match self.active_panel {
            ActivePanel::Fleet => {
                let count = self.visible_devices().len();
                step_down(&mut self.table_state, count);
            }
            ActivePanel::Alerts => {
                let count = self.alert_count();
                if count > 0 {
                    let i = self
                        .alert_list_state
                        .selected()
                        .map_or(0, |i| if i >= count - 1 { 0 } else { i + 1 });
                    self.alert_list_state.select(Some(i));
                }
            }
        }
    }

    fn scroll_up(&mut self) {
        match self.active_panel {
            ActivePanel::Fleet => {
                let count = self.visible_devices().len();
                step_up(&mut self.table_state, count);
            }
            ActivePanel::Alerts => {
                let count = self.alert_count();
                if count > 0 {
                    let i = self
                        .alert_list_state
                        .selected()
                        .map_or(count - 1, |i| if i == 0 { count - 1 } else { i - 1 });
                    self.alert_list_state.select(Some(i));
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let latest_summary = self.summary.and_then(SummaryService::latest);
        render_header(frame, self.snapshot.as_ref(), latest_summary.as_ref(), header_area);

        let [left_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .areas(body_area);
        let [fleet_area, alert_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(left_area);

        let snapshot = self.snapshot.clone().unwrap_or_else(|| FleetSnapshot {
            tick: 0,
            taken_at: chrono::Utc::now(),
            devices: Vec::new(),
            active_alerts: Vec::new(),
            thresholds: ThresholdConfig::default(),
            dismissed_count: 0,
        });
        let visible = self.view.apply(&snapshot.devices);
        let selected = self
            .table_state
            .selected()
            .and_then(|i| visible.get(i).copied())
            .or_else(|| visible.first().copied());

        render_fleet_table(
            frame,
            &visible,
            &snapshot.thresholds,
            &self.view,
            &mut self.table_state,
            self.active_panel == ActivePanel::Fleet,
            fleet_area,
        );
        render_alert_panel(
            frame,
            &snapshot.active_alerts,
            snapshot.dismissed_count,
            &mut self.alert_list_state,
            self.active_panel == ActivePanel::Alerts,
            alert_area,
        );
        render_device_detail(
            frame,
            selected,
            selected.map_or(0, |d| snapshot.alerts_for(d.id).len()),
            &snapshot.thresholds,
            detail_area,
        );

        self.render_status_bar(frame, status_area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let bar = if self.input_mode == InputMode::Search {
            Line::from(vec![
                Span::styled(" /", key_style),
                Span::raw(format!("{}▏", self.view.search)),
                Span::raw("  Enter:keep  Esc:clear"),
            ])
        } else if let Some(message) = &self.status_line {
            Line::from(vec![Span::raw(" "), Span::raw(message.clone())])
        } else {
            let mut spans = Vec::new();
            for (key, label) in [
                ("q", "quit"),
                ("Tab", "panel"),
                ("j/k", "nav"),
                ("s", "sort"),
                ("o", "order"),
                ("f", "filter"),
                ("/", "search"),
                ("d", "dismiss"),
                ("+/-", "cpu"),
                ("]/[", "ram"),
                (">/<", "sustain"),
            ] {
                spans.push(Span::styled(format!(" {key}"), key_style));
                spans.push(Span::raw(format!(":{label}")));
            }
            Line::from(spans)
        };

        frame.render_widget(
            Paragraph::new(bar).style(Style::default().bg(Color::DarkGray)),
            area,
        );
    }
}

fn sustain_of(thresholds: ThresholdConfig) -> i64 {
    i64::try_from(thresholds.sustain_secs()).unwrap_or(i64::MAX)
}

fn clamp(state: &mut TableState, count: usize) {
    if let Some(sel) = state.selected() {
        if count == 0 {
            state.select(None);
        } else if sel >= count {
            state.select(Some(count - 1));
        }
    }
}

fn step_down(state: &mut TableState, count: usize) {
    if count > 0 {
        let i = state
            .selected()
            .map_or(0, |i| if i >= count - 1 { 0 } else { i + 1 });
        state.select(Some(i));
    }
}

fn step_up(state: &mut TableState, count: usize) {
    if count > 0 {
        let i = state
            .selected()
            .map_or(count - 1, |i| if i == 0 { count - 1 } else { i - 1 });
        state.select(Some(i));
    }
}

/// Restore the terminal to its normal state.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        eprintln!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        eprintln!("Failed to leave alternate screen: {e}");
    }
}

/// Launch the interactive dashboard. The dashboard drives the monitor's
/// ticks itself, once per sample period.
///
/// # Errors
///
/// Returns an error if terminal setup, rendering, or event handling fails.
pub fn run_tui(monitor: &MonitorService, summary: Option<&SummaryService>) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        // Raw mode was enabled but alternate screen failed, restore before returning
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    // Install panic hook so terminal is restored even on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(monitor, summary);
    app.refresh_data();

    let result = run_app_loop(&mut terminal, &mut app);

    // Restore terminal on normal exit
    restore_terminal();
    let _ = terminal.show_cursor();

    // Restore the default panic hook
    let _ = std::panic::take_hook();

    result
}

fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<'_>,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let timeout = app.tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
