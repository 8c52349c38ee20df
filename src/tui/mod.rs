//! Ratatui-based terminal dashboard.
//!
//! Shows the mounted charts of one page: the donation trends line chart with
//! its period controls, monthly donations, sources, campaigns and the KPI
//! sparklines. `w`/`m`/`y` (or ←/→) switch the trend period.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, Paragraph, Sparkline},
};

use crate::chart::{ChartConfig, Rgba, canvas, format_currency, format_tooltip};
use crate::dashboard::{ChartRegistry, Dashboard};
use crate::domain::Period;
use crate::error::AppError;
use crate::io::Page;

mod plotters_chart;

use plotters_chart::TrendPlottersChart;

/// Start the TUI on `page`, optionally with the trend chart on `period`.
pub fn run(page: &Page, period: Option<Period>) -> Result<(), AppError> {
    let mut app = App::new(Dashboard::mount(page, ChartRegistry::new()));
    if let Some(period) = period {
        app.switch(period.control_arg());
    }

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)?;
    app.dashboard.unmount();
    Ok(())
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    dashboard: Dashboard<ChartRegistry>,
    status: String,
}

impl App {
    fn new(dashboard: Dashboard<ChartRegistry>) -> Self {
        let status = format!("{} charts mounted", dashboard.backend().len());
        Self { dashboard, status }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('w') => self.switch("week"),
            KeyCode::Char('m') => self.switch("month"),
            KeyCode::Char('y') => self.switch("year"),
            KeyCode::Left => self.step_control(-1),
            KeyCode::Right => self.step_control(1),
            _ => {}
        }
        false
    }

    fn switch(&mut self, period: &str) {
        if self.dashboard.active_state().is_none() {
            self.status = "No trend chart on this page.".to_string();
            return;
        }
        self.dashboard.switch_chart_period(period);
        self.status = match self.dashboard.active_state().and_then(|s| s.title.clone()) {
            Some(title) => format!("showing {title}"),
            None => format!("period: {period}"),
        };
    }

    /// Move to the previous/next period control, wrapping around.
    fn step_control(&mut self, delta: isize) {
        let args: Vec<String> = self.dashboard.controls().iter().map(|c| c.arg.clone()).collect();
        if args.is_empty() {
            return;
        }
        let current = self
            .dashboard
            .controls()
            .active()
            .and_then(|a| args.iter().position(|x| x == a))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(args.len() as isize) as usize;
        self.switch(&args[next]);
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_sparklines(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("charts", Style::default().fg(Color::Cyan)),
            Span::raw(" | period: "),
        ];
        for control in self.dashboard.controls().iter() {
            let style = if control.is_active() {
                Style::default().fg(Color::Black).bg(Color::LightBlue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", control.arg), style));
            spans.push(Span::raw(" "));
        }
        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        self.draw_trends(frame, cols[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(cols[1]);
        self.draw_monthly(frame, rows[0]);
        self.draw_sources(frame, rows[1]);
        self.draw_campaigns(frame, rows[2]);
    }

    fn chart(&self, canvas_id: &str) -> Option<&ChartConfig> {
        self.dashboard.backend().by_canvas(canvas_id).map(|c| &c.config)
    }

    fn draw_trends(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let config = self.chart(canvas::DONATION_TRENDS);
        let title = config.and_then(|c| c.title()).unwrap_or("Donations");
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match config {
            Some(config) => frame.render_widget(TrendPlottersChart::from_config(config), inner),
            None => placeholder(frame, inner),
        }
    }

    fn draw_monthly(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Monthly Donations").borders(Borders::ALL);
        let Some(config) = self.chart(canvas::MONTHLY_DONATIONS) else {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            placeholder(frame, inner);
            return;
        };

        let data: Vec<(&str, u64)> = config
            .data
            .labels
            .iter()
            .zip(config.data.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[]))
            .map(|(label, &v)| (label.as_str(), to_bar_value(v)))
            .collect();
        let bars = BarChart::default()
            .block(block)
            .bar_width(4)
            .bar_gap(1)
            .bar_style(Style::default().fg(tui_color(crate::chart::BLUE)))
            .data(data.as_slice());
        frame.render_widget(bars, area);
    }

    fn draw_sources(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        if let Some(config) = self.chart(canvas::DONATION_SOURCES) {
            if let Some(ds) = config.data.datasets.first() {
                for (i, label) in config.data.labels.iter().enumerate() {
                    let v = ds.data.get(i).copied().unwrap_or(f64::NAN);
                    let text = format_tooltip(
                        crate::chart::TooltipFormat::ShareOfTotal,
                        None,
                        label,
                        v,
                        &ds.data,
                    );
                    items.push(ListItem::new(text).style(Style::default().fg(tui_color(ds.border_color.at(i)))));
                }
            }
        }
        if items.is_empty() {
            items.push(ListItem::new("No data").style(Style::default().fg(Color::Yellow)));
        }
        let list = List::new(items).block(Block::default().title("Donation Sources").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_campaigns(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        if let Some(config) = self.chart(canvas::CAMPAIGN_PERFORMANCE) {
            let raised = config.data.datasets.first();
            let goals = config.data.datasets.get(1);
            for (i, label) in config.data.labels.iter().enumerate() {
                let r = raised.and_then(|d| d.data.get(i)).copied().unwrap_or(f64::NAN);
                let g = goals.and_then(|d| d.data.get(i)).copied().unwrap_or(f64::NAN);
                items.push(ListItem::new(format!(
                    "{label}: {} / {}",
                    format_currency(r),
                    format_currency(g)
                )));
            }
        }
        if items.is_empty() {
            items.push(ListItem::new("No data").style(Style::default().fg(Color::Yellow)));
        }
        let list = List::new(items).block(Block::default().title("Campaigns (raised / goal)").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_sparklines(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let cards = [
            (canvas::DONATIONS_SPARKLINE, "Donations"),
            (canvas::CAMPAIGNS_SPARKLINE, "Campaigns"),
            (canvas::DONORS_SPARKLINE, "Donors"),
        ];
        for ((id, title), rect) in cards.into_iter().zip(cols.iter()) {
            let block = Block::default().title(title).borders(Borders::ALL);
            let Some(config) = self.chart(id) else {
                let inner = block.inner(*rect);
                frame.render_widget(block, *rect);
                placeholder(frame, inner);
                continue;
            };
            let ds = config.data.datasets.first();
            let data: Vec<u64> = ds
                .map(|d| d.data.iter().map(|&v| to_bar_value(v)).collect())
                .unwrap_or_default();
            let color = ds.map(|d| tui_color(d.border_color.at(0))).unwrap_or(Color::Gray);
            let spark = Sparkline::default()
                .block(block)
                .data(&data)
                .style(Style::default().fg(color));
            frame.render_widget(spark, *rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "w week  m month  y year  ←/→ cycle  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(Text::from(line)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn placeholder(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let msg = Paragraph::new("Not on this page").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(msg, area);
}

fn tui_color(c: Rgba) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Terminal bar widgets take unsigned heights; gaps and negatives draw empty.
fn to_bar_value(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 { v.round() as u64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let page = Page::from_html(
            r#"<button onclick="switchChartPeriod('week')"></button>
               <button onclick="switchChartPeriod('month')"></button>
               <button onclick="switchChartPeriod('year')"></button>
               <canvas id="donationChart"></canvas>"#,
        );
        App::new(Dashboard::mount(&page, ChartRegistry::new()))
    }

    #[test]
    fn keys_switch_periods() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('y')));
        assert_eq!(app.dashboard.controls().active(), Some("year"));
        assert_eq!(app.status, "showing Yearly Donations");
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn arrows_cycle_controls_with_wraparound() {
        let mut app = app();
        app.handle_key(KeyCode::Left);
        assert_eq!(app.dashboard.controls().active(), Some("year"));
        app.handle_key(KeyCode::Right);
        assert_eq!(app.dashboard.controls().active(), Some("week"));
        app.handle_key(KeyCode::Right);
        assert_eq!(app.dashboard.controls().active(), Some("month"));
    }

    #[test]
    fn bar_values_clamp_gaps() {
        assert_eq!(to_bar_value(f64::NAN), 0);
        assert_eq!(to_bar_value(-3.0), 0);
        assert_eq!(to_bar_value(2.6), 3);
    }
}
