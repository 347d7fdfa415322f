//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, PageView};
use super::widgets::{chart::ChartPanel, header::Header};
use crate::pages::PageId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs, Wrap},
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, tabs, page content, key hints
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Page tabs
            Constraint::Min(3),    // Page content
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_tabs(frame, main_layout[1], app);
    render_page(frame, main_layout[2], app);
    render_hints(frame, main_layout[3]);
}

/// Renders the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = Header::new(
        app.connection_info.as_deref(),
        app.busy.as_ref(),
        app.connected,
    );
    frame.render_widget(widget, area);
}

/// Renders the page tab bar.
fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = PageId::ALL
        .iter()
        .map(|page| Line::from(format!(" {} {} ", page.index() + 1, page.spec().title)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}

/// Renders the active page's content.
fn render_page(frame: &mut Frame, area: Rect, app: &App) {
    let page = app.active_page();
    let spec = page.spec();

    match app.view(page) {
        PageView::Idle => {
            let lines = vec![
                Line::from(spec.intro),
                Line::from(""),
                Line::from(Span::styled(
                    format!("[Enter] {}", spec.trigger_label),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            render_page_text(frame, area, spec.title, lines);
        }
        PageView::Running => {
            let status = app
                .busy
                .as_ref()
                .map(|spinner| spinner.display())
                .unwrap_or_else(|| "Running query".to_string());
            let lines = vec![
                Line::from(spec.intro),
                Line::from(""),
                Line::from(Span::styled(status, Style::default().fg(Color::Yellow))),
            ];
            render_page_text(frame, area, spec.title, lines);
        }
        PageView::Chart { data, rows, took } => {
            let widget = ChartPanel::new(data, *rows, *took);
            frame.render_widget(widget, area);
        }
        PageView::NoResult => {
            let lines = vec![
                Line::from(Span::styled(
                    "No query result.",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Check the log file for details, then press Enter to try again.",
                    Style::default().fg(Color::Gray),
                )),
            ];
            render_page_text(frame, area, spec.title, lines);
        }
    }
}

/// Renders text content inside the page's bordered block.
fn render_page_text(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let block = Block::bordered().title(Line::from(format!(" {} ", title)));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Renders the key hint line at the bottom.
fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        " Enter/r run query │ Tab/←/→ switch page │ q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}
