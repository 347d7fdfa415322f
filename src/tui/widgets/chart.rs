//! Bar chart widget for the TUI.
//!
//! Renders page chart data as a horizontal bar chart, one terminal row
//! per bar, with the formatted value printed on the bar itself.

use crate::pages::ChartData;
use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
};
use std::time::Duration;

/// Maximum width for bar labels.
const MAX_LABEL_WIDTH: usize = 20;

/// Bar lengths are drawn from integers; scaling by 100 keeps sub-unit
/// differences between small values visible.
const VALUE_SCALE: f64 = 100.0;

/// Widget for rendering a page's chart data.
pub struct ChartPanel<'a> {
    chart: &'a ChartData,
    rows: usize,
    took: Duration,
}

impl<'a> ChartPanel<'a> {
    /// Creates a new chart panel widget.
    pub fn new(chart: &'a ChartData, rows: usize, took: Duration) -> Self {
        Self { chart, rows, took }
    }

    /// Builds the bars for the underlying chart widget.
    fn bars(&self) -> Vec<Bar<'a>> {
        self.chart
            .bars
            .iter()
            .map(|bar| {
                Bar::default()
                    .value(scale_value(bar.value))
                    .label(Line::from(truncate_label(&bar.label, MAX_LABEL_WIDTH)))
                    .text_value(format!(
                        "{} {}",
                        format_amount(bar.value),
                        self.chart.value_suffix
                    ))
            })
            .collect()
    }

    /// Footer line with row count and execution time.
    fn footer(&self) -> String {
        format!(
            " {} row{} in {}ms ",
            self.rows,
            if self.rows == 1 { "" } else { "s" },
            self.took.as_millis()
        )
    }
}

impl Widget for ChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::from(format!(" {} ", self.chart.title)))
            .title_bottom(
                Line::from(Span::styled(
                    self.footer(),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            );

        if self.chart.bars.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            let line = Line::from(Span::styled(
                "(no data)",
                Style::default().fg(Color::DarkGray),
            ));
            if inner.height > 0 {
                buf.set_line(inner.x + 1, inner.y, &line, inner.width);
            }
            return;
        }

        let bars = self.bars();
        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(Color::White))
            .data(BarGroup::default().bars(&bars));

        chart.render(area, buf);
    }
}

/// Truncates a label to fit within the given width, adding an ellipsis if needed.
fn truncate_label(label: &str, max_width: usize) -> String {
    if label.chars().count() <= max_width {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max_width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Scales a chart value to the integer range bars are drawn from.
fn scale_value(value: f64) -> u64 {
    (value.max(0.0) * VALUE_SCALE).round() as u64
}

/// Formats a value for display next to its bar.
///
/// Whole units with digit grouping from 1000 up, two decimals below.
fn format_amount(value: f64) -> String {
    if value >= 1000.0 {
        group_digits(value.round() as u64)
    } else {
        format!("{value:.2}")
    }
}

/// Inserts thousands separators into a non-negative integer.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
