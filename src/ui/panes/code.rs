//! Code pane: monospaced text beside a line-number gutter
//!
//! The gutter and the text are two separate paragraphs. The text is scrolled
//! to `first_visible_line`; the gutter is scrolled to `gutter_offset`, which
//! the render adapter keeps equal to it, so the numbers always line up.

use super::{display_line, highlight::highlight_line, CARET};
use crate::document::Language;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::LineLabels;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the code pane needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct CodeRenderData<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub labels: LineLabels,
    pub first_visible_line: usize,
    pub gutter_offset: usize,
    pub language: Language,
}

/// Columns used by the gutter: the widest label, at least 3 digits, plus padding
pub fn gutter_width(labels: LineLabels) -> u16 {
    let digits = labels.count().to_string().len().max(3);
    (digits + 2).min(u16::MAX as usize) as u16
}

/// Text rows that fit in a code pane drawn in `area`
pub fn text_rows(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Render the code view
pub fn render_code_pane(frame: &mut Frame, area: Rect, data: CodeRenderData<'_>) {
    let block = Block::default()
        .title(format!(" {} ", data.title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(DEFAULT_THEME.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = text_rows(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(gutter_width(data.labels)), Constraint::Min(0)])
        .split(inner);

    let width = gutter_width(data.labels).saturating_sub(2) as usize;
    let current = data.labels.count();
    let gutter: Vec<Line> = data
        .labels
        .iter()
        .skip(data.gutter_offset)
        .take(visible_height)
        .map(|n| {
            let style = if n == current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.gutter)
            };
            Line::from(Span::styled(format!("{:>width$}  ", n, width = width), style))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(gutter).style(Style::default().bg(DEFAULT_THEME.status_bg)),
        columns[0],
    );

    let last = current - 1;
    let code: Vec<Line> = data
        .text
        .split('\n')
        .enumerate()
        .skip(data.first_visible_line)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut line = highlight_line(&display_line(line), data.language);
            if idx == last {
                line.spans.push(Span::styled(
                    CARET,
                    Style::default()
                        .fg(DEFAULT_THEME.caret)
                        .add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            line
        })
        .collect();
    frame.render_widget(Paragraph::new(code), columns[1]);
}
