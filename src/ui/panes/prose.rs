//! Prose pane: the revealed text as a wrapped document, caret kept in view
//!
//! Only the tail of the prefix that can reach the screen is laid out. The
//! scroll offset comes from wrapping that exact paragraph, caret included, so
//! the last row on screen is always the caret's row.

use super::{char_width, display_line, CARET};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Suffix of `line` no wider than `budget` columns, and its width
fn line_suffix(line: &str, budget: usize) -> (&str, usize) {
    let mut cols = 0;
    for (idx, c) in line.char_indices().rev() {
        let w = char_width(c);
        if cols + w > budget {
            return (&line[idx + c.len_utf8()..], cols);
        }
        cols += w;
    }
    (line, cols)
}

/// The trailing lines of `text` that can fill `rows` rows of `width` columns.
///
/// A wrapped row holds at most `width` columns, so a line `w` columns wide
/// takes at least `ceil(w / width)` rows. Lines are taken from the end until
/// that lower bound covers the pane; a line wider than the whole pane keeps
/// only its last `rows * width` columns.
fn visible_tail(text: &str, width: usize, rows: usize) -> Vec<String> {
    let width = width.max(1);
    let rows = rows.max(1);
    let budget = rows * width;
    let mut tail = Vec::new();
    let mut covered = 0;
    for line in text.rsplit('\n') {
        let (shown, cols) = line_suffix(line, budget);
        tail.push(display_line(shown));
        covered += cols.max(1).div_ceil(width);
        if covered >= rows {
            break;
        }
    }
    tail.reverse();
    tail
}

/// Render the prose view of `text`
pub fn render_prose_pane(frame: &mut Frame, area: Rect, text: &str, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused))
        .style(
            Style::default()
                .bg(DEFAULT_THEME.paper_bg)
                .fg(DEFAULT_THEME.paper_fg),
        );

    if text.is_empty() {
        let hint = Paragraph::new(Line::from(vec![
            Span::styled(CARET, Style::default().fg(DEFAULT_THEME.primary)),
            Span::styled(
                " Nothing revealed yet. Type any key to advance, Ctrl+P to play.",
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2).max(1);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let rendered = visible_tail(text, inner_width as usize, visible_height);

    let last = rendered.len() - 1;
    let lines: Vec<Line> = rendered
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let mut spans = vec![Span::raw(line)];
            if idx == last {
                spans.push(Span::styled(
                    CARET,
                    Style::default()
                        .fg(DEFAULT_THEME.primary)
                        .add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(inner_width);
    let scroll = rows.saturating_sub(visible_height).min(u16::MAX as usize) as u16;

    frame.render_widget(paragraph.block(block).scroll((scroll, 0)), area);
}
