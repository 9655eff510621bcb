//! Status bar rendering with keybindings and state indicators

use crate::reveal::RevealMode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A path being typed into the status bar
#[derive(Debug, Clone, Copy)]
pub struct PromptLine<'a> {
    pub label: &'a str,
    pub input: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct StatusRenderData<'a> {
    pub mode: Option<RevealMode>,
    /// Position, progress, style and language
    pub summary: &'a str,
    pub message: &'a str,
    pub loading: bool,
    pub prompt: Option<PromptLine<'a>>,
}

fn badge(data: &StatusRenderData<'_>) -> (&'static str, Color) {
    if data.loading {
        return (" LOADING ", DEFAULT_THEME.secondary);
    }
    match data.mode {
        None => (" EMPTY ", DEFAULT_THEME.comment),
        Some(RevealMode::Idle) => (" IDLE ", DEFAULT_THEME.primary),
        Some(RevealMode::Playing) => (" ▶ PLAYING ", DEFAULT_THEME.secondary),
        Some(RevealMode::Paused) => (" ⏸ PAUSED ", DEFAULT_THEME.primary),
        Some(RevealMode::Complete) => (" DONE ", DEFAULT_THEME.success),
    }
}

/// Render the status bar at the bottom.
///
/// While a prompt is open it takes over the whole bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData<'_>) {
    let bar = Style::default().bg(DEFAULT_THEME.status_bg);

    if let Some(prompt) = data.prompt {
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", prompt.label),
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", prompt.input), bar.fg(DEFAULT_THEME.fg)),
            Span::styled("█", bar.fg(DEFAULT_THEME.caret)),
            Span::styled("   ↵ confirm  esc cancel", bar.fg(DEFAULT_THEME.comment)),
        ]);
        frame.render_widget(Paragraph::new(line).style(bar), area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let (label, color) = badge(&data);
    let left = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", data.summary), bar.fg(DEFAULT_THEME.fg)),
        Span::styled("│", bar.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {} ", data.message), bar.fg(DEFAULT_THEME.comment)),
    ]);
    frame.render_widget(
        Paragraph::new(left).style(bar).alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let mut right = Vec::new();
    for (key, desc) in [
        ("any", "advance"),
        ("⌫", "back"),
        ("^P", "play"),
        ("^A", "all"),
        ("^R", "reset"),
        ("^T", "style"),
        ("^O", "open"),
        ("^S", "save"),
        ("esc", "quit"),
    ] {
        right.push(Span::styled(format!(" {} ", key), key_style));
        right.push(Span::styled(format!(" {} ", desc), desc_style));
    }
    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(bar)
            .alignment(Alignment::Right),
        layout[1],
    );
}
