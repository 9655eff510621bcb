//! Centralized color palette used by all panes

use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub border_focused: Color,
    pub status_bg: Color,
    pub gutter: Color,
    pub caret: Color,
    pub paper_bg: Color, // Prose page
    pub paper_fg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 30),
    fg: Color::Rgb(212, 212, 212),
    primary: Color::Rgb(86, 156, 214),    // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 117, 125),
    success: Color::Rgb(52, 199, 89),
    border_focused: Color::Rgb(102, 126, 234), // Sidebar violet
    status_bg: Color::Rgb(45, 45, 48),
    gutter: Color::Rgb(133, 133, 133),
    caret: Color::Rgb(174, 175, 173),
    paper_bg: Color::Rgb(248, 249, 250),
    paper_fg: Color::Rgb(73, 80, 87),
};
