//! TUI pane rendering modules
//!
//! - [`prose`]: the flowing-document view, always scrolled to the caret
//! - [`code`]: the monospaced view with its line-number gutter
//! - [`status`]: mode badge, progress, last message and key hints
//! - [`highlight`]: per-line keyword highlighting used by the code view
//!
//! Each pane exports a stateless `render_*` function; scroll state lives in
//! the [`App`](super::App).

pub mod code;
pub mod highlight;
pub mod prose;
pub mod status;

pub use code::{render_code_pane, text_rows, CodeRenderData};
pub use prose::render_prose_pane;
pub use status::{render_status_bar, PromptLine, StatusRenderData};

use unicode_width::UnicodeWidthChar;

/// Caret drawn after the last revealed character
pub const CARET: &str = "▏";

const TAB_WIDTH: usize = 4;

/// Columns `c` takes once passed through [`display_line`]
pub fn char_width(c: char) -> usize {
    match c {
        '\r' => 0,
        '\t' => TAB_WIDTH,
        c if c.is_control() => 1,
        c => UnicodeWidthChar::width(c).unwrap_or(0),
    }
}

/// Terminal-safe form of one line: carriage returns dropped, tabs expanded
pub fn display_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\r' => {}
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            c if c.is_control() => out.push('·'),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_line() {
        assert_eq!(display_line("a\tb\r"), "a    b");
        assert_eq!(display_line("x\u{7}y"), "x·y");
        assert_eq!(display_line("héllo"), "héllo");
    }

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('中'), 2);
        assert_eq!(char_width('\t'), 4);
        assert_eq!(char_width('\r'), 0);
    }
}
