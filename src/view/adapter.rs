//! Maps (revealed prefix, style) to a display model
//!
//! [`RenderAdapter`] is the [`Renderable`] the session notifies after every
//! mutation. It keeps the latest prefix and derives a [`ViewModel`] for the
//! active style on demand:
//!
//! - **Prose**: the prefix verbatim, no line index
//! - **Code**: the prefix plus line labels `1..=N` (N = line breaks + 1) and a
//!   gutter offset that always equals the code view's first visible line
//!
//! Scroll synchronization runs one way only: the code view reports its first
//! visible line through [`Renderable::scroll_code_view`] and the gutter
//! follows. Nothing moves the code view from the gutter side.

use super::Style;
use crate::host::{RevealFrame, Renderable};
use std::ops::RangeInclusive;
use tracing::trace;

/// Number of lines in `prefix`: one more than its line breaks
pub fn line_count(prefix: &str) -> usize {
    prefix.bytes().filter(|&b| b == b'\n').count() + 1
}

/// The gutter's label sequence `1..=count`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLabels {
    count: usize,
}

impl LineLabels {
    pub fn for_prefix(prefix: &str) -> Self {
        LineLabels {
            count: line_count(prefix),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        1..=self.count
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

/// Display model for the active style, built once per render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewModel<'a> {
    Prose {
        text: &'a str,
    },
    Code {
        text: &'a str,
        labels: LineLabels,
        /// First line shown in the code view (0-based)
        first_visible_line: usize,
        /// Vertical offset of the gutter; equal to `first_visible_line`
        gutter_offset: usize,
    },
}

impl ViewModel<'_> {
    pub fn text(&self) -> &str {
        match self {
            ViewModel::Prose { text } | ViewModel::Code { text, .. } => text,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            ViewModel::Prose { .. } => Style::Prose,
            ViewModel::Code { .. } => Style::Code,
        }
    }
}

/// Keeps the last presented frame and the code view's scroll position
#[derive(Debug, Clone, Default)]
pub struct RenderAdapter {
    text: String,
    style: Style,
    labels: Option<LineLabels>,
    first_visible_line: usize,
    gutter_offset: usize,
    frames: u64,
}

impl RenderAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many frames have been presented
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn view(&self) -> ViewModel<'_> {
        match (self.style, self.labels) {
            (Style::Code, Some(labels)) => ViewModel::Code {
                text: &self.text,
                labels,
                first_visible_line: self.first_visible_line,
                gutter_offset: self.gutter_offset,
            },
            _ => ViewModel::Prose { text: &self.text },
        }
    }

    /// Clamp the code view to the current labels and pull the gutter along
    fn realign_gutter(&mut self) {
        if let Some(labels) = self.labels {
            self.first_visible_line = self.first_visible_line.min(labels.count() - 1);
        } else {
            self.first_visible_line = 0;
        }
        self.gutter_offset = self.first_visible_line;
    }
}

impl Renderable for RenderAdapter {
    fn present(&mut self, frame: RevealFrame<'_>) {
        self.text.clear();
        self.text.push_str(frame.prefix);
        self.style = frame.style;
        self.labels = match frame.style {
            Style::Code => Some(LineLabels::for_prefix(frame.prefix)),
            Style::Prose => None,
        };
        self.realign_gutter();
        self.frames += 1;
    }

    fn scroll_code_view(&mut self, first_visible_line: usize) {
        if self.labels.is_none() {
            trace!("ignoring code scroll outside code style");
            return;
        }
        self.first_visible_line = first_visible_line;
        self.realign_gutter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(adapter: &mut RenderAdapter, prefix: &str, style: Style) {
        adapter.present(RevealFrame { prefix, style });
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("abc"), 1);
        assert_eq!(line_count("ab\n"), 2);
        assert_eq!(line_count("a\r\nb\nc"), 3);
    }

    #[test]
    fn test_code_labels() {
        let mut adapter = RenderAdapter::new();
        present(&mut adapter, "ab\ncd", Style::Code);
        match adapter.view() {
            ViewModel::Code { labels, text, .. } => {
                assert_eq!(labels.to_vec(), vec![1, 2]);
                assert_eq!(text, "ab\ncd");
            }
            other => panic!("expected code view, got {:?}", other),
        }
    }

    #[test]
    fn test_prose_has_no_line_index() {
        let mut adapter = RenderAdapter::new();
        present(&mut adapter, "ab\ncd", Style::Prose);
        assert_eq!(adapter.view(), ViewModel::Prose { text: "ab\ncd" });
        assert_eq!(adapter.view().style(), Style::Prose);
    }

    #[test]
    fn test_gutter_follows_code_scroll() {
        let mut adapter = RenderAdapter::new();
        present(&mut adapter, "1\n2\n3\n4\n5", Style::Code);
        adapter.scroll_code_view(3);
        match adapter.view() {
            ViewModel::Code {
                first_visible_line,
                gutter_offset,
                ..
            } => {
                assert_eq!(first_visible_line, 3);
                assert_eq!(gutter_offset, 3);
            }
            other => panic!("expected code view, got {:?}", other),
        }

        // Past the last line clamps
        adapter.scroll_code_view(40);
        assert!(matches!(adapter.view(), ViewModel::Code { gutter_offset: 4, .. }));
    }

    #[test]
    fn test_shrinking_prefix_clamps_scroll() {
        let mut adapter = RenderAdapter::new();
        present(&mut adapter, "1\n2\n3", Style::Code);
        adapter.scroll_code_view(2);
        present(&mut adapter, "1\n2", Style::Code);
        assert!(matches!(
            adapter.view(),
            ViewModel::Code {
                first_visible_line: 1,
                gutter_offset: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_scroll_ignored_in_prose() {
        let mut adapter = RenderAdapter::new();
        present(&mut adapter, "1\n2\n3", Style::Prose);
        adapter.scroll_code_view(2);
        present(&mut adapter, "1\n2\n3", Style::Code);
        assert!(matches!(adapter.view(), ViewModel::Code { gutter_offset: 0, .. }));
        assert_eq!(adapter.frames(), 2);
    }
}
