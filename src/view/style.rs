//! Presentation style selection

use std::fmt;

/// The two mutually exclusive ways of presenting the revealed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Style {
    /// Continuous, word-processor-like text
    #[default]
    Prose,
    /// Monospaced text with a line-number gutter
    Code,
}

impl Style {
    pub fn other(self) -> Self {
        match self {
            Style::Prose => Style::Code,
            Style::Code => Style::Prose,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Style::Prose => "Prose",
            Style::Code => "Code",
        })
    }
}

/// Holds the active style and nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSelector {
    active: Style,
}

impl StyleSelector {
    pub fn new(active: Style) -> Self {
        StyleSelector { active }
    }

    pub fn active(&self) -> Style {
        self.active
    }

    /// Switch to `style`. Returns `false` when it was already active.
    pub fn select(&mut self, style: Style) -> bool {
        if self.active == style {
            return false;
        }
        self.active = style;
        true
    }

    /// Switch to the other style
    pub fn toggle(&mut self) -> Style {
        self.active = self.active.other();
        self.active
    }
}
