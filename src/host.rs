//! Capabilities the host shell supplies to the session
//!
//! The session never talks to a windowing toolkit directly. It pushes frames
//! into a [`Renderable`] and drives automatic playback through a
//! [`TimerSource`]; both are plain traits so tests can record what happened.

use crate::view::Style;

/// What a renderer receives after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFrame<'a> {
    /// `Document.text[0..cursor]`
    pub prefix: &'a str,
    pub style: Style,
}

/// Anything that can display a revealed prefix under a style
pub trait Renderable {
    fn present(&mut self, frame: RevealFrame<'_>);

    /// The code view's first visible line changed (user scroll)
    fn scroll_code_view(&mut self, _first_visible_line: usize) {}
}

/// Identifies the timer run a tick was fired by.
///
/// Every `start`/`stop` begins a new run, so a tick carrying an old stamp
/// belongs to a run that has since been cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickStamp(pub u64);

/// Periodic tick source driving automatic playback
pub trait TimerSource {
    fn start(&mut self);

    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Called by the dispatch loop when a tick is dequeued.
    ///
    /// Re-arms the source so it may enqueue the next tick, and returns whether
    /// `stamp` belongs to the current run.
    fn acknowledge(&mut self, stamp: TickStamp) -> bool;
}
