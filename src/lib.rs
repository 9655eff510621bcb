//! # Introduction
//!
//! typeout reveals a text or source file one character at a time, either on a
//! timer or one keystroke at a time, in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui). The revealed prefix is shown either as
//! flowing prose or as code with a line-number gutter.
//!
//! ## Pipeline
//!
//! ```text
//! File → Loader → Document → RevealMachine → Session → RenderAdapter → TUI
//! ```
//!
//! 1. [`document`]: bounded, encoding-aware loading (BOM, UTF-8, legacy
//!    fallback), language tagging and UTF-8+BOM export.
//! 2. [`reveal`]: the reveal state machine. Pure; it returns the timer
//!    command each transition needs instead of touching a timer.
//! 3. [`session`]: the single dispatch point. Applies timer commands, drops
//!    stale ticks and stale loads, notifies the renderer after each change.
//! 4. [`view`]: style selection and the prefix → view model adapter.
//! 5. [`host`]: the two capabilities a host provides, [`host::Renderable`]
//!    and [`host::TimerSource`].
//! 6. [`ui`]: the ratatui host; not part of the stable library API.
//!
//! [`config`] and [`logging`] hold the command-line surface and the
//! `tracing` setup.

pub mod config;
pub mod document;
pub mod host;
pub mod logging;
pub mod reveal;
pub mod session;
pub mod ui;
pub mod view;
