//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: event loop, path prompt, code view scrolling
//! - **[`input`]**: crossterm key and mouse events → session input
//! - **[`panes`]**: stateless render functions for the prose view, the code
//!   view and the status bar
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point is [`App`]: construct it from a [`Config`] and call
//! [`App::run`] to start the event loop.
//!
//! [`Config`]: crate::config::Config
//! [`App::run`]: app::App::run

pub mod app;
pub mod input;
pub mod panes;
pub mod theme;

pub use app::App;
