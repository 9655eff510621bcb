//! Presentation styles and the renderer adapter
//!
//! - [`style`]: [`Style`] and the [`StyleSelector`] that holds the active one
//! - [`adapter`]: [`RenderAdapter`], turning (prefix, style) into a [`ViewModel`]

pub mod adapter;
pub mod style;

pub use adapter::{line_count, LineLabels, RenderAdapter, ViewModel};
pub use style::{Style, StyleSelector};
