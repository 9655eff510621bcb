//! Non-fatal rejections of reveal requests

use thiserror::Error;

/// Why a reveal request was ignored.
///
/// Notices never change state; the session shows them in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("no document loaded")]
    NoDocument,

    #[error("document is empty")]
    EmptyDocument,

    #[error("already playing")]
    AlreadyPlaying,

    #[error("not playing")]
    NotPlaying,

    #[error("not paused")]
    NotPaused,
}
