//! File error types for loading and exporting documents
//!
//! Every [`FileError`] is recoverable: the session reports it in the status bar
//! and keeps whatever document and reveal state it had before the request.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading, decoding or writing a document file
#[derive(Debug, Error)]
pub enum FileError {
    /// The file (or its parent directory, when exporting) does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The OS refused to open the file
    #[error("access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    /// The file is larger than the load cap; nothing was decoded
    #[error("{} is {size} bytes, over the {limit} byte limit", path.display())]
    SizeExceeded { path: PathBuf, size: u64, limit: u64 },

    /// Neither UTF-8 nor the legacy fallback encoding could decode the bytes
    #[error("could not decode {} as UTF-8 or {fallback}", path.display())]
    DecodeFailure { path: PathBuf, fallback: String },

    /// The load was superseded by a newer request before it finished
    #[error("loading {} was cancelled", path.display())]
    Cancelled { path: PathBuf },

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::AccessDenied { path },
            _ => FileError::Io { path, source: err },
        }
    }

    /// The path the failed operation was working on
    pub fn path(&self) -> &Path {
        match self {
            FileError::NotFound { path }
            | FileError::AccessDenied { path }
            | FileError::SizeExceeded { path, .. }
            | FileError::DecodeFailure { path, .. }
            | FileError::Cancelled { path }
            | FileError::Io { path, .. } => path,
        }
    }
}
