//! Immutable documents and the encoding-aware loader that produces them
//!
//! A [`Document`] is created only by [`loader`] and never mutated afterwards;
//! loading another file replaces it wholesale.
//!
//! - [`loader`]: size-capped, cancellable reads, BOM/UTF-8/legacy decoding, export
//! - [`language`]: extension → language label table
//! - [`errors`]: [`FileError`]

pub mod errors;
pub mod language;
pub mod loader;

pub use errors::FileError;
pub use language::Language;
pub use loader::{export, load, CancelToken, LoadOptions, MAX_FILE_BYTES};

use std::path::{Path, PathBuf};

/// The encoding a document's bytes were decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8 positively identified by a byte-order-mark (stripped)
    Utf8Bom,
    /// UTF-8 without a byte-order-mark
    Utf8,
    /// Legacy encoding used after UTF-8 decoding failed
    Legacy(&'static encoding_rs::Encoding),
}

impl SourceEncoding {
    pub fn name(self) -> &'static str {
        match self {
            SourceEncoding::Utf8Bom => "UTF-8 (BOM)",
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::Legacy(encoding) => encoding.name(),
        }
    }
}

/// A decoded file ready to be revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    char_len: usize,
    path: PathBuf,
    language: Language,
    encoding: SourceEncoding,
}

impl Document {
    pub(crate) fn new(text: String, path: PathBuf, encoding: SourceEncoding) -> Self {
        let language = Language::from_path(&path);
        let char_len = text.chars().count();
        Document {
            text,
            char_len,
            path,
            language,
            encoding,
        }
    }

    /// Build a document from text already in memory, tagging it as UTF-8.
    ///
    /// The language is still derived from `path`.
    pub fn from_text(text: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(text.into(), path.into(), SourceEncoding::Utf8)
    }

    /// Full decoded text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in code points; the upper bound of the reveal cursor
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the whole path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_code_points() {
        let doc = Document::from_text("héllo, 世界", "greeting.txt");
        assert_eq!(doc.len(), 9);
        assert!(doc.text().len() > doc.len());
        assert_eq!(doc.language(), Language::PlainText);
        assert_eq!(doc.file_name(), "greeting.txt");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::from_text("", "empty.py");
        assert!(doc.is_empty());
        assert_eq!(doc.language(), Language::Python);
        assert_eq!(doc.encoding().name(), "UTF-8");
    }
}
