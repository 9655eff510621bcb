//! Encoding-aware file loading and UTF-8 export
//!
//! # Decoding order
//!
//! 1. Files over [`MAX_FILE_BYTES`] are rejected before any decoding.
//! 2. A leading UTF-8 BOM is stripped and the rest must be valid UTF-8.
//! 3. Without a BOM, UTF-8 is tried first.
//! 4. On failure the bytes are decoded with the legacy fallback: the configured
//!    encoding, or the one `chardetng` guesses. Malformed input is an error, never
//!    replaced with U+FFFD.
//!
//! Loading never touches session state; it returns a new [`Document`] or a
//! [`FileError`].

use super::{Document, FileError, SourceEncoding};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Hard cap on the size of a loadable file (50 MiB)
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const READ_CHUNK: usize = 64 * 1024;

/// Knobs for [`load`]
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Size cap in bytes
    pub max_bytes: u64,
    /// Encoding used when UTF-8 fails; `None` lets `chardetng` guess
    pub fallback: Option<&'static Encoding>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            max_bytes: MAX_FILE_BYTES,
            fallback: None,
        }
    }
}

/// Shared flag used to abandon an in-flight load
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Read and decode the file at `path`.
///
/// The read happens in chunks; `cancel` is checked between them and a
/// cancelled load returns [`FileError::Cancelled`].
pub fn load(path: &Path, options: &LoadOptions, cancel: &CancelToken) -> Result<Document, FileError> {
    let bytes = read_capped(path, options.max_bytes, cancel)?;
    let (text, encoding) = decode(&bytes, options.fallback).ok_or_else(|| FileError::DecodeFailure {
        path: path.to_path_buf(),
        fallback: options
            .fallback
            .map(|encoding| encoding.name().to_string())
            .unwrap_or_else(|| "a detected legacy encoding".to_string()),
    })?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        encoding = encoding.name(),
        "loaded document"
    );
    Ok(Document::new(text, path.to_path_buf(), encoding))
}

/// Read at most `max_bytes` bytes from `path`, failing with
/// [`FileError::SizeExceeded`] if the file is bigger.
fn read_capped(path: &Path, max_bytes: u64, cancel: &CancelToken) -> Result<Vec<u8>, FileError> {
    let file = File::open(path).map_err(|err| FileError::from_io(path, err))?;
    let metadata = file.metadata().map_err(|err| FileError::from_io(path, err))?;
    if metadata.len() > max_bytes {
        return Err(size_exceeded(path, metadata.len(), max_bytes));
    }

    // The file may grow between metadata() and the read, so the cap is enforced
    // again on what actually comes back.
    let mut reader = file.take(max_bytes + 1);
    let mut bytes = Vec::with_capacity(metadata.len() as usize);
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        if cancel.is_cancelled() {
            debug!(path = %path.display(), "load cancelled");
            return Err(FileError::Cancelled {
                path: path.to_path_buf(),
            });
        }
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FileError::from_io(path, err)),
        };
        bytes.extend_from_slice(&chunk[..n]);
    }

    if bytes.len() as u64 > max_bytes {
        return Err(size_exceeded(path, bytes.len() as u64, max_bytes));
    }
    Ok(bytes)
}

fn size_exceeded(path: &Path, size: u64, limit: u64) -> FileError {
    FileError::SizeExceeded {
        path: path.to_path_buf(),
        size,
        limit,
    }
}

/// Decode raw file bytes, returning the text and the encoding that worked.
///
/// Returns `None` when both UTF-8 and the fallback fail.
pub fn decode(bytes: &[u8], fallback: Option<&'static Encoding>) -> Option<(String, SourceEncoding)> {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return std::str::from_utf8(rest)
            .ok()
            .map(|text| (text.to_string(), SourceEncoding::Utf8Bom));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some((text.to_string(), SourceEncoding::Utf8));
    }

    let encoding = fallback.unwrap_or_else(|| guess_legacy_encoding(bytes));
    debug!(encoding = encoding.name(), "UTF-8 decode failed, trying legacy encoding");
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text.into_owned(), SourceEncoding::Legacy(encoding)))
}

fn guess_legacy_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, false)
}

/// Write the whole document to `path` as UTF-8 with a leading BOM.
///
/// How much of the document has been revealed does not matter; the file
/// always gets the full text.
pub fn export(document: &Document, path: &Path) -> Result<(), FileError> {
    let text = document.text().as_bytes();
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
    bytes.extend_from_slice(&UTF8_BOM);
    bytes.extend_from_slice(text);

    fs::write(path, &bytes).map_err(|err| FileError::from_io(path, err))?;
    info!(path = %path.display(), bytes = bytes.len(), "exported document");
    Ok(())
}
