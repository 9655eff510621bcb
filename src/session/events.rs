//! Events delivered to the dispatch loop, and background load requests

use super::keymap::{Command, KeyInput};
use crate::document::{self, CancelToken, Document, FileError, LoadOptions};
use crate::host::TickStamp;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// One entry in the dispatch queue
#[derive(Debug)]
pub enum Event {
    /// Timer firing
    Tick(TickStamp),
    /// Key press from the host
    Key(KeyInput),
    /// Command issued directly (menu, button, script)
    Command(Command),
    /// The code view's first visible line changed
    CodeScrolled(usize),
    /// A background load finished
    Loaded {
        generation: u64,
        result: Result<Document, FileError>,
    },
}

/// A load to be performed off the dispatch thread.
///
/// The result comes back as [`Event::Loaded`] tagged with `generation`; the
/// session drops results whose generation is no longer current.
#[derive(Debug)]
pub struct LoadRequest {
    generation: u64,
    path: PathBuf,
    options: LoadOptions,
    cancel: CancelToken,
}

impl LoadRequest {
    pub(crate) fn new(generation: u64, path: PathBuf, options: LoadOptions, cancel: CancelToken) -> Self {
        LoadRequest {
            generation,
            path,
            options,
            cancel,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform the load on the current thread
    pub fn run(self) -> Event {
        let result = document::load(&self.path, &self.options, &self.cancel);
        Event::Loaded {
            generation: self.generation,
            result,
        }
    }

    /// Perform the load on a worker thread and hand the result to `deliver`
    pub fn spawn<F>(self, deliver: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce(Event) + Send + 'static,
    {
        thread::Builder::new()
            .name("typeout-loader".to_string())
            .spawn(move || deliver(self.run()))
    }
}
