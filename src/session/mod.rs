//! The dispatch point tying the core together
//!
//! A [`Session`] owns the [`RevealMachine`], the [`StyleSelector`], and the
//! host-supplied [`Renderable`] and [`TimerSource`]. Every event goes through
//! [`Session::handle`] on one thread, so the core needs no locks: ticks, keys,
//! scroll notifications and finished loads are applied strictly in the order
//! they were dequeued.
//!
//! A manual advance and a tick dequeued in the same cycle both apply; they are
//! not merged into one step.
//!
//! - [`keymap`]: key presses → [`Command`]s
//! - [`events`]: the [`Event`] queue entries and off-thread [`LoadRequest`]s
//! - [`timer`]: [`IntervalTimer`], the coalescing tick source

pub mod events;
pub mod keymap;
pub mod timer;

pub use events::{Event, LoadRequest};
pub use keymap::{command_for, Command, Key, KeyInput, ScrollDelta};
pub use timer::{IntervalTimer, TickGate, DEFAULT_INTERVAL};

use crate::document::{self, CancelToken, Document, FileError, LoadOptions};
use crate::host::{RevealFrame, Renderable, TimerSource};
use crate::reveal::{Notice, RevealMachine, RevealMode, TimerCommand, Transition};
use crate::view::{Style, StyleSelector};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// What the host has to do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    /// Ask the user for a file to open, then call [`Session::open`]
    PromptOpen,
    /// Ask the user for a destination, then call [`Session::export`]
    PromptExport,
    /// Move the code view; report the result as [`Event::CodeScrolled`]
    Scroll(ScrollDelta),
}

/// One viewer session: document, reveal progress, style and host capabilities
pub struct Session<R: Renderable, T: TimerSource> {
    machine: RevealMachine,
    selector: StyleSelector,
    renderer: R,
    timer: T,
    load_options: LoadOptions,
    load_generation: u64,
    in_flight: Option<CancelToken>,
    message: String,
}

impl<R: Renderable, T: TimerSource> Session<R, T> {
    pub fn new(renderer: R, timer: T, style: Style, load_options: LoadOptions) -> Self {
        let mut session = Session {
            machine: RevealMachine::new(),
            selector: StyleSelector::new(style),
            renderer,
            timer,
            load_options,
            load_generation: 0,
            in_flight: None,
            message: String::from("Open a file with Ctrl+O"),
        };
        session.notify();
        session
    }

    pub fn machine(&self) -> &RevealMachine {
        &self.machine
    }

    pub fn document(&self) -> Option<&Document> {
        self.machine.document()
    }

    pub fn style(&self) -> Style {
        self.selector.active()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Last informational message or notice
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Status line: mode, position, progress, style and language
    pub fn status_text(&self) -> String {
        match self.machine.document() {
            Some(doc) => format!(
                "{} | {}/{} chars ({}%) | {} | {}",
                self.machine.mode(),
                self.machine.cursor(),
                doc.len(),
                self.machine.percent(),
                self.selector.active(),
                doc.language(),
            ),
            None => format!("No document | {}", self.selector.active()),
        }
    }

    /// Apply one dequeued event
    pub fn handle(&mut self, event: Event) -> Control {
        match event {
            Event::Tick(stamp) => {
                if !self.timer.acknowledge(stamp) {
                    trace!(?stamp, "dropping tick from a cancelled timer run");
                    return Control::Continue;
                }
                let transition = self.machine.tick();
                if self.machine.mode() == RevealMode::Complete && transition.changed {
                    self.set_message("Reveal complete");
                }
                self.commit(transition);
                Control::Continue
            }
            Event::Key(input) => match command_for(input) {
                Some(command) => self.apply(command),
                None => Control::Continue,
            },
            Event::Command(command) => self.apply(command),
            Event::CodeScrolled(line) => {
                self.renderer.scroll_code_view(line);
                Control::Continue
            }
            Event::Loaded { generation, result } => {
                self.finish_load(generation, result);
                Control::Continue
            }
        }
    }

    /// Apply one command
    pub fn apply(&mut self, command: Command) -> Control {
        debug!(?command, "applying command");
        match command {
            Command::Start => self.attempt(RevealMachine::start, "Playing"),
            Command::Pause => self.attempt(RevealMachine::pause, "Paused"),
            Command::Resume => self.attempt(RevealMachine::resume, "Playing"),
            Command::TogglePlay => {
                let label = match self.machine.mode() {
                    RevealMode::Playing => "Paused",
                    _ => "Playing",
                };
                self.attempt(RevealMachine::toggle_play, label);
            }
            Command::Reset => self.reset(),
            Command::JumpToEnd => self.attempt(RevealMachine::jump_to_end, "Showing everything"),
            Command::Advance => self.step(RevealMachine::advance_one),
            Command::Retreat => self.step(RevealMachine::retreat_one),
            Command::SelectStyle(style) => self.select_style(style),
            Command::ToggleStyle => {
                let style = self.selector.toggle();
                self.style_changed(style);
            }
            Command::Open => return Control::PromptOpen,
            Command::Export => {
                if self.machine.document().is_none() {
                    self.report(Notice::NoDocument);
                    return Control::Continue;
                }
                return Control::PromptExport;
            }
            Command::Scroll(delta) => return Control::Scroll(delta),
            Command::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Begin loading `path`, cancelling any load still in flight.
    ///
    /// The returned request must be run off the dispatch thread; its result
    /// comes back through [`Event::Loaded`].
    pub fn open(&mut self, path: impl Into<PathBuf>) -> LoadRequest {
        if let Some(previous) = self.in_flight.take() {
            debug!("cancelling superseded load");
            previous.cancel();
        }
        self.load_generation += 1;
        let cancel = CancelToken::new();
        self.in_flight = Some(cancel.clone());
        let path = path.into();
        self.set_message(format!("Loading {}...", path.display()));
        LoadRequest::new(self.load_generation, path, self.load_options, cancel)
    }

    /// Install a document directly, as a finished load would
    pub fn install(&mut self, document: Document) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.load_generation += 1;
        self.set_message(format!(
            "Loaded {} ({} chars, {}, {})",
            document.file_name(),
            document.len(),
            document.language(),
            document.encoding().name(),
        ));
        let transition = self.machine.load(document);
        self.commit(transition);
    }

    /// Write the whole document to `path` as UTF-8 with a BOM
    pub fn export(&mut self, path: &Path) -> Result<(), FileError> {
        let Some(doc) = self.machine.document() else {
            self.report(Notice::NoDocument);
            return Ok(());
        };
        match document::export(doc, path) {
            Ok(()) => {
                self.set_message(format!("Saved {}", path.display()));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                self.set_message(err.to_string());
                Err(err)
            }
        }
    }

    fn finish_load(&mut self, generation: u64, result: Result<Document, FileError>) {
        if generation != self.load_generation {
            debug!(generation, current = self.load_generation, "discarding stale load result");
            return;
        }
        self.in_flight = None;
        match result {
            Ok(document) => {
                info!(path = %document.path().display(), "document installed");
                self.install(document);
            }
            Err(FileError::Cancelled { path }) => {
                debug!(path = %path.display(), "load cancelled");
            }
            Err(err) => {
                warn!(error = %err, "load failed");
                self.set_message(err.to_string());
            }
        }
    }

    fn reset(&mut self) {
        let transition = self.machine.reset();
        self.apply_timer(transition.timer);
        self.set_message("Reset");
        // Derived views are cleared even when nothing was revealed
        self.notify();
    }

    fn select_style(&mut self, style: Style) {
        if self.selector.select(style) {
            self.style_changed(style);
        }
    }

    fn style_changed(&mut self, style: Style) {
        debug!(%style, "style changed");
        self.set_message(format!("{} style", style));
        self.notify();
    }

    fn attempt(&mut self, op: fn(&mut RevealMachine) -> Result<Transition, Notice>, label: &str) {
        match op(&mut self.machine) {
            Ok(transition) => {
                self.set_message(label);
                self.commit(transition);
            }
            Err(notice) => self.report(notice),
        }
    }

    /// Manual steps clamp silently, so only a missing document is reported
    fn step(&mut self, op: fn(&mut RevealMachine) -> Result<Transition, Notice>) {
        match op(&mut self.machine) {
            Ok(transition) => {
                if transition.changed && self.machine.mode() == RevealMode::Complete {
                    self.set_message("Reveal complete");
                }
                self.commit(transition);
            }
            Err(notice) => self.report(notice),
        }
    }

    fn commit(&mut self, transition: Transition) {
        self.apply_timer(transition.timer);
        if transition.changed {
            self.notify();
        }
    }

    fn apply_timer(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Keep => {}
            TimerCommand::Start => self.timer.start(),
            TimerCommand::Stop => {
                if self.timer.is_running() {
                    self.timer.stop();
                }
            }
        }
    }

    fn notify(&mut self) {
        let frame = RevealFrame {
            prefix: self.machine.prefix(),
            style: self.selector.active(),
        };
        self.renderer.present(frame);
    }

    fn report(&mut self, notice: Notice) {
        warn!(%notice, mode = %self.machine.mode(), "request ignored");
        self.set_message(notice.to_string());
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }
}
