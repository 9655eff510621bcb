//! Reveal state machine
//!
//! [`RevealMachine`] owns the loaded [`Document`] and the [`RevealState`]
//! (cursor + mode). It is the only writer of either. Operations return a
//! [`Transition`] describing what happened, including what the caller must do
//! with the timer source; the machine itself has no timer and no renderer.
//!
//! # States
//!
//! ```text
//!            start            tick (cursor reaches end)
//!   Idle ───────────▶ Playing ─────────────────────────▶ Complete
//!    ▲                 │   ▲                                │
//!    │ reset/load pause│   │resume            start (replay)│
//!    │                 ▼   │                                │
//!    └────────────── Paused ◀──── retreat ──────────────────┘
//! ```
//!
//! Manual advance/retreat are legal in every mode and interleave with ticks.
//! One step is always one decoded code point.

pub mod notice;

pub use notice::Notice;

use crate::document::Document;
use std::fmt;
use tracing::debug;

/// Play state of the reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    Idle,
    Playing,
    Paused,
    Complete,
}

impl fmt::Display for RevealMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RevealMode::Idle => "Idle",
            RevealMode::Playing => "Playing",
            RevealMode::Paused => "Paused",
            RevealMode::Complete => "Complete",
        })
    }
}

/// Cursor and mode, always updated together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    cursor: usize,
    /// Byte offset of `cursor` in the document text
    byte_offset: usize,
    mode: RevealMode,
}

impl RevealState {
    const INITIAL: RevealState = RevealState {
        cursor: 0,
        byte_offset: 0,
        mode: RevealMode::Idle,
    };

    /// Number of revealed code points
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }
}

/// What the caller has to do with the timer source after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Keep,
    Start,
    Stop,
}

/// Result of a reveal operation that was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Whether cursor or mode changed
    pub changed: bool,
    pub timer: TimerCommand,
}

impl Transition {
    fn unchanged() -> Self {
        Transition {
            changed: false,
            timer: TimerCommand::Keep,
        }
    }

    fn changed(timer: TimerCommand) -> Self {
        Transition {
            changed: true,
            timer,
        }
    }
}

/// The single source of truth for reveal progress
#[derive(Debug, Clone)]
pub struct RevealMachine {
    document: Option<Document>,
    state: RevealState,
}

impl Default for RevealMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealMachine {
    pub fn new() -> Self {
        RevealMachine {
            document: None,
            state: RevealState::INITIAL,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn mode(&self) -> RevealMode {
        self.state.mode
    }

    /// Length of the loaded document in code points (0 without a document)
    pub fn len(&self) -> usize {
        self.document.as_ref().map_or(0, Document::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The revealed part of the document
    pub fn prefix(&self) -> &str {
        self.document
            .as_ref()
            .map_or("", |doc| &doc.text()[..self.state.byte_offset])
    }

    /// Reveal progress in whole percent
    pub fn percent(&self) -> usize {
        self.state.cursor * 100 / self.len().max(1)
    }

    /// Install a new document and rewind.
    ///
    /// The previous document is dropped; any running timer must be stopped.
    pub fn load(&mut self, document: Document) -> Transition {
        debug!(path = %document.path().display(), len = document.len(), "installing document");
        self.document = Some(document);
        self.state = RevealState::INITIAL;
        Transition::changed(TimerCommand::Stop)
    }

    /// Begin automatic playback from the current cursor.
    ///
    /// A finished reveal is rewound and played again.
    pub fn start(&mut self) -> Result<Transition, Notice> {
        let doc = self.document.as_ref().ok_or(Notice::NoDocument)?;
        if doc.is_empty() {
            return Err(Notice::EmptyDocument);
        }
        match self.state.mode {
            RevealMode::Playing => Err(Notice::AlreadyPlaying),
            RevealMode::Complete => {
                self.state = RevealState {
                    mode: RevealMode::Playing,
                    ..RevealState::INITIAL
                };
                Ok(Transition::changed(TimerCommand::Start))
            }
            RevealMode::Idle | RevealMode::Paused => {
                self.state.mode = RevealMode::Playing;
                Ok(Transition::changed(TimerCommand::Start))
            }
        }
    }

    /// One timer-driven step.
    ///
    /// Ticks outside of `Playing` are stale and dropped. Reaching the end
    /// completes the reveal and stops the timer in the same transition.
    pub fn tick(&mut self) -> Transition {
        if self.state.mode != RevealMode::Playing {
            debug!(mode = %self.state.mode, "dropping tick");
            return Transition::unchanged();
        }
        if self.step_forward() {
            if self.at_end() {
                self.state.mode = RevealMode::Complete;
                return Transition::changed(TimerCommand::Stop);
            }
            return Transition::changed(TimerCommand::Keep);
        }
        self.state.mode = RevealMode::Complete;
        Transition::changed(TimerCommand::Stop)
    }

    pub fn pause(&mut self) -> Result<Transition, Notice> {
        if self.state.mode != RevealMode::Playing {
            return Err(Notice::NotPlaying);
        }
        self.state.mode = RevealMode::Paused;
        Ok(Transition::changed(TimerCommand::Stop))
    }

    pub fn resume(&mut self) -> Result<Transition, Notice> {
        if self.state.mode != RevealMode::Paused {
            return Err(Notice::NotPaused);
        }
        self.state.mode = RevealMode::Playing;
        Ok(Transition::changed(TimerCommand::Start))
    }

    /// Start, pause or resume depending on the current mode
    pub fn toggle_play(&mut self) -> Result<Transition, Notice> {
        match self.state.mode {
            RevealMode::Playing => self.pause(),
            RevealMode::Paused => self.resume(),
            RevealMode::Idle | RevealMode::Complete => self.start(),
        }
    }

    /// Rewind to nothing revealed. The document stays loaded.
    pub fn reset(&mut self) -> Transition {
        let changed = self.state != RevealState::INITIAL;
        self.state = RevealState::INITIAL;
        Transition {
            changed,
            timer: TimerCommand::Stop,
        }
    }

    /// Reveal everything at once
    pub fn jump_to_end(&mut self) -> Result<Transition, Notice> {
        let doc = self.document.as_ref().ok_or(Notice::NoDocument)?;
        let end = RevealState {
            cursor: doc.len(),
            byte_offset: doc.text().len(),
            mode: RevealMode::Complete,
        };
        let changed = self.state != end;
        self.state = end;
        Ok(Transition {
            changed,
            timer: TimerCommand::Stop,
        })
    }

    /// Reveal one more code point; a no-op at the end
    pub fn advance_one(&mut self) -> Result<Transition, Notice> {
        if self.document.is_none() {
            return Err(Notice::NoDocument);
        }
        if !self.step_forward() {
            return Ok(Transition::unchanged());
        }
        if self.at_end() {
            let timer = if self.state.mode == RevealMode::Playing {
                TimerCommand::Stop
            } else {
                TimerCommand::Keep
            };
            self.state.mode = RevealMode::Complete;
            return Ok(Transition::changed(timer));
        }
        Ok(Transition::changed(TimerCommand::Keep))
    }

    /// Hide the last revealed code point; a no-op at the start
    pub fn retreat_one(&mut self) -> Result<Transition, Notice> {
        let doc = self.document.as_ref().ok_or(Notice::NoDocument)?;
        let Some(ch) = doc.text()[..self.state.byte_offset].chars().next_back() else {
            return Ok(Transition::unchanged());
        };
        self.state.cursor -= 1;
        self.state.byte_offset -= ch.len_utf8();
        if self.state.mode == RevealMode::Complete {
            self.state.mode = RevealMode::Paused;
        }
        Ok(Transition::changed(TimerCommand::Keep))
    }

    fn step_forward(&mut self) -> bool {
        let Some(doc) = self.document.as_ref() else {
            return false;
        };
        match doc.text()[self.state.byte_offset..].chars().next() {
            Some(ch) => {
                self.state.cursor += 1;
                self.state.byte_offset += ch.len_utf8();
                true
            }
            None => false,
        }
    }

    fn at_end(&self) -> bool {
        self.state.cursor == self.len()
    }
}
