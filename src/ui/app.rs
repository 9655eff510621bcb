//! Main TUI application state and event loop
//!
//! Three producers feed one channel: the input thread (terminal events), the
//! reveal timer (ticks) and loader threads (finished loads). The loop drains
//! the channel on the UI thread, so the session sees every event in arrival
//! order.

use super::input::{key_input, wheel_scroll};
use super::panes::{
    render_code_pane, render_prose_pane, render_status_bar, text_rows, CodeRenderData,
    PromptLine, StatusRenderData,
};
use crate::config::Config;
use crate::document::{FileError, Language};
use crate::session::{Control, Event, IntervalTimer, ScrollDelta, Session};
use crate::view::{RenderAdapter, Style, ViewModel};
use anyhow::{Context, Result};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Entries in the UI thread's queue
#[derive(Debug)]
pub enum AppEvent {
    Core(Event),
    Input(TermEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Open,
    Export,
}

impl PromptKind {
    fn label(self) -> &'static str {
        match self {
            PromptKind::Open => "Open",
            PromptKind::Export => "Save as",
        }
    }
}

/// A path being typed into the status bar
#[derive(Debug)]
struct Prompt {
    kind: PromptKind,
    input: String,
}

/// Scroll position of the code view
#[derive(Debug)]
struct CodeViewport {
    first_line: usize,
    /// Keep the last revealed line in view
    follow: bool,
    height: usize,
}

impl CodeViewport {
    fn new() -> Self {
        CodeViewport {
            first_line: 0,
            follow: true,
            height: 1,
        }
    }

    /// Apply a user scroll over a view of `count` lines. Reaching the bottom
    /// turns following back on.
    fn scroll(&mut self, delta: ScrollDelta, count: usize) {
        let first = self.first_line;
        let page = self.height.max(1) as isize;
        let target = match delta {
            ScrollDelta::Lines(n) => first.saturating_add_signed(n),
            ScrollDelta::Pages(n) => first.saturating_add_signed(n.saturating_mul(page)),
            ScrollDelta::Top => 0,
            ScrollDelta::Bottom => count,
        };
        let max_first = count.saturating_sub(self.height);
        self.first_line = target.min(max_first);
        self.follow = self.first_line >= max_first;
    }

    /// Re-clamp after the revealed prefix changed to `count` lines.
    /// Returns the first visible line.
    fn sync(&mut self, count: usize) -> usize {
        if self.follow {
            self.first_line = count.saturating_sub(self.height);
        }
        self.first_line = self.first_line.min(count.saturating_sub(1));
        self.first_line
    }
}

/// Reads terminal events until stopped
struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    fn spawn(tx: Sender<AppEvent>) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("typeout-input".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    match event::poll(INPUT_POLL) {
                        Ok(false) => continue,
                        Ok(true) => {}
                        Err(err) => {
                            error!(error = %err, "polling terminal events failed");
                            break;
                        }
                    }
                    let event = match event::read() {
                        Ok(event) => event,
                        Err(err) => {
                            error!(error = %err, "reading terminal event failed");
                            break;
                        }
                    };
                    if tx.send(AppEvent::Input(event)).is_err() {
                        break;
                    }
                }
            })
            .context("failed to spawn the input thread")?;
        Ok(InputThread {
            stop,
            handle: Some(handle),
        })
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// The main application state
pub struct App {
    session: Session<RenderAdapter, IntervalTimer>,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
    prompt: Option<Prompt>,
    code_view: CodeViewport,
    initial_file: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let tick_tx = tx.clone();
        let timer = IntervalTimer::spawn(config.tick_interval, move |stamp| {
            tick_tx.send(AppEvent::Core(Event::Tick(stamp))).is_ok()
        })
        .context("failed to start the reveal timer")?;
        let session = Session::new(RenderAdapter::new(), timer, config.initial_style, config.load);

        Ok(App {
            session,
            tx,
            rx,
            prompt: None,
            code_view: CodeViewport::new(),
            initial_file: config.file.clone(),
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let _input = InputThread::spawn(self.tx.clone())?;
        if let Some(path) = self.initial_file.take() {
            self.open(path);
        }

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            // The app holds a sender, so the channel never disconnects
            let Ok(event) = self.rx.recv() else { break };
            self.dispatch(event);
            while !self.should_quit {
                match self.rx.try_recv() {
                    Ok(event) => self.dispatch(event),
                    Err(_) => break,
                }
            }
        }
        debug!("event loop finished");
        Ok(())
    }

    fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::Core(event) => {
                let control = self.session.handle(event);
                self.follow(control);
            }
            AppEvent::Input(TermEvent::Key(key)) => {
                if self.prompt.is_some() {
                    self.prompt_key(key);
                } else if let Some(input) = key_input(key) {
                    let control = self.session.handle(Event::Key(input));
                    self.follow(control);
                }
            }
            AppEvent::Input(TermEvent::Mouse(mouse)) => {
                if let Some(delta) = wheel_scroll(mouse) {
                    self.scroll(delta);
                }
            }
            // Resizes are picked up by the next draw
            AppEvent::Input(_) => {}
        }
    }

    fn follow(&mut self, control: Control) {
        match control {
            Control::Continue => {}
            Control::Quit => self.should_quit = true,
            Control::PromptOpen => self.begin_prompt(PromptKind::Open),
            Control::PromptExport => self.begin_prompt(PromptKind::Export),
            Control::Scroll(delta) => self.scroll(delta),
        }
    }

    fn begin_prompt(&mut self, kind: PromptKind) {
        let input = self
            .session
            .document()
            .map(|doc| doc.path().display().to_string())
            .unwrap_or_default();
        self.prompt = Some(Prompt { kind, input });
    }

    fn prompt_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit(prompt);
                }
            }
            code => {
                let Some(prompt) = self.prompt.as_mut() else {
                    return;
                };
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match code {
                    KeyCode::Backspace => {
                        prompt.input.pop();
                    }
                    KeyCode::Char('u') if ctrl => prompt.input.clear(),
                    KeyCode::Char(c) if !ctrl => prompt.input.push(c),
                    _ => {}
                }
            }
        }
    }

    fn submit(&mut self, prompt: Prompt) {
        let path = PathBuf::from(prompt.input.trim());
        if path.as_os_str().is_empty() {
            return;
        }
        match prompt.kind {
            PromptKind::Open => self.open(path),
            PromptKind::Export => {
                // Failures are already on the status line
                let _ = self.session.export(&path);
            }
        }
    }

    fn open(&mut self, path: PathBuf) {
        let request = self.session.open(path);
        let generation = request.generation();
        let path = request.path().to_path_buf();
        let tx = self.tx.clone();
        let spawned = request.spawn(move |event| {
            let _ = tx.send(AppEvent::Core(event));
        });
        if let Err(source) = spawned {
            error!(error = %source, "failed to spawn loader thread");
            self.session.handle(Event::Loaded {
                generation,
                result: Err(FileError::Io { path, source }),
            });
        }
    }

    /// Move the code view; the gutter follows on the next render
    fn scroll(&mut self, delta: ScrollDelta) {
        if let ViewModel::Code { labels, .. } = self.session.renderer().view() {
            self.code_view.scroll(delta, labels.count());
        }
    }

    /// Push the code view's scroll position to the session when it moved
    fn sync_code_view(&mut self) {
        let ViewModel::Code {
            labels,
            first_visible_line,
            ..
        } = self.session.renderer().view()
        else {
            return;
        };
        let first = self.code_view.sync(labels.count());
        if first != first_visible_line {
            self.session.handle(Event::CodeScrolled(first));
        }
    }

    fn title(&self) -> String {
        match self.session.document() {
            Some(doc) => format!(
                "{} · {} · {}",
                doc.file_name(),
                doc.language(),
                doc.encoding().name()
            ),
            None => String::from("typeout"),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let title = self.title();
        if self.session.style() == Style::Code {
            self.code_view.height = text_rows(chunks[0]);
            self.sync_code_view();
        }
        let language = self
            .session
            .document()
            .map(|doc| doc.language())
            .unwrap_or(Language::PlainText);

        match self.session.renderer().view() {
            ViewModel::Prose { text } => render_prose_pane(frame, chunks[0], text, &title),
            ViewModel::Code {
                text,
                labels,
                first_visible_line,
                gutter_offset,
            } => render_code_pane(
                frame,
                chunks[0],
                CodeRenderData {
                    title: &title,
                    text,
                    labels,
                    first_visible_line,
                    gutter_offset,
                    language,
                },
            ),
        }

        let summary = self.session.status_text();
        let prompt = self.prompt.as_ref().map(|prompt| PromptLine {
            label: prompt.kind.label(),
            input: &prompt.input,
        });
        render_status_bar(
            frame,
            chunks[1],
            StatusRenderData {
                mode: self
                    .session
                    .document()
                    .map(|_| self.session.machine().mode()),
                summary: &summary,
                message: self.session.message(),
                loading: self.session.is_loading(),
                prompt,
            },
        );
    }
}
