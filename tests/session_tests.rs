// Integration tests for the reveal session

use std::fs;
use std::path::Path;

use typeout::document::{Document, FileError, LoadOptions, MAX_FILE_BYTES};
use typeout::host::{RevealFrame, Renderable, TickStamp, TimerSource};
use typeout::reveal::RevealMode;
use typeout::session::{Command, Control, Event, Key, KeyInput, Session};
use typeout::view::{RenderAdapter, Style, ViewModel};

/// Renderer that records every frame it is handed
#[derive(Default)]
struct Recorder {
    frames: Vec<(String, Style)>,
    scrolls: Vec<usize>,
}

impl Renderable for Recorder {
    fn present(&mut self, frame: RevealFrame<'_>) {
        self.frames.push((frame.prefix.to_string(), frame.style));
    }

    fn scroll_code_view(&mut self, first_visible_line: usize) {
        self.scrolls.push(first_visible_line);
    }
}

/// Timer driven by hand: the test decides when ticks arrive
#[derive(Default)]
struct ManualTimer {
    running: bool,
    epoch: u64,
    starts: usize,
    stops: usize,
}

impl ManualTimer {
    fn stamp(&self) -> TickStamp {
        TickStamp(self.epoch)
    }
}

impl TimerSource for ManualTimer {
    fn start(&mut self) {
        self.epoch += 1;
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.epoch += 1;
        self.running = false;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn acknowledge(&mut self, stamp: TickStamp) -> bool {
        self.running && stamp.0 == self.epoch
    }
}

fn session_with(text: &str) -> Session<Recorder, ManualTimer> {
    let mut session = Session::new(
        Recorder::default(),
        ManualTimer::default(),
        Style::Prose,
        LoadOptions::default(),
    );
    session.install(Document::from_text(text, "notes.txt"));
    session
}

fn tick(session: &mut Session<Recorder, ManualTimer>) -> Control {
    let stamp = session.timer().stamp();
    session.handle(Event::Tick(stamp))
}

fn last_frame(session: &Session<Recorder, ManualTimer>) -> &(String, Style) {
    session.renderer().frames.last().unwrap()
}

fn load(session: &mut Session<Recorder, ManualTimer>, path: &Path) {
    let request = session.open(path);
    let event = request.run();
    session.handle(event);
}

#[test]
fn test_ticks_reveal_to_the_end_and_stop() {
    let mut session = session_with("abc");
    session.apply(Command::Start);
    assert!(session.timer().is_running());

    for expected in ["a", "ab", "abc"] {
        tick(&mut session);
        assert_eq!(last_frame(&session).0, expected);
    }
    assert_eq!(session.machine().mode(), RevealMode::Complete);
    assert!(!session.timer().is_running());
    assert_eq!(session.timer().stops, 1);

    // The run is over, so a late tick changes nothing
    let frames = session.renderer().frames.len();
    session.handle(Event::Tick(TickStamp(0)));
    assert_eq!(session.renderer().frames.len(), frames);
}

#[test]
fn test_manual_advance_and_tick_in_same_cycle() {
    let mut session = session_with("abcdef");
    session.apply(Command::Start);

    session.handle(Event::Key(KeyInput::plain(Key::Char('x'))));
    tick(&mut session);

    assert_eq!(session.machine().cursor(), 2);
    assert_eq!(last_frame(&session).0, "ab");
}

#[test]
fn test_stale_tick_is_dropped() {
    let mut session = session_with("abcdef");
    session.apply(Command::Start);
    let old = session.timer().stamp();
    session.apply(Command::Pause);
    session.apply(Command::Resume);

    session.handle(Event::Tick(old));
    assert_eq!(session.machine().cursor(), 0);

    tick(&mut session);
    assert_eq!(session.machine().cursor(), 1);
}

#[test]
fn test_start_from_complete_replays() {
    let mut session = session_with("ab");
    session.apply(Command::JumpToEnd);
    assert_eq!(session.machine().mode(), RevealMode::Complete);

    session.apply(Command::Start);
    assert_eq!(session.machine().mode(), RevealMode::Playing);
    assert_eq!(session.machine().cursor(), 0);
    assert_eq!(last_frame(&session).0, "");
}

#[test]
fn test_jump_to_end_and_reset_from_every_mode() {
    let prepare: [fn(&mut Session<Recorder, ManualTimer>); 4] = [
        |_| {},
        |s| {
            s.apply(Command::Start);
        },
        |s| {
            s.apply(Command::Start);
            tick(s);
            s.apply(Command::Pause);
        },
        |s| {
            s.apply(Command::JumpToEnd);
        },
    ];

    for setup in prepare {
        let mut session = session_with("hello\nworld");
        setup(&mut session);
        session.apply(Command::JumpToEnd);
        assert_eq!(session.machine().mode(), RevealMode::Complete);
        assert_eq!(last_frame(&session).0, "hello\nworld");
        assert!(!session.timer().is_running());

        let mut session = session_with("hello\nworld");
        setup(&mut session);
        session.apply(Command::Reset);
        assert_eq!(session.machine().mode(), RevealMode::Idle);
        assert_eq!(session.machine().cursor(), 0);
        assert_eq!(last_frame(&session).0, "");
        assert!(!session.timer().is_running());
        assert!(session.document().is_some());
    }
}

#[test]
fn test_backspace_retreats_and_clamps() {
    let mut session = session_with("ab");
    session.handle(Event::Key(KeyInput::plain(Key::Enter)));
    session.handle(Event::Key(KeyInput::plain(Key::Backspace)));
    session.handle(Event::Key(KeyInput::plain(Key::Backspace)));
    assert_eq!(session.machine().cursor(), 0);

    session.apply(Command::JumpToEnd);
    session.apply(Command::Retreat);
    assert_eq!(session.machine().mode(), RevealMode::Paused);
    assert_eq!(last_frame(&session).0, "a");
}

#[test]
fn test_commands_without_document_leave_a_notice() {
    let mut session = Session::new(
        Recorder::default(),
        ManualTimer::default(),
        Style::Prose,
        LoadOptions::default(),
    );
    session.apply(Command::Start);
    assert_eq!(session.message(), "no document loaded");
    assert_eq!(session.apply(Command::Export), Control::Continue);
    assert!(!session.timer().is_running());
}

#[test]
fn test_empty_document_cannot_play() {
    let mut session = session_with("");
    session.apply(Command::Start);
    assert_eq!(session.machine().mode(), RevealMode::Idle);
    assert!(!session.timer().is_running());
    assert!(session.message().contains("empty"));
}

#[test]
fn test_style_switch_keeps_prefix() {
    let mut session = session_with("ab\ncd");
    session.apply(Command::Advance);
    session.apply(Command::Advance);

    session.apply(Command::SelectStyle(Style::Code));
    assert_eq!(last_frame(&session), &("ab".to_string(), Style::Code));

    // Selecting the active style again does not re-render
    let frames = session.renderer().frames.len();
    session.apply(Command::SelectStyle(Style::Code));
    assert_eq!(session.renderer().frames.len(), frames);

    session.apply(Command::ToggleStyle);
    assert_eq!(last_frame(&session), &("ab".to_string(), Style::Prose));
    assert_eq!(session.machine().cursor(), 2);
}

#[test]
fn test_code_view_labels_through_adapter() {
    let mut session = Session::new(
        RenderAdapter::new(),
        ManualTimer::default(),
        Style::Code,
        LoadOptions::default(),
    );
    session.install(Document::from_text("ab\ncd\nef", "main.c"));
    for _ in 0..5 {
        session.apply(Command::Advance);
    }

    match session.renderer().view() {
        ViewModel::Code { text, labels, .. } => {
            assert_eq!(text, "ab\ncd");
            assert_eq!(labels.to_vec(), vec![1, 2]);
        }
        other => panic!("expected code view, got {:?}", other),
    }

    session.handle(Event::CodeScrolled(1));
    match session.renderer().view() {
        ViewModel::Code {
            first_visible_line,
            gutter_offset,
            ..
        } => {
            assert_eq!(first_visible_line, 1);
            assert_eq!(gutter_offset, 1);
        }
        other => panic!("expected code view, got {:?}", other),
    }
}

#[test]
fn test_scroll_keys_are_handed_to_host() {
    let mut session = session_with("x");
    let control = session.handle(Event::Key(KeyInput::plain(Key::PageDown)));
    assert!(matches!(control, Control::Scroll(_)));
    assert_eq!(
        session.handle(Event::Key(KeyInput::ctrl(Key::Char('o')))),
        Control::PromptOpen
    );
    assert_eq!(
        session.handle(Event::Key(KeyInput::plain(Key::Esc))),
        Control::Quit
    );
}

#[test]
fn test_load_strips_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greeting.txt");
    fs::write(&path, b"\xEF\xBB\xBFhi").unwrap();

    let mut session = session_with("old");
    load(&mut session, &path);

    let doc = session.document().unwrap();
    assert_eq!(doc.text(), "hi");
    assert_eq!(doc.len(), 2);
    assert_eq!(session.machine().cursor(), 0);
    assert_eq!(session.machine().mode(), RevealMode::Idle);
    assert!(!session.is_loading());
}

#[test]
fn test_load_stops_playback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("next.txt");
    fs::write(&path, "next").unwrap();

    let mut session = session_with("playing");
    session.apply(Command::Start);
    tick(&mut session);
    load(&mut session, &path);

    assert!(!session.timer().is_running());
    assert_eq!(session.machine().mode(), RevealMode::Idle);
    assert_eq!(last_frame(&session).0, "");
}

#[test]
fn test_missing_file_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_with("keep me");
    session.apply(Command::Advance);

    load(&mut session, &dir.path().join("missing.txt"));

    assert_eq!(session.document().unwrap().text(), "keep me");
    assert_eq!(session.machine().cursor(), 1);
    assert!(session.message().starts_with("file not found"));
}

#[test]
fn test_oversized_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.log");
    let file = fs::File::create(&path).unwrap();
    file.set_len(MAX_FILE_BYTES + 1).unwrap();

    let mut session = session_with("small");
    session.apply(Command::Advance);
    session.apply(Command::Advance);
    load(&mut session, &path);

    assert_eq!(session.document().unwrap().text(), "small");
    assert_eq!(session.machine().cursor(), 2);
    assert!(session.message().contains("byte limit"));
}

#[test]
fn test_superseded_load_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, "first").unwrap();
    fs::write(&second, "second").unwrap();

    let mut session = session_with("");
    let stale = session.open(&first);
    let current = session.open(&second);
    assert!(stale.generation() < current.generation());

    // Whether the first load saw its cancellation or not, its result is stale
    session.handle(stale.run());
    assert!(session.document().unwrap().is_empty());
    assert!(session.is_loading());

    session.handle(current.run());
    assert_eq!(session.document().unwrap().text(), "second");
    assert!(!session.is_loading());
}

#[test]
fn test_export_writes_whole_document_with_bom() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");

    let mut session = session_with("héllo");
    session.apply(Command::Advance);
    session.apply(Command::Advance);
    assert_eq!(session.apply(Command::Export), Control::PromptExport);
    session.export(&out).unwrap();

    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    assert_eq!(&bytes[3..], "héllo".as_bytes());
    // Exporting does not touch the reveal
    assert_eq!(session.machine().cursor(), 2);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nope").join("out.txt");

    let mut session = session_with("x");
    let err = session.export(&out).unwrap_err();
    assert!(matches!(err, FileError::NotFound { .. }));
    assert!(session.message().starts_with("file not found"));
}

#[test]
fn test_status_text() {
    let mut session = session_with("abcd");
    session.apply(Command::Advance);
    assert_eq!(
        session.status_text(),
        "Idle | 1/4 chars (25%) | Prose | Plain text"
    );
}
