//! crossterm events → toolkit-neutral session input

use crate::session::{Key, KeyInput, ScrollDelta};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Lines moved per mouse wheel notch
pub const WHEEL_LINES: isize = 3;

/// Translate a key press. Releases and repeats of non-character keys are dropped.
pub fn key_input(event: KeyEvent) -> Option<KeyInput> {
    match event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Repeat if matches!(event.code, KeyCode::Char(_) | KeyCode::Backspace) => {}
        _ => return None,
    }
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Other,
    };
    Some(KeyInput {
        key,
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    })
}

/// Mouse wheel → code view scroll
pub fn wheel_scroll(event: MouseEvent) -> Option<ScrollDelta> {
    match event.kind {
        MouseEventKind::ScrollUp => Some(ScrollDelta::Lines(-WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(ScrollDelta::Lines(WHEEL_LINES)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_translation() {
        assert_eq!(
            key_input(press(KeyCode::Char('o'), KeyModifiers::CONTROL)),
            Some(KeyInput::ctrl(Key::Char('o')))
        );
        assert_eq!(
            key_input(press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(KeyInput::plain(Key::Backspace))
        );
        for code in [KeyCode::Insert, KeyCode::Tab] {
            assert_eq!(
                key_input(press(code, KeyModifiers::NONE)),
                Some(KeyInput::plain(Key::Other))
            );
        }
    }

    #[test]
    fn test_releases_are_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_input(release), None);
    }
}
