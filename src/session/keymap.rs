//! Key presses → session commands
//!
//! Keys are described by a small toolkit-neutral [`KeyInput`]; the terminal
//! host converts its own key events into it.
//!
//! | Key                               | Command            |
//! |-----------------------------------|--------------------|
//! | printable char, Space, Enter, →   | advance one        |
//! | Backspace, ←                      | retreat one        |
//! | Ctrl+P                            | start/pause/resume |
//! | Ctrl+A                            | jump to end        |
//! | Ctrl+R                            | reset              |
//! | Ctrl+1 / F1, Ctrl+2 / F2          | prose / code style |
//! | Ctrl+T                            | toggle style       |
//! | Ctrl+O / Ctrl+S                   | open / export      |
//! | ↑ ↓ PgUp PgDn Home End            | scroll code view   |
//! | Ctrl+Q, Ctrl+C, Esc               | quit               |

use crate::view::Style;

/// A key, without modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Esc,
    F(u8),
    Other,
}

/// A key press with the modifiers the keymap cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        KeyInput {
            key,
            ctrl: false,
            alt: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        KeyInput {
            key,
            ctrl: true,
            alt: false,
        }
    }
}

/// How far to move the code view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDelta {
    Lines(isize),
    Pages(isize),
    Top,
    Bottom,
}

/// Everything the session can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    TogglePlay,
    Reset,
    JumpToEnd,
    Advance,
    Retreat,
    SelectStyle(Style),
    ToggleStyle,
    Open,
    Export,
    Scroll(ScrollDelta),
    Quit,
}

/// Map a key press to a command, or `None` if the key is unbound
pub fn command_for(input: KeyInput) -> Option<Command> {
    if input.alt {
        return None;
    }
    if input.ctrl {
        return match input.key {
            Key::Char(c) => match c.to_ascii_lowercase() {
                'p' => Some(Command::TogglePlay),
                'a' => Some(Command::JumpToEnd),
                'r' => Some(Command::Reset),
                '1' => Some(Command::SelectStyle(Style::Prose)),
                '2' => Some(Command::SelectStyle(Style::Code)),
                't' => Some(Command::ToggleStyle),
                'o' => Some(Command::Open),
                's' => Some(Command::Export),
                'q' | 'c' => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        };
    }
    match input.key {
        Key::Char(c) if !c.is_control() => Some(Command::Advance),
        Key::Enter | Key::Right => Some(Command::Advance),
        Key::Backspace | Key::Left => Some(Command::Retreat),
        Key::Up => Some(Command::Scroll(ScrollDelta::Lines(-1))),
        Key::Down => Some(Command::Scroll(ScrollDelta::Lines(1))),
        Key::PageUp => Some(Command::Scroll(ScrollDelta::Pages(-1))),
        Key::PageDown => Some(Command::Scroll(ScrollDelta::Pages(1))),
        Key::Home => Some(Command::Scroll(ScrollDelta::Top)),
        Key::End => Some(Command::Scroll(ScrollDelta::Bottom)),
        Key::F(1) => Some(Command::SelectStyle(Style::Prose)),
        Key::F(2) => Some(Command::SelectStyle(Style::Code)),
        Key::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_keys_advance() {
        for c in ['a', 'Z', ' ', '7', '世'] {
            assert_eq!(command_for(KeyInput::plain(Key::Char(c))), Some(Command::Advance));
        }
        assert_eq!(command_for(KeyInput::plain(Key::Enter)), Some(Command::Advance));
        assert_eq!(command_for(KeyInput::plain(Key::Right)), Some(Command::Advance));
    }

    #[test]
    fn test_backspace_retreats() {
        assert_eq!(command_for(KeyInput::plain(Key::Backspace)), Some(Command::Retreat));
        assert_eq!(command_for(KeyInput::plain(Key::Left)), Some(Command::Retreat));
    }

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(command_for(KeyInput::ctrl(Key::Char('p'))), Some(Command::TogglePlay));
        assert_eq!(command_for(KeyInput::ctrl(Key::Char('A'))), Some(Command::JumpToEnd));
        assert_eq!(
            command_for(KeyInput::ctrl(Key::Char('2'))),
            Some(Command::SelectStyle(Style::Code))
        );
        assert_eq!(command_for(KeyInput::ctrl(Key::Char('x'))), None);
        assert_eq!(command_for(KeyInput::ctrl(Key::Enter)), None);
    }

    #[test]
    fn test_control_chars_and_alt_are_unbound() {
        assert_eq!(command_for(KeyInput::plain(Key::Char('\u{7f}'))), None);
        let alt = KeyInput {
            key: Key::Char('a'),
            ctrl: false,
            alt: true,
        };
        assert_eq!(command_for(alt), None);
        assert_eq!(command_for(KeyInput::plain(Key::Other)), None);
    }
}
