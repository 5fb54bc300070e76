//! Terminal events to calculator keys

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::buffer::{FunctionKey, Key};

/// What a terminal event asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send a key to the calculator
    Press(Key),
    /// Left click at a screen position
    Click {
        /// Column
        x: u16,
        /// Row
        y: u16,
    },
    /// Quit the application
    Quit,
    /// Ignored input
    None,
}

/// Maps crossterm events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps any terminal event
    #[must_use]
    pub fn handle_event(&self, event: &Event) -> KeyAction {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse),
            _ => KeyAction::None,
        }
    }

    /// Maps a key event
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        let key = match code {
            KeyCode::Enter => Key::Equals,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Clear,
            KeyCode::Esc => Key::AllClear,
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char(c) => match Self::char_key(c) {
                Some(key) => key,
                None => return KeyAction::None,
            },
            _ => return KeyAction::None,
        };
        KeyAction::Press(key)
    }

    /// Keyboard shortcut for a character, if it has one
    #[must_use]
    pub fn char_key(c: char) -> Option<Key> {
        let function = match c {
            's' => FunctionKey::Sin,
            'c' => FunctionKey::Cos,
            't' => FunctionKey::Tan,
            'l' => FunctionKey::Ln,
            'g' => FunctionKey::Log,
            'r' => return Some(Key::Sqrt),
            _ => {
                let mut buf = [0u8; 4];
                return Key::from_label(c.encode_utf8(&mut buf));
            }
        };
        Some(Key::Function(function))
    }

    fn handle_mouse(event: MouseEvent) -> KeyAction {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => KeyAction::Click {
                x: event.column,
                y: event.row,
            },
            _ => KeyAction::None,
        }
    }
}
