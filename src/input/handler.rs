use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press(Key),
    Quit,
    None,
}

/// Maps terminal key events onto game keys
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Press(Key::Up),
            KeyCode::Down => KeyAction::Press(Key::Down),
            KeyCode::Left => KeyAction::Press(Key::Left),
            KeyCode::Right => KeyAction::Press(Key::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Press(Key::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Press(Key::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Press(Key::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Press(Key::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Press(Key::Restart)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
