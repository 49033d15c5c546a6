//! Keyboard input
//!
//! The game polls logical keys once per frame through [`Input`]. The terminal
//! front end collects key events into a [`FrameInput`] between frames.

pub mod handler;

pub use handler::{InputHandler, KeyAction};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Restart,
}

impl Key {
    fn bit(self) -> u8 {
        match self {
            Key::Up => 1,
            Key::Down => 1 << 1,
            Key::Left => 1 << 2,
            Key::Right => 1 << 3,
            Key::Restart => 1 << 4,
        }
    }
}

/// Source of key presses for the current frame
pub trait Input {
    /// Whether `key` went down since the previous frame
    fn is_pressed(&self, key: Key) -> bool;
}

/// Keys pressed during one frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameInput {
    pressed: u8,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed |= key.bit();
    }

    /// Forget everything; called once the frame has been updated
    pub fn clear(&mut self) {
        self.pressed = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.pressed == 0
    }
}

impl Input for FrameInput {
    fn is_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }
}

impl<const N: usize> From<[Key; N]> for FrameInput {
    fn from(keys: [Key; N]) -> Self {
        let mut input = FrameInput::new();
        for key in keys {
            input.press(key);
        }
        input
    }
}
