//! Input events as delivered by the windowing layer.

use crate::picking::Interactable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// A printable key, lower-case
    Char(char),
    Left,
    Right,
    Up,
    Down,
    F1,
    F2,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer offset from the window center, in pixels
    MouseMotion { dx: f64, dy: f64 },
    /// Left click; the target is the object id read back under the cursor
    Click(Option<Interactable>),
    /// Left click resolved by casting a ray through the crosshair
    ClickCrosshair,
    Resize { width: u32, height: u32 },
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Arrow keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Keyboard {
    /// Record an arrow key press or release; other keys are ignored.
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            _ => {}
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}
