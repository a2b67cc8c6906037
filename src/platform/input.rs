//! Discrete input events and the continuously-held key snapshot

use std::collections::HashSet;

use glam::Vec2;

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Backspace,
    Escape,
    Tab,
    /// Any printable character
    Char(char),
}

impl Key {
    /// Form used for held-state tracking (shift may change the character
    /// between press and release)
    fn held_form(self) -> Key {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Pointer (mouse) buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// One discrete input event, in logical display coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Window close / quit request
    Quit,
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    PointerMoved { pos: Vec2 },
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerUp { button: PointerButton, pos: Vec2 },
}

impl InputEvent {
    /// Pointer position carried by pointer events
    pub fn pointer_pos(&self) -> Option<Vec2> {
        match self {
            InputEvent::PointerMoved { pos }
            | InputEvent::PointerDown { pos, .. }
            | InputEvent::PointerUp { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    pub fn is_primary_down(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            }
        )
    }

    pub fn is_primary_up(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            }
        )
    }

    /// First press of a key (ignores auto-repeat)
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(self, InputEvent::KeyDown { key: k, repeat: false } if *k == key)
    }
}

/// Snapshot of keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key.held_form());
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key.held_form());
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key.held_form())
    }

    /// Track key edges from an event
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, .. } => self.press(*key),
            InputEvent::KeyUp { key } => self.release(*key),
            _ => {}
        }
    }

    /// Forget everything (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
