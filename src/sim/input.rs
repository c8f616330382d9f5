//! Held-key state read by the simulation
//!
//! Written only by the platform keyboard listeners, read once per body
//! update. Reflects raw "currently held" state with no debounce.

use std::collections::HashSet;

/// Keys the game reacts to, keyed by their DOM `keyCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

impl Key {
    pub const ALL: [Key; 3] = [Key::Left, Key::Right, Key::Fire];

    /// Numeric key code
    pub const fn code(self) -> u32 {
        match self {
            Key::Left => 37,
            Key::Right => 39,
            Key::Fire => 32,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Key::ALL.into_iter().find(|k| k.code() == code)
    }
}

/// Set of key codes currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<u32>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event
    pub fn press(&mut self, code: u32) {
        self.held.insert(code);
    }

    /// Record a key-up event
    pub fn release(&mut self, code: u32) {
        self.held.remove(&code);
    }

    /// Forget everything (focus lost, tab hidden)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key.code())
    }

    /// Convenience for tests and scripted input
    pub fn with_held(keys: &[Key]) -> Self {
        let mut state = Self::new();
        for key in keys {
            state.press(key.code());
        }
        state
    }
}
