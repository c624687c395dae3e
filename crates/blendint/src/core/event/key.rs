//! Keyboard events and modifier state.
use std::ops::Add;

use super::Action;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
    /// The platform "super" key is active.
    pub logo: bool,
}

impl Mods {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        logo: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// True if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            logo: self.logo || other.logo,
        }
    }
}

impl Add<KeyCode> for Mods {
    type Output = KeyEvent;

    fn add(self, key: KeyCode) -> Self::Output {
        KeyEvent {
            key,
            action: Action::Press,
            mods: self,
        }
    }
}

impl Add<char> for Mods {
    type Output = KeyEvent;

    fn add(self, c: char) -> Self::Output {
        self + KeyCode::from(c)
    }
}

/// Logical key identifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Return/Enter.
    Enter,
    /// Escape.
    Esc,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Insert.
    Insert,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Function key `F(n)`.
    F(u8),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        match c {
            '\n' | '\r' => Self::Enter,
            '\t' => Self::Tab,
            '\x1b' => Self::Esc,
            c => Self::Char(c),
        }
    }
}

/// A key transition with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct KeyEvent {
    /// The key.
    pub key: KeyCode,
    /// Press, release or repeat.
    pub action: Action,
    /// Modifier state at the time of the event.
    pub mods: Mods,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub fn press(key: impl Into<KeyCode>) -> Self {
        Mods::NONE + key.into()
    }

    /// The same key with a different action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::press(c)
    }
}

impl PartialEq<KeyCode> for KeyEvent {
    /// Matches only an unmodified event for the same key.
    fn eq(&self, key: &KeyCode) -> bool {
        self.mods.is_empty() && self.key == *key
    }
}

impl PartialEq<char> for KeyEvent {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::from(*c)
    }
}
