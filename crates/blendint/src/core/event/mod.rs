//! Input events delivered by the window system.

/// Keyboard input.
pub mod key;
/// Mouse input.
pub mod mouse;

pub use key::{KeyCode, KeyEvent, Mods};
pub use mouse::{Button, MouseButtonEvent, MouseEvent, MouseKind};

/// What happened to a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pressed down.
    Press,
    /// Let go.
    Release,
    /// Held down long enough to auto-repeat.
    Repeat,
}
