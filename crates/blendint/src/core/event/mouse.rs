use super::{Action, Mods};
use crate::geom::Point;

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary button.
    Left,
    /// Secondary button, routed to the context-menu hooks.
    Right,
    /// Middle button.
    Middle,
}

/// A button transition as reported by the window system. The position is
/// the last position passed to `Context::cursor_pos_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButtonEvent {
    /// Which button.
    pub button: Button,
    /// Press or release.
    pub action: Action,
    /// Modifier state.
    pub mods: Mods,
}

impl MouseButtonEvent {
    /// A button press without modifiers.
    pub fn press(button: Button) -> Self {
        Self {
            button,
            action: Action::Press,
            mods: Mods::NONE,
        }
    }

    /// A button release without modifiers.
    pub fn release(button: Button) -> Self {
        Self {
            button,
            action: Action::Release,
            mods: Mods::NONE,
        }
    }
}

/// Kind of mouse event delivered to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseKind {
    /// A button went down.
    Press,
    /// A button went up.
    Release,
    /// The pointer moved.
    Move,
}

/// A mouse event as seen by a view handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseKind,
    /// Button involved; for moves, the button held down, if any.
    pub button: Option<Button>,
    /// Modifier state.
    pub mods: Mods,
    /// Pointer position in window coordinates.
    pub position: Point,
    /// Pointer position relative to the receiving view's top-left corner.
    pub local: Point,
}
