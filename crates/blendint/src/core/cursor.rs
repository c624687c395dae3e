//! Mouse cursor shapes and the save/restore stack.

/// Cursor shapes the platform is asked to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorType {
    /// Standard arrow.
    #[default]
    Arrow,
    /// Text insertion beam.
    IBeam,
    /// Crosshair.
    Cross,
    /// Pointing hand.
    Hand,
    /// Horizontal resize arrows.
    SplitH,
    /// Vertical resize arrows.
    SplitV,
    /// Four-way move.
    Move,
    /// Busy indicator.
    Wait,
    /// Action not allowed.
    Forbidden,
}

/// The current cursor plus a stack of saved cursors.
///
/// Starts at [`CursorType::Arrow`] with an empty stack. Every operation
/// returns the cursor that should now be shown when it changed.
#[derive(Debug, Clone, Default)]
pub struct CursorStack {
    /// Cursor currently shown.
    current: CursorType,
    /// Saved cursors, most recent last.
    saved: Vec<CursorType>,
}

impl CursorStack {
    /// A stack showing the arrow cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cursor currently shown.
    pub fn current(&self) -> CursorType {
        self.current
    }

    /// Number of saved cursors.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save the current cursor and show `cursor`.
    pub fn push(&mut self, cursor: CursorType) -> Option<CursorType> {
        self.saved.push(self.current);
        self.set(cursor)
    }

    /// Save the current cursor without changing it.
    pub fn push_current(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved cursor. An empty stack is left alone.
    pub fn pop(&mut self) -> Option<CursorType> {
        let cursor = self.saved.pop()?;
        self.set(cursor)
    }

    /// Show `cursor` without saving the current one.
    pub fn set(&mut self, cursor: CursorType) -> Option<CursorType> {
        if self.current == cursor {
            return None;
        }
        self.current = cursor;
        Some(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_restores() {
        let mut s = CursorStack::new();
        assert_eq!(s.push(CursorType::Arrow), None);
        assert_eq!(s.push(CursorType::Cross), Some(CursorType::Cross));
        assert_eq!(s.pop(), Some(CursorType::Arrow));
        assert_eq!(s.current(), CursorType::Arrow);
        s.pop();
        assert_eq!(s.pop(), None);
        assert_eq!(s.current(), CursorType::Arrow);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn set_does_not_save() {
        let mut s = CursorStack::new();
        s.push_current();
        s.set(CursorType::Hand);
        assert_eq!(s.current(), CursorType::Hand);
        assert_eq!(s.pop(), Some(CursorType::Arrow));
    }
}
