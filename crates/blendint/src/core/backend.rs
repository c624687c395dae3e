//! Contracts with the rendering backend and the window system.

use crate::{
    core::id::NodeId,
    cursor::CursorType,
    error::Result,
    font::PlacedGlyph,
    form::{Outline, RoundType},
    geom::{Point, Rect, Size},
};

/// Receives draw calls. Implemented by the GPU backend.
pub trait Painter {
    /// Called once before a frame is drawn.
    fn begin_frame(&mut self, _size: Size) -> Result<()> {
        Ok(())
    }

    /// Fill and stroke a round-cornered box. `outline` is in node-local
    /// coordinates; `rect` places it in the window.
    fn shape(&mut self, rect: Rect, outline: &Outline, round: RoundType, radius: f32)
    -> Result<()>;

    /// Blit glyphs whose positions are relative to `origin`.
    fn glyphs(&mut self, origin: Point, glyphs: &[PlacedGlyph]) -> Result<()>;

    /// Called once after a frame is drawn.
    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }
}

/// What a view sees while drawing.
pub struct RenderContext<'a> {
    /// Node being drawn.
    pub(crate) node: NodeId,
    /// Node rectangle in window coordinates.
    pub(crate) rect: Rect,
    /// Cached outline for the node's size and corners.
    pub(crate) outline: &'a Outline,
    /// Rounded corners.
    pub(crate) round: RoundType,
    /// Effective corner radius.
    pub(crate) radius: f32,
    /// Node has the focus.
    pub(crate) focused: bool,
    /// Pointer is over the node.
    pub(crate) hovered: bool,
    /// Backend.
    pub(crate) painter: &'a mut dyn Painter,
}

impl RenderContext<'_> {
    /// The node being drawn.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// The node's rectangle in window coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The node's outline in local coordinates.
    pub fn outline(&self) -> &Outline {
        self.outline
    }

    /// Rounded corners of the node.
    pub fn round(&self) -> RoundType {
        self.round
    }

    /// Effective corner radius of the node.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether the node holds the focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the pointer is over the node.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Direct access to the backend.
    pub fn painter(&mut self) -> &mut dyn Painter {
        self.painter
    }

    /// Paint the node's round-cornered box.
    pub fn shape(&mut self) -> Result<()> {
        self.painter
            .shape(self.rect, self.outline, self.round, self.radius)
    }

    /// Paint glyphs positioned relative to the node's top-left corner.
    pub fn glyphs(&mut self, glyphs: &[PlacedGlyph]) -> Result<()> {
        self.painter.glyphs(self.rect.tl, glyphs)
    }
}

/// Outbound calls to the window system.
pub trait Platform {
    /// Ask for a frame to be drawn soon.
    fn request_redraw(&mut self);

    /// Change the displayed mouse cursor.
    fn set_cursor(&mut self, cursor: CursorType);
}

/// A platform that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlatform;

impl Platform for NullPlatform {
    fn request_redraw(&mut self) {}

    fn set_cursor(&mut self, _cursor: CursorType) {}
}
