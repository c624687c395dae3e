//! The capability trait implemented by every view.

use std::any::Any;

use crate::{
    backend::RenderContext,
    core::{context::EventContext, name::ViewName},
    error::Result,
    event::{KeyEvent, MouseEvent},
    geom::Size,
    request::UpdateRequest,
};

/// Preferred size of a view that does not say otherwise.
pub const DEFAULT_PREFERRED_SIZE: Size = Size {
    width: 100,
    height: 20,
};

/// The result of an event handler or a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Response {
    /// Handled; propagation stops and a redraw is requested.
    Accept,
    /// Handled without a visible change; propagation stops.
    Finish,
    /// Not handled; the event bubbles to the parent.
    Ignore,
}

impl Response {
    /// True for `Accept` and `Finish`.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

/// A view's answer to a proposed update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Apply the update as proposed.
    Accept,
    /// Apply a different size instead. Only meaningful for size updates;
    /// treated as `Accept` for everything else.
    Clamp(Size),
    /// Leave the node unchanged.
    Refuse,
}

/// Behaviour attached to a node of the view tree.
///
/// Geometry lives in the tree, not in the view: a view describes what it
/// would like (`preferred_size`, the expand flags), vets and observes
/// updates through `test_update`/`perform_update`, reacts to input and
/// draws itself. Every method has a default, so a view only overrides
/// what it needs.
pub trait View: Any {
    /// Name used in dumps and lookups.
    fn name(&self) -> ViewName {
        ViewName::of_type::<Self>()
    }

    /// Size this view would take if unconstrained.
    fn preferred_size(&self) -> Size {
        DEFAULT_PREFERRED_SIZE
    }

    /// Whether this view wants surplus width.
    fn expand_x(&self) -> bool {
        false
    }

    /// Whether this view wants surplus height.
    fn expand_y(&self) -> bool {
        false
    }

    /// Whether a press this view handles gives it the focus.
    fn accept_focus(&self) -> bool {
        true
    }

    /// Vet a proposed update before the tree stores it.
    fn test_update(&self, _request: &UpdateRequest) -> Verdict {
        Verdict::Accept
    }

    /// Observe an update after the tree stored it.
    fn perform_update(&mut self, _request: &UpdateRequest) {}

    /// A key event while this view, or a descendant, has the focus.
    fn key_press(&mut self, _event: &KeyEvent, _ctx: &mut dyn EventContext) -> Response {
        Response::Ignore
    }

    /// A left or middle button press over this view.
    fn mouse_press(&mut self, _event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        Response::Ignore
    }

    /// A left or middle button release.
    fn mouse_release(&mut self, _event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        Response::Ignore
    }

    /// Pointer motion.
    fn mouse_move(&mut self, _event: &MouseEvent, _ctx: &mut dyn EventContext) -> Response {
        Response::Ignore
    }

    /// The pointer entered this view.
    fn cursor_enter(&mut self, _ctx: &mut dyn EventContext) -> Response {
        Response::Ignore
    }

    /// The pointer left this view.
    fn cursor_exit(&mut self, _ctx: &mut dyn EventContext) -> Response {
        Response::Ignore
    }

    /// A right button press over this view.
    fn context_menu_press(
        &mut self,
        _event: &MouseEvent,
        _ctx: &mut dyn EventContext,
    ) -> Response {
        Response::Ignore
    }

    /// A right button release.
    fn context_menu_release(
        &mut self,
        _event: &MouseEvent,
        _ctx: &mut dyn EventContext,
    ) -> Response {
        Response::Ignore
    }

    /// Issue backend calls for this view. Children are drawn separately.
    ///
    /// The default paints the node's round-cornered box.
    fn draw(&self, r: &mut RenderContext<'_>) -> Result<Response> {
        r.shape()?;
        Ok(Response::Accept)
    }
}

/// Convert views into boxed trait objects.
impl<V> From<V> for Box<dyn View>
where
    V: View + 'static,
{
    fn from(view: V) -> Self {
        Box::new(view)
    }
}
