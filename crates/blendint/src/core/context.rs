//! The window-level context: input dispatch, focus, hover, cursor and redraw.

use crate::{
    backend::{Painter, Platform, RenderContext},
    config::Config,
    core::{
        id::{NodeId, TypedId},
        tree::Tree,
        view::{Response, View},
    },
    cursor::{CursorStack, CursorType},
    error::{Error, Result},
    event::{Action, Button, KeyEvent, Mods, MouseButtonEvent, MouseEvent, MouseKind},
    geom::{Point, Rect, Size},
};

/// What a view handler can do while handling an event.
pub trait EventContext {
    /// The node whose handler is running.
    fn node_id(&self) -> NodeId;

    /// Read access to the tree.
    fn tree(&self) -> &Tree;

    /// The handling node's rectangle in window coordinates.
    fn absolute_rect(&self) -> Rect {
        self.tree()
            .absolute_rect(self.node_id())
            .unwrap_or_default()
    }

    /// Ask for the window to be redrawn.
    fn request_redraw(&mut self);

    /// Save the current cursor and show `cursor`.
    fn push_cursor(&mut self, cursor: CursorType);

    /// Save the current cursor without changing it.
    fn push_current_cursor(&mut self);

    /// Restore the last saved cursor.
    fn pop_cursor(&mut self);

    /// Show `cursor` without saving the current one.
    fn set_cursor(&mut self, cursor: CursorType);

    /// The cursor currently shown.
    fn current_cursor(&self) -> CursorType;

    /// The focused node.
    fn focus(&self) -> Option<NodeId>;

    /// Move the focus.
    fn set_focus(&mut self, node: Option<NodeId>);

    /// Does the handling node hold the focus?
    fn is_focused(&self) -> bool {
        self.focus() == Some(self.node_id())
    }

    /// Propose a new size for a node.
    fn resize(&mut self, node: NodeId, size: Size) -> bool;

    /// Move a node relative to its parent.
    fn move_to(&mut self, node: NodeId, position: Point) -> bool;

    /// Re-read a node's preferred size after its content changed.
    fn invalidate_preferred(&mut self, node: NodeId) -> Result<()>;
}

/// An overlay frame above every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    /// Root of the frame's subtree.
    id: NodeId,
    /// Blocks hit-testing of everything below it.
    modal: bool,
}

/// Owns the view tree and routes window-system input through it.
///
/// Geometry changes and `Accept` responses mark the context dirty; the
/// platform is asked for a redraw once per transition from clean to dirty,
/// and [`Context::draw`] makes it clean again.
pub struct Context {
    /// The view tree.
    tree: Tree,
    /// Popup frames, bottom first.
    frames: Vec<Frame>,
    /// Cursor shape and saved shapes.
    cursor: CursorStack,
    /// Node receiving key events.
    focus: Option<NodeId>,
    /// Nodes under the pointer, outermost first.
    hover: Vec<NodeId>,
    /// Button currently held.
    pressed: Option<Button>,
    /// Last reported pointer position.
    pointer: Point,
    /// A redraw has been requested and not yet performed.
    dirty: bool,
    /// Window-system callbacks.
    platform: Box<dyn Platform>,
}

impl Context {
    /// Create a context with the default configuration.
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self::build(Config::default(), Box::new(platform))
    }

    /// Create a context with an explicit configuration.
    pub fn with_config(config: Config, platform: impl Platform + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Box::new(platform)))
    }

    /// Assemble a context around an already validated configuration.
    fn build(config: Config, platform: Box<dyn Platform>) -> Self {
        Self {
            tree: Tree::new(config),
            frames: Vec::new(),
            cursor: CursorStack::new(),
            focus: None,
            hover: Vec::new(),
            pressed: None,
            pointer: Point::zero(),
            dirty: false,
            platform,
        }
    }

    /// Read access to the tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutate the tree, requesting a redraw if anything visible changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Tree) -> R) -> R {
        let out = f(&mut self.tree);
        self.sync();
        out
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        self.tree.config()
    }

    /// Window size.
    pub fn size(&self) -> Size {
        self.tree.size(self.tree.root()).unwrap_or(Size::ZERO)
    }

    /// A redraw is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The focused node.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Nodes under the pointer, outermost first.
    pub fn hovered(&self) -> &[NodeId] {
        &self.hover
    }

    /// The cursor currently shown.
    pub fn current_cursor(&self) -> CursorType {
        self.cursor.current()
    }

    /// Create a leaf and attach it to `parent`.
    pub fn add<V: View>(&mut self, parent: impl Into<NodeId>, view: V) -> Result<TypedId<V>> {
        let parent = parent.into();
        self.update(|t| t.add(parent, view))
    }

    /// Attach a detached node to the root as a top-level frame on `layer`.
    pub fn add_frame(&mut self, id: impl Into<NodeId>, layer: i32) -> Result<()> {
        let id = id.into();
        self.update(|t| {
            t.add_child(t.root(), id)?;
            t.set_layer(id, layer);
            Ok(())
        })
    }

    /// Show a detached node as a popup above every layer. A modal popup
    /// hides everything below it from the pointer.
    pub fn push_frame(&mut self, id: impl Into<NodeId>, modal: bool) -> Result<()> {
        let id = id.into();
        if id == self.tree.root() {
            return Err(Error::RootRemoval);
        }
        let node = self.tree.node(id).ok_or(Error::NodeNotFound(id))?;
        if node.parent().is_some() || self.frames.iter().any(|f| f.id == id) {
            return Err(Error::AlreadyAttached(id));
        }
        tracing::debug!(?id, modal, depth = self.frames.len() + 1, "push frame");
        self.frames.push(Frame { id, modal });
        self.request_redraw();
        Ok(())
    }

    /// Remove the topmost popup and its subtree. Returns false when there
    /// is no popup.
    pub fn pop_frame(&mut self) -> bool {
        let Some(frame) = self.frames.pop() else {
            return false;
        };
        tracing::debug!(id = ?frame.id, depth = self.frames.len(), "pop frame");
        if let Err(e) = self.tree.remove(frame.id) {
            tracing::warn!(id = ?frame.id, error = %e, "failed to remove frame");
        }
        self.prune();
        self.request_redraw();
        true
    }

    /// Popup frames, bottom first.
    pub fn frames(&self) -> Vec<NodeId> {
        self.frames.iter().map(|f| f.id).collect()
    }

    /// Mark the window dirty, notifying the platform on the first request.
    pub fn request_redraw(&mut self) {
        if !self.dirty {
            self.dirty = true;
            self.platform.request_redraw();
        }
    }

    /// Pick up geometry changes made to the tree.
    fn sync(&mut self) {
        if self.tree.take_dirty() {
            self.request_redraw();
        }
    }

    /// Forget nodes that no longer exist.
    fn prune(&mut self) {
        let tree = &self.tree;
        self.focus = self.focus.filter(|id| tree.contains(*id));
        self.hover.retain(|id| tree.contains(*id));
        self.frames.retain(|f| tree.contains(f.id));
    }

    /// Save the current cursor and show `cursor`.
    pub fn push_cursor(&mut self, cursor: CursorType) {
        let changed = self.cursor.push(cursor);
        tracing::debug!(?cursor, depth = self.cursor.depth(), "push cursor");
        self.show_cursor(changed);
    }

    /// Save the current cursor without changing it.
    pub fn push_current_cursor(&mut self) {
        self.cursor.push_current();
    }

    /// Restore the last saved cursor. Does nothing if none was saved.
    pub fn pop_cursor(&mut self) {
        let changed = self.cursor.pop();
        tracing::debug!(current = ?self.cursor.current(), depth = self.cursor.depth(), "pop cursor");
        self.show_cursor(changed);
    }

    /// Show `cursor` without saving the current one.
    pub fn set_cursor(&mut self, cursor: CursorType) {
        let changed = self.cursor.set(cursor);
        self.show_cursor(changed);
    }

    /// Forward a cursor change to the platform.
    fn show_cursor(&mut self, changed: Option<CursorType>) {
        if let Some(cursor) = changed {
            self.platform.set_cursor(cursor);
        }
    }

    /// Move the focus.
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        let node = node.filter(|id| self.tree.contains(*id));
        if self.focus != node {
            tracing::debug!(from = ?self.focus, to = ?node, "focus");
            self.focus = node;
        }
    }

    /// Deepest visible node under `point`: popup frames first, topmost
    /// first, stopping at a modal frame; then the root's layers.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        for frame in self.frames.iter().rev() {
            if let Some(hit) = self.tree.locate(frame.id, point) {
                return Some(hit);
            }
            if frame.modal {
                return None;
            }
        }
        self.tree.hit_test(point)
    }

    /// A node and its ancestors below the root, outermost first.
    fn chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = Some(id);
        while let Some(next) = current {
            if next == self.tree.root() {
                break;
            }
            out.push(next);
            current = self.tree.parent(next);
        }
        out.reverse();
        out
    }

    /// Lend a view to `f` along with a handler context for its node.
    ///
    /// The view is out of its slot for the duration of the call, so
    /// requests about the same node made by the handler skip the view's
    /// hooks. Its preferred size is re-read once it is back.
    fn with_view_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn View, &mut dyn EventContext) -> R,
    ) -> Option<R> {
        let mut view = self.tree.take_view(id)?;
        let out = f(&mut *view, &mut HandlerContext { ctx: self, node: id });
        self.tree.restore_view(id, view);
        self.tree.report_preferred(id);
        self.sync();
        Some(out)
    }

    /// Offer an event to `start` and then its ancestors until one handles it.
    fn bubble(
        &mut self,
        start: NodeId,
        mut f: impl FnMut(&mut dyn View, &mut dyn EventContext) -> Response,
    ) -> Option<(NodeId, Response)> {
        let mut target = Some(start);
        while let Some(id) = target {
            let response = self.with_view_mut(id, &mut f);
            if let Some(r) = response.filter(|r| r.is_handled()) {
                if r == Response::Accept {
                    self.request_redraw();
                }
                return Some((id, r));
            }
            target = self.tree.parent(id);
        }
        None
    }

    /// Deliver a hook that does not bubble.
    fn notify(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn View, &mut dyn EventContext) -> Response,
    ) {
        if self.with_view_mut(id, f) == Some(Response::Accept) {
            self.request_redraw();
        }
    }

    /// The window was resized. Zero dimensions are ignored.
    pub fn resize_event(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::trace!(width, height, "ignored window resize");
            return;
        }
        self.update(|t| t.resize(t.root(), Size::new(width, height)));
    }

    /// The pointer moved.
    pub fn cursor_pos_event(&mut self, x: i32, y: i32) -> Response {
        self.prune();
        let point = Point::new(x, y);
        self.pointer = point;

        let path = self
            .hit_test(point)
            .map(|id| self.chain(id))
            .unwrap_or_default();
        let common = self
            .hover
            .iter()
            .zip(&path)
            .take_while(|(a, b)| a == b)
            .count();
        let left: Vec<NodeId> = self.hover[common..].iter().rev().copied().collect();
        let entered: Vec<NodeId> = path[common..].to_vec();
        let deepest = path.last().copied();
        self.hover = path;

        for id in left {
            self.notify(id, |v, c| v.cursor_exit(c));
        }
        for id in entered {
            self.notify(id, |v, c| v.cursor_enter(c));
        }

        let target = if self.pressed.is_some() {
            self.focus.or(deepest)
        } else {
            deepest
        };
        let Some(target) = target else {
            return Response::Ignore;
        };
        let base = self.mouse_event(MouseKind::Move, self.pressed, Mods::NONE);
        self.bubble(target, |v, c| v.mouse_move(&localize(base, c), c))
            .map_or(Response::Ignore, |(_, r)| r)
    }

    /// A mouse button changed state at the last pointer position.
    pub fn mouse_button_event(&mut self, event: MouseButtonEvent) -> Response {
        self.prune();
        match event.action {
            Action::Press => self.mouse_press(event),
            Action::Release => self.mouse_release(event),
            Action::Repeat => Response::Ignore,
        }
    }

    /// A mouse event at the pointer. Handlers get it localized to their node.
    fn mouse_event(
        &self,
        kind: MouseKind,
        button: Option<Button>,
        mods: Mods,
    ) -> MouseEvent {
        MouseEvent {
            kind,
            button,
            mods,
            position: self.pointer,
            local: self.pointer,
        }
    }

    /// Route a press to the node under the pointer and focus whichever
    /// focusable view handled it. Right presses go to the context menu hooks.
    fn mouse_press(&mut self, event: MouseButtonEvent) -> Response {
        self.pressed = Some(event.button);
        let Some(hit) = self.hit_test(self.pointer) else {
            return Response::Ignore;
        };
        let base = self.mouse_event(MouseKind::Press, Some(event.button), event.mods);
        let handled = if event.button == Button::Right {
            self.bubble(hit, |v, c| v.context_menu_press(&localize(base, c), c))
        } else {
            self.bubble(hit, |v, c| v.mouse_press(&localize(base, c), c))
        };
        let Some((id, response)) = handled else {
            return Response::Ignore;
        };
        let focusable = self
            .tree
            .node(id)
            .and_then(|n| n.view())
            .is_some_and(|v| v.accept_focus());
        if focusable {
            self.set_focus(Some(id));
        }
        response
    }

    /// Route a release to the focused view, or the node under the pointer
    /// when nothing has focus.
    fn mouse_release(&mut self, event: MouseButtonEvent) -> Response {
        self.pressed = None;
        let Some(target) = self.focus.or_else(|| self.hit_test(self.pointer)) else {
            return Response::Ignore;
        };
        let base = self.mouse_event(MouseKind::Release, Some(event.button), event.mods);
        let handled = if event.button == Button::Right {
            self.bubble(target, |v, c| v.context_menu_release(&localize(base, c), c))
        } else {
            self.bubble(target, |v, c| v.mouse_release(&localize(base, c), c))
        };
        handled.map_or(Response::Ignore, |(_, r)| r)
    }

    /// A key changed state. Goes to the focused view, then its ancestors.
    pub fn key_event(&mut self, event: KeyEvent) -> Response {
        self.prune();
        let Some(focus) = self.focus else {
            return Response::Ignore;
        };
        self.bubble(focus, |v, c| v.key_press(&event, c))
            .map_or(Response::Ignore, |(_, r)| r)
    }

    /// Nodes in paint order: layers lowest first, then popup frames.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        for id in self.tree.layers() {
            order.extend(self.tree.paint_order(id));
        }
        for frame in &self.frames {
            order.extend(self.tree.paint_order(frame.id));
        }
        order
    }

    /// Draw every visible view. A view that fails or declines to draw is
    /// logged and skipped. Returns the number of views drawn.
    pub fn draw(&mut self, painter: &mut dyn Painter) -> Result<usize> {
        painter.begin_frame(self.size())?;
        let mut drawn = 0;
        for id in self.paint_order() {
            let Some(node) = self.tree.node(id) else {
                continue;
            };
            let (Some(view), Some(rect)) = (node.view(), self.tree.absolute_rect(id)) else {
                continue;
            };
            let mut r = RenderContext {
                node: id,
                rect,
                outline: &node.outline,
                round: node.round,
                radius: node.effective_radius,
                focused: self.focus == Some(id),
                hovered: self.hover.contains(&id),
                painter: &mut *painter,
            };
            match view.draw(&mut r) {
                Ok(Response::Ignore) => tracing::warn!(?id, name = %node.name(), "view declined to draw"),
                Ok(_) => drawn += 1,
                Err(e) => tracing::warn!(?id, name = %node.name(), error = %e, "draw failed"),
            }
        }
        painter.end_frame()?;
        self.tree.take_dirty();
        self.dirty = false;
        Ok(drawn)
    }
}

/// Fill in the pointer position relative to the handling node.
fn localize(base: MouseEvent, ctx: &dyn EventContext) -> MouseEvent {
    MouseEvent {
        local: base.position - ctx.absolute_rect().tl,
        ..base
    }
}

/// The [`EventContext`] handed to a view's handler.
struct HandlerContext<'a> {
    /// The owning context.
    ctx: &'a mut Context,
    /// Node whose handler is running.
    node: NodeId,
}

impl EventContext for HandlerContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node
    }

    fn tree(&self) -> &Tree {
        &self.ctx.tree
    }

    fn request_redraw(&mut self) {
        self.ctx.request_redraw();
    }

    fn push_cursor(&mut self, cursor: CursorType) {
        self.ctx.push_cursor(cursor);
    }

    fn push_current_cursor(&mut self) {
        self.ctx.push_current_cursor();
    }

    fn pop_cursor(&mut self) {
        self.ctx.pop_cursor();
    }

    fn set_cursor(&mut self, cursor: CursorType) {
        self.ctx.set_cursor(cursor);
    }

    fn current_cursor(&self) -> CursorType {
        self.ctx.current_cursor()
    }

    fn focus(&self) -> Option<NodeId> {
        self.ctx.focus
    }

    fn set_focus(&mut self, node: Option<NodeId>) {
        self.ctx.set_focus(node);
    }

    fn resize(&mut self, node: NodeId, size: Size) -> bool {
        self.ctx.update(|t| t.resize(node, size))
    }

    fn move_to(&mut self, node: NodeId, position: Point) -> bool {
        self.ctx.update(|t| t.move_to(node, position))
    }

    fn invalidate_preferred(&mut self, node: NodeId) -> Result<()> {
        self.ctx.update(|t| t.invalidate_preferred(node))
    }
}
