use crate::{
    core::{id::NodeId, name::ViewName, view::View},
    form::{Outline, RoundType},
    geom::{Margin, Point, Rect, Size},
    layout::{Arrangement, Cell},
};

/// Whether a node arranges children.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A node without children.
    Leaf,
    /// A node that places its children with an arrangement.
    Container(Arrangement),
}

/// Node data stored in the tree arena.
pub struct Node {
    /// View behaviour. Absent for plain containers, and briefly while the
    /// view's own event handler runs.
    pub(crate) view: Option<Box<dyn View>>,
    /// Leaf or container.
    pub(crate) kind: NodeKind,

    /// Parent in the tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in arrangement order.
    pub(crate) children: Vec<NodeId>,

    /// Position relative to the parent's origin.
    pub(crate) position: Point,
    /// Size; both sides are always positive.
    pub(crate) size: Size,
    /// Inset between the node's edge and its content.
    pub(crate) margin: Margin,
    /// Hidden nodes are skipped by arrangement, hit-testing and drawing.
    pub(crate) visible: bool,
    /// Rounded corners.
    pub(crate) round: RoundType,
    /// Corner radius as requested.
    pub(crate) radius: f32,
    /// Corner radius clamped to the current size.
    pub(crate) effective_radius: f32,
    /// Stacking order among top-level frames.
    pub(crate) layer: i32,
    /// Node name.
    pub(crate) name: ViewName,
    /// Table cell, for children of table containers.
    pub(crate) cell: Option<Cell>,

    /// Cached preferred size.
    pub(crate) preferred: Size,
    /// Cached expand flags.
    pub(crate) expand: (bool, bool),
    /// Cached outline for `size`, `round` and `effective_radius`.
    pub(crate) outline: Outline,
}

impl Node {
    /// The node's name.
    pub fn name(&self) -> &ViewName {
        &self.name
    }

    /// Leaf or container.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The container's arrangement, if this is a container.
    pub fn arrangement(&self) -> Option<&Arrangement> {
        match &self.kind {
            NodeKind::Container(a) => Some(a),
            NodeKind::Leaf => None,
        }
    }

    /// True if the node can hold children.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    /// The parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rectangle relative to the parent.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    /// Current margin.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Content box in local coordinates, or `None` when the margins leave no room.
    pub fn content_rect(&self) -> Option<Rect> {
        self.size.rect().inset(self.margin)
    }

    /// Is the node shown?
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rounded corners.
    pub fn round_type(&self) -> RoundType {
        self.round
    }

    /// Requested corner radius.
    pub fn requested_radius(&self) -> f32 {
        self.radius
    }

    /// Corner radius clamped to the current size.
    pub fn radius(&self) -> f32 {
        self.effective_radius
    }

    /// Stacking layer.
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Table cell, if any.
    pub fn cell(&self) -> Option<Cell> {
        self.cell
    }

    /// Cached preferred size.
    pub fn preferred_size(&self) -> Size {
        self.preferred
    }

    /// Cached expand flags.
    pub fn expand(&self) -> (bool, bool) {
        self.expand
    }

    /// Cached outline.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// The view, unless it is currently lent out to its own handler.
    pub fn view(&self) -> Option<&dyn View> {
        self.view.as_deref()
    }
}
