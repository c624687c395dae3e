use crate::{
    core::id::NodeId,
    form::RoundType,
    geom::{Margin, Point, Size},
};

/// Direction in which an update travels through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Issued by a caller or by a parent arranging its children.
    TopDown,
    /// Issued by a parent re-arranging because a child's preferred size changed.
    BottomUp,
}

/// A proposed change to one attribute of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    /// New size.
    Size(Size),
    /// New position relative to the parent.
    Position(Point),
    /// New margin.
    Margin(Margin),
    /// New set of rounded corners.
    RoundType(RoundType),
    /// New requested corner radius.
    RoundRadius(f32),
    /// Shown or hidden.
    Visibility(bool),
}

/// A single step of the negotiation protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest {
    /// Node that initiated the change: the target itself, or its parent
    /// when the parent is arranging.
    pub source: NodeId,
    /// Node being changed.
    pub target: NodeId,
    /// Direction of travel.
    pub origin: Origin,
    /// The proposed change.
    pub update: Update,
}

impl UpdateRequest {
    /// Whether the target asked for the change itself.
    pub fn is_self_initiated(&self) -> bool {
        self.source == self.target
    }
}
