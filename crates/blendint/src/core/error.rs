use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{core::id::NodeId, geom};

/// Result type for blendint operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Invalid geometry requests are not errors: they are rejected in place and
/// reported through a `false` return. These variants cover tree-structure
/// violations and failures surfaced by the external collaborators.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The id does not refer to a live node.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),

    /// The child is not a direct child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Expected parent.
        parent: NodeId,
        /// Offending child.
        child: NodeId,
    },

    /// Attaching would create a cycle.
    #[error("attaching {0:?} would create a cycle")]
    Cycle(NodeId),

    /// The operation needs a container node.
    #[error("not a container: {0:?}")]
    NotAContainer(NodeId),

    /// The root node cannot be removed or re-parented.
    #[error("the root node cannot be removed")]
    RootRemoval,

    /// Table cell addressing failure.
    #[error("cell: {0}")]
    Cell(String),

    /// Invalid configuration value.
    #[error("config: {0}")]
    Config(String),

    /// Font service or glyph cache failure.
    #[error("font: {0}")]
    Font(String),

    /// Rendering backend failure.
    #[error("render: {0}")]
    Render(String),

    /// Geometry failure.
    #[error("geometry: {0}")]
    Geometry(String),

    /// Invalid input.
    #[error("invalid: {0}")]
    Invalid(String),

    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
