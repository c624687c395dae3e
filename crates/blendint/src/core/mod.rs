//! Core types: the view tree, the negotiation protocol and event dispatch.

/// Rendering backend and window-system contracts.
pub mod backend;
/// Toolkit configuration.
pub mod config;
/// Window-level context and event dispatch.
pub mod context;
/// Mouse cursor shapes.
pub mod cursor;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Glyph caching and text layout.
pub mod font;
/// Node ID types.
pub mod id;
/// View names.
pub mod name;
/// Node data stored in the tree.
pub mod node;
/// Negotiation requests.
pub mod request;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// The view tree arena.
pub mod tree;
/// The view trait.
pub mod view;

pub use context::{Context, EventContext};
pub use id::{NodeId, TypedId};
pub use name::ViewName;
pub use node::{Node, NodeKind};
pub use tree::Tree;
