//! BlendInt: a retained-mode widget core.
//!
//! Views live in a [`Tree`] arena and negotiate their geometry with their
//! containers: a container proposes sizes and positions to its children,
//! a child may accept, clamp or refuse, and a child whose preferred size
//! changes asks its container to re-arrange. A [`Context`] owns the tree,
//! routes window-system input to views and drives drawing through an
//! abstract [`Painter`](backend::Painter).
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Point, Size, Rect, Edges)
//! - [`layout`] - Linear, table, block, stack and free arrangements
//! - [`form`] - Round-cornered outlines
//! - [`font`] - Glyph cache and text layout over a font service

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

pub mod form;
pub mod layout;
pub mod prelude;

pub use blendint_geom as geom;
#[cfg(any(test, feature = "testing"))]
pub use core::testing;
pub use core::{
    Context, EventContext, Node, NodeId, NodeKind, Tree, TypedId, ViewName, backend, config,
    cursor, dump, error, event, font, request, view,
};
