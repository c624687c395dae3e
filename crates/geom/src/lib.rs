//! Geometry primitives used across blendint.

#![warn(missing_docs)]

/// Margin and padding edges.
mod edges;
/// Error types for geometry operations.
mod error;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use edges::{Edges, Margin, Padding};
pub use error::{Error, Result};
pub use point::Point;
pub use rect::Rect;
pub use size::Size;

/// Arrangement axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Children are packed left to right.
    #[default]
    Horizontal,
    /// Children are packed top to bottom.
    Vertical,
}

impl Orientation {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
