//! Vector chrome for widgets: round-cornered box outlines.

/// Round-corner outline generation.
mod round;

pub use round::{Outline, RoundType, Vertex, clamp_radius};
