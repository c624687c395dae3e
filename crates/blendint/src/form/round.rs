use std::f32::consts::{FRAC_PI_2, PI};

use bitflags::bitflags;

use crate::geom::Size;

bitflags! {
    /// Which corners of a box are drawn as quarter-circle arcs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RoundType: u8 {
        /// Top-left corner.
        const TOP_LEFT = 1;
        /// Top-right corner.
        const TOP_RIGHT = 1 << 1;
        /// Bottom-right corner.
        const BOTTOM_RIGHT = 1 << 2;
        /// Bottom-left corner.
        const BOTTOM_LEFT = 1 << 3;

        /// Both top corners.
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        /// Both bottom corners.
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        /// Both left corners.
        const LEFT = Self::TOP_LEFT.bits() | Self::BOTTOM_LEFT.bits();
        /// Both right corners.
        const RIGHT = Self::TOP_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
        /// Every corner.
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl RoundType {
    /// No rounded corners.
    pub const NONE: Self = Self::empty();
}

/// A 2D vertex in node-local coordinates (origin top-left, y down).
pub type Vertex = [f32; 2];

/// Clamp a corner radius to what fits in a box: at most half the smaller side.
///
/// Negative and NaN radii clamp to zero.
pub fn clamp_radius(size: Size, radius: f32) -> f32 {
    let limit = size.min_side() as f32 / 2.0;
    if radius.is_nan() || radius <= 0.0 {
        0.0
    } else {
        radius.min(limit)
    }
}

/// A corner of the box as walked by the outline.
struct Corner {
    /// Flag selecting this corner.
    flag: RoundType,
    /// Angle at which the corner's arc starts.
    start: f32,
    /// Corner lies on the right edge.
    right: bool,
    /// Corner lies on the bottom edge.
    bottom: bool,
}

/// Corners in clockwise screen order, starting top-left.
const CORNERS: [Corner; 4] = [
    Corner {
        flag: RoundType::TOP_LEFT,
        start: PI,
        right: false,
        bottom: false,
    },
    Corner {
        flag: RoundType::TOP_RIGHT,
        start: PI + FRAC_PI_2,
        right: true,
        bottom: false,
    },
    Corner {
        flag: RoundType::BOTTOM_RIGHT,
        start: 0.0,
        right: true,
        bottom: true,
    },
    Corner {
        flag: RoundType::BOTTOM_LEFT,
        start: FRAC_PI_2,
        right: false,
        bottom: true,
    },
];

/// The outline of a box whose selected corners are replaced by arcs.
///
/// `outer` traces the border's outside edge, `inner` the fill area inset by
/// the border width. Both are closed polygons (the last vertex connects back
/// to the first) with the same number of vertices, so they can be zipped
/// into a quad strip for the border.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    /// Outside edge of the border.
    pub outer: Vec<Vertex>,
    /// Inside edge of the border, which is also the fill polygon.
    pub inner: Vec<Vertex>,
    /// Vertices produced by arcs, per polygon.
    pub arc_vertices: usize,
    /// Vertices produced by square corners, per polygon.
    pub edge_vertices: usize,
}

impl Outline {
    /// Generate the outline for a box.
    ///
    /// `resolution` is the number of vertices per rounded corner and is
    /// raised to at least 2. The radius is clamped with [`clamp_radius`]; a
    /// zero effective radius makes every corner square, so the result
    /// degenerates to a plain 4-vertex rectangle.
    pub fn generate(
        size: Size,
        border_width: f32,
        round: RoundType,
        radius: f32,
        resolution: u32,
    ) -> Self {
        let resolution = resolution.max(2) as usize;
        let radius = clamp_radius(size, radius);
        let round = if radius > 0.0 { round } else { RoundType::NONE };

        let (w, h) = (size.width as f32, size.height as f32);
        let border = if border_width.is_finite() {
            border_width.clamp(0.0, size.min_side() as f32 / 2.0)
        } else {
            0.0
        };
        let inner_radius = (radius - border).max(0.0);

        let rounded = CORNERS.iter().filter(|c| round.contains(c.flag)).count();
        let arc_vertices = rounded * resolution;
        let edge_vertices = CORNERS.len() - rounded;

        let outer = trace(0.0, 0.0, w, h, radius, round, resolution);
        let inner = trace(
            border,
            border,
            w - border,
            h - border,
            inner_radius,
            round,
            resolution,
        );

        Self {
            outer,
            inner,
            arc_vertices,
            edge_vertices,
        }
    }

    /// Number of vertices in each polygon.
    pub fn vertex_count(&self) -> usize {
        self.arc_vertices + self.edge_vertices
    }

    /// The inner polygon as a triangle fan: its centroid, every vertex, then
    /// the first vertex again to close the fan.
    pub fn triangle_fan(&self) -> Vec<Vertex> {
        if self.inner.is_empty() {
            return Vec::new();
        }
        let n = self.inner.len() as f32;
        let (sx, sy) = self
            .inner
            .iter()
            .fold((0.0, 0.0), |(x, y), v| (x + v[0], y + v[1]));
        let mut fan = Vec::with_capacity(self.inner.len() + 2);
        fan.push([sx / n, sy / n]);
        fan.extend_from_slice(&self.inner);
        fan.push(self.inner[0]);
        fan
    }

    /// The border as a triangle strip alternating outer and inner vertices,
    /// closed by repeating the first pair.
    pub fn border_strip(&self) -> Vec<Vertex> {
        let mut strip = Vec::with_capacity(2 * (self.outer.len() + 1));
        for (o, i) in self.outer.iter().zip(&self.inner) {
            strip.push(*o);
            strip.push(*i);
        }
        if let (Some(o), Some(i)) = (self.outer.first(), self.inner.first()) {
            strip.push(*o);
            strip.push(*i);
        }
        strip
    }

    /// Per-vertex shade offsets for the inner polygon: `shade_top` at the top
    /// edge blending linearly to `shade_down` at the bottom edge.
    pub fn vertical_shade(&self, shade_top: f32, shade_down: f32) -> Vec<f32> {
        let (min_y, max_y) = self
            .inner
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v[1]), hi.max(v[1])));
        let span = max_y - min_y;
        self.inner
            .iter()
            .map(|v| {
                if span <= 0.0 {
                    shade_top
                } else {
                    let t = (v[1] - min_y) / span;
                    shade_top + (shade_down - shade_top) * t
                }
            })
            .collect()
    }
}

/// Walk the corners of a box clockwise, emitting an arc for rounded corners
/// and the corner point itself for square ones.
fn trace(
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radius: f32,
    round: RoundType,
    resolution: usize,
) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4 * resolution);
    let step = FRAC_PI_2 / (resolution - 1) as f32;
    for corner in &CORNERS {
        let (x, cx) = if corner.right {
            (right, right - radius)
        } else {
            (left, left + radius)
        };
        let (y, cy) = if corner.bottom {
            (bottom, bottom - radius)
        } else {
            (top, top + radius)
        };
        if !round.contains(corner.flag) {
            out.push([x, y]);
            continue;
        }
        for i in 0..resolution {
            let a = corner.start + step * i as f32;
            out.push([cx + radius * a.cos(), cy + radius * a.sin()]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vertex, b: Vertex) -> bool {
        (a[0] - b[0]).abs() < 1e-3 && (a[1] - b[1]).abs() < 1e-3
    }

    #[test]
    fn square_box_is_four_vertices() {
        let o = Outline::generate(Size::new(40, 20), 1.0, RoundType::NONE, 5.0, 9);
        assert_eq!(o.vertex_count(), 4);
        assert_eq!(o.arc_vertices, 0);
        assert_eq!(o.edge_vertices, 4);
        assert_eq!(o.outer, vec![[0.0, 0.0], [40.0, 0.0], [40.0, 20.0], [0.0, 20.0]]);
        assert_eq!(o.inner, vec![[1.0, 1.0], [39.0, 1.0], [39.0, 19.0], [1.0, 19.0]]);
    }

    #[test]
    fn zero_radius_degenerates() {
        let o = Outline::generate(Size::new(40, 20), 1.0, RoundType::ALL, 0.0, 9);
        assert_eq!(o.vertex_count(), 4);
    }

    #[test]
    fn all_corners_rounded() {
        let o = Outline::generate(Size::new(40, 20), 1.0, RoundType::ALL, 5.0, 9);
        assert_eq!(o.vertex_count(), 36);
        assert_eq!(o.outer.len(), 36);
        assert_eq!(o.inner.len(), 36);
        // Top-left arc runs from the left edge up to the top edge.
        assert!(close(o.outer[0], [0.0, 5.0]));
        assert!(close(o.outer[8], [5.0, 0.0]));
        // Top-right arc.
        assert!(close(o.outer[9], [35.0, 0.0]));
        assert!(close(o.outer[17], [40.0, 5.0]));
        // Bottom-right arc.
        assert!(close(o.outer[18], [40.0, 15.0]));
        assert!(close(o.outer[26], [35.0, 20.0]));
        // Bottom-left arc.
        assert!(close(o.outer[27], [5.0, 20.0]));
        assert!(close(o.outer[35], [0.0, 15.0]));
    }

    #[test]
    fn mixed_corners() {
        let o = Outline::generate(Size::new(40, 20), 1.0, RoundType::LEFT, 5.0, 6);
        assert_eq!(o.arc_vertices, 12);
        assert_eq!(o.edge_vertices, 2);
        assert_eq!(o.outer.len(), 14);
        assert!(close(o.outer[6], [40.0, 0.0]));
        assert!(close(o.outer[7], [40.0, 20.0]));
    }

    #[test]
    fn radius_is_clamped() {
        assert_eq!(clamp_radius(Size::new(40, 20), 100.0), 10.0);
        assert_eq!(clamp_radius(Size::new(40, 20), -3.0), 0.0);
        assert_eq!(clamp_radius(Size::new(40, 20), f32::NAN), 0.0);
        let o = Outline::generate(Size::new(40, 20), 0.0, RoundType::ALL, 100.0, 3);
        // With a clamped radius of 10 the left arcs meet at mid-height.
        assert!(close(o.outer[0], [0.0, 10.0]));
        assert!(close(o.outer[11], [0.0, 10.0]));
    }

    #[test]
    fn strips_and_fans() {
        let o = Outline::generate(Size::new(40, 20), 1.0, RoundType::ALL, 5.0, 4);
        let strip = o.border_strip();
        assert_eq!(strip.len(), 2 * (16 + 1));
        assert_eq!(strip[0], o.outer[0]);
        assert_eq!(strip[1], o.inner[0]);
        assert_eq!(strip[32], o.outer[0]);
        let fan = o.triangle_fan();
        assert_eq!(fan.len(), 16 + 2);
        assert!(close(fan[0], [20.0, 10.0]));
        assert_eq!(fan[17], o.inner[0]);
    }

    #[test]
    fn shade_runs_top_to_bottom() {
        let o = Outline::generate(Size::new(10, 10), 0.0, RoundType::NONE, 0.0, 2);
        let shade = o.vertical_shade(0.2, -0.2);
        assert_eq!(shade, vec![0.2, 0.2, -0.2, -0.2]);
    }
}
