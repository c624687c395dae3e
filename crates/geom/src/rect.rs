use super::{Edges, Point, Size};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// Construct a rectangle from an origin and a size.
    pub fn from_parts(tl: Point, size: Size) -> Self {
        Self {
            tl,
            w: size.width,
            h: size.height,
        }
    }

    /// The zero rectangle.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The dimensions of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i64 {
        self.tl.x as i64 + self.w as i64
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i64 {
        self.tl.y as i64 + self.h as i64
    }

    /// Does the rectangle contain the point? The right and bottom edges are exclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        let (x, y) = (p.x as i64, p.y as i64);
        x >= self.tl.x as i64 && x < self.right() && y >= self.tl.y as i64 && y < self.bottom()
    }

    /// Intersect two rectangles, returning `None` if they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = (self.tl.x as i64).max(other.tl.x as i64);
        let top = (self.tl.y as i64).max(other.tl.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }

    /// Shrink the rectangle by the given edges. Returns `None` if the edges
    /// do not leave a positive area.
    pub fn inset(&self, edges: Edges) -> Option<Self> {
        let w = self.w.checked_sub(edges.horizontal())?;
        let h = self.h.checked_sub(edges.vertical())?;
        if w == 0 || h == 0 {
            return None;
        }
        Some(Self::new(
            self.tl.x.saturating_add(edges.left as i32),
            self.tl.y.saturating_add(edges.top as i32),
            w,
            h,
        ))
    }

    /// Move the rectangle by an offset.
    pub fn translate(&self, by: Point) -> Self {
        Self {
            tl: self.tl + by,
            w: self.w,
            h: self.h,
        }
    }
}
