use super::{Error, Orientation, Point, Rect, Result};

/// A `Size` is a rectangle that has a width and height but no location.
///
/// Realised views always carry a valid size (both dimensions non-zero); a
/// zero size only appears as an intermediate value or an "unset" marker.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Construct a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// This size, or an error naming `what` if either dimension is zero.
    pub fn validated(self, what: &str) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::Geometry(format!(
                "{what} must be non-zero, got {}x{}",
                self.width, self.height
            )))
        }
    }

    /// The area of this size.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The smaller of the two dimensions.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// The extent along an axis.
    pub fn main(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// The extent perpendicular to an axis.
    pub fn cross(&self, orientation: Orientation) -> u32 {
        self.main(orientation.cross())
    }

    /// Build a size from main and cross extents along an axis.
    pub fn from_main_cross(orientation: Orientation, main: u32, cross: u32) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(main, cross),
            Orientation::Vertical => Self::new(cross, main),
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// Return a `Rect` with these dimensions at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.width,
            h: self.height,
        }
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        Self {
            width: r.w,
            height: r.h,
        }
    }
}

impl From<(u32, u32)> for Size {
    fn from(v: (u32, u32)) -> Self {
        Self {
            width: v.0,
            height: v.1,
        }
    }
}
