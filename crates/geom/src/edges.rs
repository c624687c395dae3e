use super::Orientation;

/// Per-side extents used for both margins and padding.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edges {
    /// Left extent.
    pub left: u32,
    /// Right extent.
    pub right: u32,
    /// Top extent.
    pub top: u32,
    /// Bottom extent.
    pub bottom: u32,
}

/// The space a container keeps free around its children.
pub type Margin = Edges;

/// The space a leaf keeps free around its own content.
pub type Padding = Edges;

impl Edges {
    /// Construct edges from explicit values, in left, right, top, bottom order.
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same extent on every side.
    pub fn uniform(v: u32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Sum of left and right.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Sum of the two edges along an axis.
    pub fn along(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.horizontal(),
            Orientation::Vertical => self.vertical(),
        }
    }

    /// The leading edge along an axis (left or top).
    pub fn leading(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums() {
        let e = Edges::new(1, 2, 3, 4);
        assert_eq!(e.horizontal(), 3);
        assert_eq!(e.vertical(), 7);
        assert_eq!(e.along(Orientation::Vertical), 7);
        assert_eq!(e.leading(Orientation::Vertical), 3);
        assert_eq!(Edges::uniform(u32::MAX).horizontal(), u32::MAX);
    }
}
