//! Arrangement algorithms for container nodes.
//!
//! Every arrangement is a pure function from a container's content box and a
//! snapshot of its children to a list of placements. The tree applies the
//! placements by re-entering the size negotiation protocol for each child in
//! turn.

/// Blender-style button blocks.
mod block;
/// Axis space distribution.
pub mod distribute;
/// Absolute placement for frames and the root.
mod free;
/// Horizontal and vertical packing.
mod linear;
/// One visible page at a time.
mod stack;
/// Row/column grids.
mod table;

pub use block::BlockLayout;
pub use free::FreeLayout;
pub use linear::LinearLayout;
pub use stack::StackLayout;
pub use table::{Scan, TableLayout};

use crate::{
    form::RoundType,
    geom::{Margin, Orientation, Point, Rect, Size},
};

/// Alignment of children that do not fill a container's cross axis.
///
/// Horizontal arrangements honour `Top`/`Bottom`, vertical ones
/// `Left`/`Right`; an alignment that does not apply to the axis centers.
/// `Fill` stretches every child across the cross axis regardless of its
/// expand flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Center on the cross axis.
    #[default]
    Center,
    /// Align to the left edge.
    Left,
    /// Align to the right edge.
    Right,
    /// Align to the top edge.
    Top,
    /// Align to the bottom edge.
    Bottom,
    /// Stretch across the cross axis.
    Fill,
}

/// Where a child sits along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// Leading edge.
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
}

impl Alignment {
    /// The anchor on the cross axis of an arrangement along `orientation`.
    fn cross_anchor(self, orientation: Orientation) -> Anchor {
        match (orientation, self) {
            (Orientation::Horizontal, Self::Top) | (Orientation::Vertical, Self::Left) => {
                Anchor::Start
            }
            (Orientation::Horizontal, Self::Bottom) | (Orientation::Vertical, Self::Right) => {
                Anchor::End
            }
            _ => Anchor::Center,
        }
    }
}

/// Offset of a child of extent `child` inside `available` for an anchor.
fn anchor_offset(child: u32, available: u32, anchor: Anchor) -> u32 {
    match anchor {
        Anchor::Start => 0,
        Anchor::Center => available.saturating_sub(child) / 2,
        Anchor::End => available.saturating_sub(child),
    }
}

/// A table cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub column: u32,
}

impl Cell {
    /// Construct a cell address.
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Snapshot of a child handed to an arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildInfo {
    /// Preferred size of the child.
    pub preferred: Size,
    /// Wants surplus width.
    pub expand_x: bool,
    /// Wants surplus height.
    pub expand_y: bool,
    /// Currently visible.
    pub visible: bool,
    /// Current position relative to the container.
    pub position: Point,
    /// Current size.
    pub size: Size,
    /// Table cell, if the child was inserted into one.
    pub cell: Option<Cell>,
}

impl ChildInfo {
    /// A visible, non-expanding child of the given preferred size, at the origin.
    pub fn fixed(preferred: Size) -> Self {
        Self {
            preferred,
            expand_x: false,
            expand_y: false,
            visible: true,
            position: Point::zero(),
            size: preferred,
            cell: None,
        }
    }

    /// Set the expand flags.
    pub fn with_expand(mut self, x: bool, y: bool) -> Self {
        self.expand_x = x;
        self.expand_y = y;
        self
    }

    /// Set the table cell.
    pub fn in_cell(mut self, row: u32, column: u32) -> Self {
        self.cell = Some(Cell::new(row, column));
        self
    }

    /// The expand flag along an axis.
    pub fn expand(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.expand_x,
            Orientation::Vertical => self.expand_y,
        }
    }
}

/// Geometry an arrangement assigns to a child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position relative to the container's origin.
    pub position: Point,
    /// Proposed size.
    pub size: Size,
    /// Round-type override, used by block arrangements.
    pub round: Option<RoundType>,
    /// Visibility override, used by stack arrangements.
    pub visible: Option<bool>,
}

impl Placement {
    /// A plain position and size.
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            round: None,
            visible: None,
        }
    }

    /// The placement as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// Behaviour shared by every arrangement.
pub trait Arrange {
    /// Preferred size of a container holding these children, margins included.
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size;

    /// Whether the container wants surplus space on each axis.
    fn expand(&self, children: &[ChildInfo]) -> (bool, bool);

    /// Compute placements for `children` inside the content box `content`.
    ///
    /// The result is parallel to `children`; `None` leaves a child untouched.
    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>>;
}

/// The arrangement carried by a container node.
#[derive(Debug, Clone, PartialEq)]
pub enum Arrangement {
    /// Sequential packing along one axis.
    Linear(LinearLayout),
    /// Row/column grid.
    Table(TableLayout),
    /// Packing with joined corners.
    Block(BlockLayout),
    /// One page visible at a time.
    Stack(StackLayout),
    /// Children keep their own geometry.
    Free(FreeLayout),
}

impl Arrangement {
    /// Borrow the arrangement as a trait object.
    fn inner(&self) -> &dyn Arrange {
        match self {
            Self::Linear(l) => l,
            Self::Table(t) => t,
            Self::Block(b) => b,
            Self::Stack(s) => s,
            Self::Free(f) => f,
        }
    }

    /// Short name for logs and dumps.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(l) if l.orientation == Orientation::Horizontal => "hlayout",
            Self::Linear(_) => "vlayout",
            Self::Table(_) => "table",
            Self::Block(_) => "block",
            Self::Stack(_) => "stack",
            Self::Free(_) => "free",
        }
    }
}

impl Arrange for Arrangement {
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size {
        self.inner().preferred_size(margin, children)
    }

    fn expand(&self, children: &[ChildInfo]) -> (bool, bool) {
        self.inner().expand(children)
    }

    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>> {
        self.inner().arrange(content, children)
    }
}

impl From<LinearLayout> for Arrangement {
    fn from(v: LinearLayout) -> Self {
        Self::Linear(v)
    }
}

impl From<TableLayout> for Arrangement {
    fn from(v: TableLayout) -> Self {
        Self::Table(v)
    }
}

impl From<BlockLayout> for Arrangement {
    fn from(v: BlockLayout) -> Self {
        Self::Block(v)
    }
}

impl From<StackLayout> for Arrangement {
    fn from(v: StackLayout) -> Self {
        Self::Stack(v)
    }
}

impl From<FreeLayout> for Arrangement {
    fn from(v: FreeLayout) -> Self {
        Self::Free(v)
    }
}

/// Enforce the minimum renderable size.
fn at_least_one(size: Size) -> Size {
    Size::new(size.width.max(1), size.height.max(1))
}
