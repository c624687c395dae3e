use super::{
    Arrange, Cell, ChildInfo, Placement, at_least_one,
    distribute::{Item, distribute},
};
use crate::geom::{Margin, Point, Rect, Size};

/// A fixed grid of `rows × columns` cells with uniform spacing.
///
/// Each column is as wide as its widest cell and each row as tall as its
/// tallest cell. Surplus and deficit are distributed between whole columns
/// and rows, never between individual cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableLayout {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub columns: u32,
    /// Gap between adjacent cells on both axes.
    pub space: u32,
}

/// Per-column and per-row sizing computed from the cells of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    /// Whether any cell in each column expands horizontally.
    pub column_expand: Vec<bool>,
    /// Widest preferred width in each column.
    pub column_width: Vec<u32>,
    /// Whether any cell in each row expands vertically.
    pub row_expand: Vec<bool>,
    /// Tallest preferred height in each row.
    pub row_height: Vec<u32>,
    /// At least one column expands.
    pub expand_x: bool,
    /// At least one row expands.
    pub expand_y: bool,
}

impl TableLayout {
    /// Construct a table.
    pub fn new(rows: u32, columns: u32, space: u32) -> Self {
        Self {
            rows,
            columns,
            space,
        }
    }

    /// Whether a cell address lies within the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// The first cell in row-major order that is not in `occupied`.
    pub fn next_free(&self, occupied: &[Cell]) -> Option<Cell> {
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| Cell::new(row, column)))
            .find(|c| !occupied.contains(c))
    }

    /// Collect expand status and preferred extents for every column and row.
    ///
    /// Hidden children and children without a cell inside the grid are
    /// ignored.
    pub fn scan(&self, children: &[ChildInfo]) -> Scan {
        let mut scan = Scan {
            column_expand: vec![false; self.columns as usize],
            column_width: vec![0; self.columns as usize],
            row_expand: vec![false; self.rows as usize],
            row_height: vec![0; self.rows as usize],
            expand_x: false,
            expand_y: false,
        };
        for child in children.iter().filter(|c| c.visible) {
            let Some(cell) = child.cell.filter(|c| self.contains(*c)) else {
                continue;
            };
            let (r, c) = (cell.row as usize, cell.column as usize);
            scan.column_expand[c] |= child.expand_x;
            scan.column_width[c] = scan.column_width[c].max(child.preferred.width);
            scan.row_expand[r] |= child.expand_y;
            scan.row_height[r] = scan.row_height[r].max(child.preferred.height);
        }
        scan.expand_x = scan.column_expand.iter().any(|e| *e);
        scan.expand_y = scan.row_expand.iter().any(|e| *e);
        scan
    }

    /// Total spacing between `count` tracks.
    fn gaps(&self, count: u32) -> u32 {
        self.space.saturating_mul(count.saturating_sub(1))
    }
}

/// Preferred extent of a run of tracks.
fn total(tracks: &[u32]) -> u32 {
    tracks.iter().fold(0u32, |a, b| a.saturating_add(*b))
}

/// Build distribution items from tracks.
fn items(tracks: &[u32], expand: &[bool]) -> Vec<Item> {
    tracks
        .iter()
        .zip(expand)
        .map(|(t, e)| Item::new(*t, *e))
        .collect()
}

/// Resolve the extents of a run of columns or rows, spacing excluded.
///
/// Tracks that exactly fill `available` keep their preferred extents.
/// Otherwise expanding tracks absorb the difference: they share a surplus
/// and shrink in proportion under a deficit. Fixed tracks never change.
pub fn distribute_tracks(tracks: &[u32], expand: &[bool], available: u32) -> Vec<u32> {
    if total(tracks) == available {
        return tracks.to_vec();
    }
    distribute(available, &items(tracks, expand))
}

impl Scan {
    /// Resolve column widths for the available width, spacing excluded.
    pub fn distribute_horizontally(&self, available: u32) -> Vec<u32> {
        distribute_tracks(&self.column_width, &self.column_expand, available)
    }

    /// Resolve row heights for the available height, spacing excluded.
    pub fn distribute_vertically(&self, available: u32) -> Vec<u32> {
        distribute_tracks(&self.row_height, &self.row_expand, available)
    }
}

/// Leading offset of every track, spacing included.
fn offsets(tracks: &[u32], space: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(tracks.len());
    let mut at = 0u32;
    for t in tracks {
        out.push(at);
        at = at.saturating_add(*t).saturating_add(space);
    }
    out
}

impl Arrange for TableLayout {
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size {
        let scan = self.scan(children);
        at_least_one(Size::new(
            total(&scan.column_width)
                .saturating_add(self.gaps(self.columns))
                .saturating_add(margin.horizontal()),
            total(&scan.row_height)
                .saturating_add(self.gaps(self.rows))
                .saturating_add(margin.vertical()),
        ))
    }

    fn expand(&self, children: &[ChildInfo]) -> (bool, bool) {
        let scan = self.scan(children);
        (scan.expand_x, scan.expand_y)
    }

    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>> {
        let mut out = vec![None; children.len()];
        if self.rows == 0 || self.columns == 0 {
            return out;
        }
        let scan = self.scan(children);
        let widths = scan.distribute_horizontally(content.w.saturating_sub(self.gaps(self.columns)));
        let heights = scan.distribute_vertically(content.h.saturating_sub(self.gaps(self.rows)));
        let xs = offsets(&widths, self.space);
        let ys = offsets(&heights, self.space);
        tracing::debug!(?widths, ?heights, "table distribution");

        for (i, child) in children.iter().enumerate() {
            if !child.visible {
                continue;
            }
            let Some(cell) = child.cell.filter(|c| self.contains(*c)) else {
                continue;
            };
            let (r, c) = (cell.row as usize, cell.column as usize);
            let position = Point::new(
                content.tl.x.saturating_add(xs[c] as i32),
                content.tl.y.saturating_add(ys[r] as i32),
            );
            out[i] = Some(Placement::new(
                position,
                Size::new(widths[c].max(1), heights[r].max(1)),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn grid(rows: u32, columns: u32, p: u32) -> Vec<ChildInfo> {
        let mut out = Vec::new();
        for r in 0..rows {
            for c in 0..columns {
                out.push(ChildInfo::fixed(Size::new(p, p)).in_cell(r, c));
            }
        }
        out
    }

    #[test]
    fn uniform_preferred_size() {
        let t = TableLayout::new(3, 4, 2);
        let margin = Margin::new(1, 2, 3, 4);
        assert_eq!(
            t.preferred_size(margin, &grid(3, 4, 10)),
            Size::new(4 * 10 + 3 * 2 + 3, 3 * 10 + 2 * 2 + 7)
        );
    }

    #[test]
    fn scan_tracks_expand_and_extents() {
        let t = TableLayout::new(2, 2, 0);
        let children = [
            ChildInfo::fixed(Size::new(10, 5)).in_cell(0, 0),
            ChildInfo::fixed(Size::new(30, 8)).in_cell(1, 0).with_expand(false, true),
            ChildInfo::fixed(Size::new(20, 6)).in_cell(0, 1).with_expand(true, false),
        ];
        let scan = t.scan(&children);
        assert_eq!(scan.column_width, vec![30, 20]);
        assert_eq!(scan.row_height, vec![6, 8]);
        assert_eq!(scan.column_expand, vec![false, true]);
        assert_eq!(scan.row_expand, vec![false, true]);
        assert!(scan.expand_x && scan.expand_y);
    }

    #[test]
    fn tracks_shrink_keep_or_grow() {
        let widths = [30, 20];
        let expand = [false, true];
        assert_eq!(distribute_tracks(&widths, &expand, 40), vec![30, 10]);
        assert_eq!(distribute_tracks(&widths, &expand, 50), vec![30, 20]);
        assert_eq!(distribute_tracks(&widths, &expand, 80), vec![30, 50]);
        assert_eq!(distribute_tracks(&widths, &[false, false], 80), vec![30, 20]);

        let scan = Scan {
            column_expand: expand.to_vec(),
            column_width: widths.to_vec(),
            ..Scan::default()
        };
        assert_eq!(scan.distribute_horizontally(50), vec![30, 20]);
        assert_eq!(scan.distribute_horizontally(60), vec![30, 30]);
    }

    #[test]
    fn cells_fill_their_tracks() {
        let t = TableLayout::new(2, 2, 4);
        let children = [
            ChildInfo::fixed(Size::new(10, 10)).in_cell(0, 0),
            ChildInfo::fixed(Size::new(20, 5)).in_cell(0, 1).with_expand(true, false),
            ChildInfo::fixed(Size::new(5, 15)).in_cell(1, 0),
        ];
        let p = t.arrange(Rect::new(2, 2, 60, 40), &children);
        let rects: Vec<_> = p.iter().map(|p| p.map(|p| p.rect())).collect();
        assert_eq!(
            rects,
            vec![
                Some(Rect::new(2, 2, 10, 10)),
                Some(Rect::new(16, 2, 46, 10)),
                Some(Rect::new(2, 16, 10, 15)),
            ]
        );
    }

    #[test]
    fn cells_outside_grid_are_ignored() {
        let t = TableLayout::new(1, 1, 0);
        let children = [ChildInfo::fixed(Size::new(10, 10)).in_cell(3, 0), ChildInfo::fixed(Size::new(4, 4))];
        assert_eq!(t.arrange(Rect::new(0, 0, 10, 10), &children), vec![None, None]);
        assert_eq!(t.preferred_size(Margin::default(), &children), Size::new(1, 1));
    }

    #[test]
    fn next_free_is_row_major() {
        let t = TableLayout::new(2, 2, 0);
        assert_eq!(t.next_free(&[]), Some(Cell::new(0, 0)));
        assert_eq!(
            t.next_free(&[Cell::new(0, 0), Cell::new(0, 1)]),
            Some(Cell::new(1, 0))
        );
        let all = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)];
        assert_eq!(t.next_free(&all), None);
    }
}
