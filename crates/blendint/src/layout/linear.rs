use super::{
    Alignment, Arrange, ChildInfo, Placement, anchor_offset, at_least_one,
    distribute::{Item, distribute},
};
use crate::geom::{Margin, Orientation, Point, Rect, Size};

/// Pack children along one axis with uniform spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinearLayout {
    /// Packing axis.
    pub orientation: Orientation,
    /// Gap between consecutive children.
    pub spacing: u32,
    /// Cross-axis alignment of children that do not fill it.
    pub alignment: Alignment,
}

impl LinearLayout {
    /// A left-to-right layout.
    pub fn horizontal(spacing: u32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            spacing,
            alignment: Alignment::Center,
        }
    }

    /// A top-to-bottom layout.
    pub fn vertical(spacing: u32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing,
            alignment: Alignment::Center,
        }
    }

    /// Set the cross-axis alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Total spacing between `count` children.
    fn gaps(&self, count: usize) -> u32 {
        self.spacing
            .saturating_mul(count.saturating_sub(1) as u32)
    }
}

/// Indices of visible children.
pub(super) fn visible(children: &[ChildInfo]) -> Vec<usize> {
    children
        .iter()
        .enumerate()
        .filter(|(_, c)| c.visible)
        .map(|(i, _)| i)
        .collect()
}

impl Arrange for LinearLayout {
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size {
        let o = self.orientation;
        let shown = visible(children);
        let main: u32 = shown
            .iter()
            .map(|i| children[*i].preferred.main(o))
            .fold(0u32, u32::saturating_add);
        let cross = shown
            .iter()
            .map(|i| children[*i].preferred.cross(o))
            .max()
            .unwrap_or(0);
        at_least_one(Size::from_main_cross(
            o,
            main.saturating_add(self.gaps(shown.len()))
                .saturating_add(margin.along(o)),
            cross.saturating_add(margin.along(o.cross())),
        ))
    }

    fn expand(&self, children: &[ChildInfo]) -> (bool, bool) {
        let shown = children.iter().filter(|c| c.visible);
        shown.fold((false, false), |(x, y), c| (x || c.expand_x, y || c.expand_y))
    }

    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>> {
        let o = self.orientation;
        let shown = visible(children);
        let mut out = vec![None; children.len()];
        if shown.is_empty() {
            return out;
        }

        let items: Vec<Item> = shown
            .iter()
            .map(|i| Item::new(children[*i].preferred.main(o), children[*i].expand(o)))
            .collect();
        let available = content.size().main(o).saturating_sub(self.gaps(shown.len()));
        let mains = distribute(available, &items);

        let content_cross = content.size().cross(o);
        let anchor = self.alignment.cross_anchor(o);
        let mut cursor = 0u32;
        for (slot, i) in shown.iter().enumerate() {
            let child = &children[*i];
            let main = mains[slot].max(1);
            let cross = if child.expand(o.cross()) || self.alignment == Alignment::Fill {
                content_cross
            } else {
                child.preferred.cross(o)
            }
            .max(1);
            let offset = anchor_offset(cross, content_cross, anchor);
            let (dx, dy) = match o {
                Orientation::Horizontal => (cursor, offset),
                Orientation::Vertical => (offset, cursor),
            };
            let position = Point::new(
                content.tl.x.saturating_add(dx as i32),
                content.tl.y.saturating_add(dy as i32),
            );
            out[*i] = Some(Placement::new(
                position,
                Size::from_main_cross(o, main, cross),
            ));
            tracing::trace!(slot, ?position, main, cross, "linear placement");
            cursor = cursor.saturating_add(main).saturating_add(self.spacing);
        }
        out
    }
}
