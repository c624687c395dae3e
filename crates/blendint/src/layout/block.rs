use super::{Alignment, Arrange, ChildInfo, LinearLayout, Placement, linear::visible};
use crate::{
    form::RoundType,
    geom::{Margin, Orientation, Rect, Size},
};

/// A row or column of widgets joined into one visual block.
///
/// Children are packed with no spacing and stretched across the cross axis.
/// Their round types are rewritten so that only the block's outer corners
/// are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockLayout {
    /// Packing axis.
    pub orientation: Orientation,
}

impl BlockLayout {
    /// A horizontal block.
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
        }
    }

    /// A vertical block.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
        }
    }

    /// The zero-spacing linear layout that does the actual packing.
    fn linear(&self) -> LinearLayout {
        LinearLayout {
            orientation: self.orientation,
            spacing: 0,
            alignment: Alignment::Fill,
        }
    }

    /// Round type of the child at `slot` among `count` visible children.
    pub fn round_for(&self, slot: usize, count: usize) -> RoundType {
        let (leading, trailing) = match self.orientation {
            Orientation::Horizontal => (RoundType::LEFT, RoundType::RIGHT),
            Orientation::Vertical => (RoundType::TOP, RoundType::BOTTOM),
        };
        match (slot == 0, slot + 1 == count) {
            (true, true) => RoundType::ALL,
            (true, false) => leading,
            (false, true) => trailing,
            (false, false) => RoundType::NONE,
        }
    }
}

impl Arrange for BlockLayout {
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size {
        self.linear().preferred_size(margin, children)
    }

    fn expand(&self, children: &[ChildInfo]) -> (bool, bool) {
        self.linear().expand(children)
    }

    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>> {
        let mut out = self.linear().arrange(content, children);
        let shown = visible(children);
        for (slot, i) in shown.iter().enumerate() {
            if let Some(p) = out[*i].as_mut() {
                p.round = Some(self.round_for(slot, shown.len()));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_corners_only() {
        let b = BlockLayout::horizontal();
        let children = [
            ChildInfo::fixed(Size::new(20, 10)),
            ChildInfo::fixed(Size::new(20, 10)),
            ChildInfo::fixed(Size::new(20, 14)),
        ];
        let p = b.arrange(Rect::new(0, 0, 60, 14), &children);
        let rounds: Vec<_> = p.iter().map(|p| p.and_then(|p| p.round)).collect();
        assert_eq!(
            rounds,
            vec![
                Some(RoundType::LEFT),
                Some(RoundType::NONE),
                Some(RoundType::RIGHT)
            ]
        );
        // Zero spacing and cross fill.
        assert_eq!(p[1].map(|p| p.rect()), Some(Rect::new(20, 0, 20, 14)));
    }

    #[test]
    fn single_and_vertical() {
        let b = BlockLayout::vertical();
        assert_eq!(b.round_for(0, 1), RoundType::ALL);
        assert_eq!(b.round_for(0, 2), RoundType::TOP);
        assert_eq!(b.round_for(1, 2), RoundType::BOTTOM);
    }

    #[test]
    fn hidden_children_do_not_take_corners() {
        let b = BlockLayout::horizontal();
        let mut hidden = ChildInfo::fixed(Size::new(20, 10));
        hidden.visible = false;
        let children = [ChildInfo::fixed(Size::new(20, 10)), hidden];
        let p = b.arrange(Rect::new(0, 0, 40, 10), &children);
        assert_eq!(p[0].and_then(|p| p.round), Some(RoundType::ALL));
        assert_eq!(p[1], None);
    }
}
