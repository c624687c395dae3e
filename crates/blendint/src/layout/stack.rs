use super::{Arrange, ChildInfo, Placement, at_least_one};
use crate::geom::{Margin, Rect, Size};

/// Pages stacked on top of each other; only the active page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StackLayout {
    /// Index of the visible child.
    pub active: usize,
}

impl StackLayout {
    /// A stack showing the page at `active`.
    pub fn new(active: usize) -> Self {
        Self { active }
    }
}

impl Arrange for StackLayout {
    /// Large enough for the largest page, visible or not.
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size {
        let largest = children
            .iter()
            .fold(Size::ZERO, |acc, c| acc.max(c.preferred));
        at_least_one(Size::new(
            largest.width.saturating_add(margin.horizontal()),
            largest.height.saturating_add(margin.vertical()),
        ))
    }

    fn expand(&self, children: &[ChildInfo]) -> (bool, bool) {
        children
            .iter()
            .fold((false, false), |(x, y), c| (x || c.expand_x, y || c.expand_y))
    }

    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>> {
        children
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let mut p = Placement::new(content.tl, content.size());
                p.visible = Some(i == self.active);
                Some(p)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_page_is_visible() {
        let s = StackLayout::new(1);
        let children = [
            ChildInfo::fixed(Size::new(10, 40)),
            ChildInfo::fixed(Size::new(30, 20)),
        ];
        let p = s.arrange(Rect::new(2, 3, 50, 50), &children);
        let vis: Vec<_> = p.iter().map(|p| p.and_then(|p| p.visible)).collect();
        assert_eq!(vis, vec![Some(false), Some(true)]);
        assert!(p.iter().all(|p| p.map(|p| p.rect()) == Some(Rect::new(2, 3, 50, 50))));
        assert_eq!(
            s.preferred_size(Margin::uniform(2), &children),
            Size::new(34, 44)
        );
    }

    #[test]
    fn out_of_range_hides_everything() {
        let s = StackLayout::new(5);
        let p = s.arrange(Rect::new(0, 0, 5, 5), &[ChildInfo::fixed(Size::new(1, 1))]);
        assert_eq!(p[0].and_then(|p| p.visible), Some(false));
    }
}
