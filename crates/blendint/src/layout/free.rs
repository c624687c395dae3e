use super::{Arrange, ChildInfo, Placement, at_least_one};
use crate::geom::{Margin, Point, Rect, Size};

/// Absolute placement: children keep the geometry they were given.
///
/// Used by the root and by top-level frames. A child that expands on an
/// axis is stretched over the content box on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FreeLayout;

impl Arrange for FreeLayout {
    /// The bounding box of the visible children, measured from the origin.
    fn preferred_size(&self, margin: Margin, children: &[ChildInfo]) -> Size {
        let (w, h) = children
            .iter()
            .filter(|c| c.visible)
            .fold((0i64, 0i64), |(w, h), c| {
                let r = Rect::from_parts(c.position, c.size);
                (w.max(r.right()), h.max(r.bottom()))
            });
        let clamp = |v: i64| u32::try_from(v.max(0)).unwrap_or(u32::MAX);
        at_least_one(Size::new(
            clamp(w).saturating_add(margin.right),
            clamp(h).saturating_add(margin.bottom),
        ))
    }

    fn expand(&self, _children: &[ChildInfo]) -> (bool, bool) {
        (false, false)
    }

    fn arrange(&self, content: Rect, children: &[ChildInfo]) -> Vec<Option<Placement>> {
        children
            .iter()
            .map(|c| {
                if !c.visible || !(c.expand_x || c.expand_y) {
                    return None;
                }
                let (x, w) = if c.expand_x {
                    (content.tl.x, content.w)
                } else {
                    (c.position.x, c.size.width)
                };
                let (y, h) = if c.expand_y {
                    (content.tl.y, content.h)
                } else {
                    (c.position.y, c.size.height)
                };
                Some(Placement::new(
                    Point::new(x, y),
                    Size::new(w.max(1), h.max(1)),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_children_are_untouched() {
        let mut c = ChildInfo::fixed(Size::new(10, 10));
        c.position = Point::new(30, 40);
        let p = FreeLayout.arrange(Rect::new(0, 0, 100, 100), &[c]);
        assert_eq!(p, vec![None]);
        assert_eq!(
            FreeLayout.preferred_size(Margin::default(), &[c]),
            Size::new(40, 50)
        );
    }

    #[test]
    fn expanding_children_stretch() {
        let mut c = ChildInfo::fixed(Size::new(10, 10)).with_expand(true, false);
        c.position = Point::new(30, 40);
        let p = FreeLayout.arrange(Rect::new(0, 0, 100, 100), &[c]);
        assert_eq!(p[0].map(|p| p.rect()), Some(Rect::new(0, 40, 100, 10)));
    }
}
