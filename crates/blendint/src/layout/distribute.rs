//! Space distribution along one axis, shared by every packing arrangement.

/// One slot competing for space along an axis: a child in a linear layout,
/// or a whole column/row in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Preferred extent along the axis.
    pub preferred: u32,
    /// Whether the slot wants surplus space.
    pub expand: bool,
}

impl Item {
    /// Construct an item.
    pub fn new(preferred: u32, expand: bool) -> Self {
        Self { preferred, expand }
    }
}

/// Resolve the extent of every item given the space available to them.
///
/// Every item starts from its preferred extent, so a child that is currently
/// larger than its share is trimmed back to preferred before anything else
/// happens. Then:
///
/// - **Surplus** (total preferred fits): if nothing expands, items keep their
///   preferred extents and the trailing space stays unused. Otherwise the
///   space left after the fixed items is split evenly among the expandable
///   items; an expandable item whose preferred extent is larger than the
///   even share keeps its preferred extent and drops out of the split. The
///   rounding remainder goes to the last expandable item, so the result sums
///   to `available` exactly.
/// - **Deficit**: expandable items shrink in proportion to their preferred
///   extents, never below 1. Fixed items never shrink below preferred; if the
///   expandable items cannot absorb the whole deficit the result overflows
///   `available`.
pub fn distribute(available: u32, items: &[Item]) -> Vec<u32> {
    let mut sizes: Vec<u32> = items.iter().map(|i| i.preferred).collect();
    let total: u64 = items.iter().map(|i| i.preferred as u64).sum();
    let expandable: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, i)| i.expand)
        .map(|(n, _)| n)
        .collect();
    if expandable.is_empty() {
        return sizes;
    }

    if total <= available as u64 {
        fill_surplus(available, items, &expandable, &mut sizes);
    } else {
        absorb_deficit(total - available as u64, items, &expandable, &mut sizes);
    }
    sizes
}

/// Hand the space left over by fixed items to the expandable ones.
fn fill_surplus(available: u32, items: &[Item], expandable: &[usize], sizes: &mut [u32]) {
    let fixed: u64 = items
        .iter()
        .filter(|i| !i.expand)
        .map(|i| i.preferred as u64)
        .sum();
    let mut pool = available as u64 - fixed;
    let mut open: Vec<usize> = expandable.to_vec();

    // Items that want more than an even share keep their preferred extent.
    loop {
        let share = pool / open.len() as u64;
        let (keep, rest): (Vec<usize>, Vec<usize>) = open
            .iter()
            .partition(|n| items[**n].preferred as u64 > share);
        if keep.is_empty() || rest.is_empty() {
            break;
        }
        for n in keep {
            pool -= items[n].preferred as u64;
        }
        open = rest;
    }

    let count = open.len() as u64;
    let share = pool / count;
    let remainder = pool % count;
    for (k, n) in open.iter().enumerate() {
        let extra = if k + 1 == open.len() { remainder } else { 0 };
        sizes[*n] = ((share + extra) as u32).max(1);
    }
}

/// Shrink expandable items in proportion to their preferred extents.
fn absorb_deficit(over: u64, items: &[Item], expandable: &[usize], sizes: &mut [u32]) {
    let pool: u64 = expandable.iter().map(|n| items[*n].preferred as u64).sum();
    if pool == 0 {
        return;
    }
    if over >= pool {
        for n in expandable {
            sizes[*n] = 1;
        }
        return;
    }

    let mut cut_total = 0u64;
    for n in expandable {
        let pref = items[*n].preferred as u64;
        let cut = over * pref / pool;
        cut_total += cut;
        sizes[*n] = (pref - cut) as u32;
    }

    // Floor division leaves a few pixels; take them from the end.
    let mut left = over - cut_total;
    for n in expandable.iter().rev() {
        if left == 0 {
            break;
        }
        let take = left.min(sizes[*n].saturating_sub(1) as u64);
        sizes[*n] -= take as u32;
        left -= take;
    }
    for n in expandable {
        sizes[*n] = sizes[*n].max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_items_keep_preferred() {
        let items = [Item::new(100, false), Item::new(120, false)];
        assert_eq!(distribute(290, &items), vec![100, 120]);
        assert_eq!(distribute(50, &items), vec![100, 120]);
    }

    #[test]
    fn surplus_split_evenly() {
        let items = [Item::new(100, true), Item::new(120, true)];
        assert_eq!(distribute(290, &items), vec![145, 145]);
    }

    #[test]
    fn surplus_only_to_expandable() {
        let items = [Item::new(50, false), Item::new(10, true), Item::new(10, true)];
        assert_eq!(distribute(151, &items), vec![50, 50, 51]);
    }

    #[test]
    fn large_preferred_keeps_its_extent() {
        let items = [Item::new(10, true), Item::new(200, true)];
        assert_eq!(distribute(220, &items), vec![20, 200]);
    }

    #[test]
    fn deficit_shrinks_expandable_proportionally() {
        let items = [Item::new(100, false), Item::new(100, true), Item::new(300, true)];
        // Over by 100: expandables give up 25 and 75.
        assert_eq!(distribute(400, &items), vec![100, 75, 225]);
    }

    #[test]
    fn deficit_overflows_when_fixed() {
        let items = [Item::new(100, false), Item::new(10, true)];
        assert_eq!(distribute(50, &items), vec![100, 1]);
    }

    #[test]
    fn deficit_rounding_is_exact() {
        let items = [Item::new(10, true), Item::new(10, true), Item::new(10, true)];
        let sizes = distribute(20, &items);
        assert_eq!(sizes.iter().sum::<u32>(), 20);
    }

    #[test]
    fn empty() {
        assert!(distribute(100, &[]).is_empty());
    }

    proptest::proptest! {
        #[test]
        fn all_expandable_conserves_space(
            prefs in proptest::collection::vec(1u32..200, 1..8),
            available in 8u32..2000,
        ) {
            let items: Vec<Item> = prefs.iter().map(|p| Item::new(*p, true)).collect();
            let sizes = distribute(available, &items);
            proptest::prop_assert_eq!(sizes.iter().sum::<u32>(), available);
            proptest::prop_assert!(sizes.iter().all(|s| *s >= 1));
        }
    }
}
