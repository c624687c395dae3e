//! Round-form outline properties and their integration with the tree.

#[cfg(test)]
mod tests {
    use blendint::{
        Tree,
        config::Config,
        error::Result,
        form::{Outline, RoundType, clamp_radius},
        geom::Size,
        testing::TestView,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn round_type() -> impl Strategy<Value = RoundType> {
        (0u8..16).prop_map(RoundType::from_bits_truncate)
    }

    proptest! {
        #[test]
        fn vertex_counts_follow_the_corners(
            w in 1u32..400,
            h in 1u32..400,
            round in round_type(),
            radius in 0.0f32..50.0,
            resolution in 2u32..16,
        ) {
            let size = Size::new(w, h);
            let o = Outline::generate(size, 1.0, round, radius, resolution);
            let rounded = if clamp_radius(size, radius) > 0.0 {
                round.bits().count_ones() as usize
            } else {
                0
            };
            let expected = rounded * resolution as usize + (4 - rounded);
            prop_assert_eq!(o.vertex_count(), expected);
            prop_assert_eq!(o.outer.len(), expected);
            prop_assert_eq!(o.inner.len(), expected);
            prop_assert_eq!(o.triangle_fan().len(), expected + 2);
            prop_assert_eq!(o.border_strip().len(), 2 * (expected + 1));
        }

        #[test]
        fn outlines_stay_inside_the_box(
            w in 1u32..400,
            h in 1u32..400,
            round in round_type(),
            radius in 0.0f32..300.0,
        ) {
            let o = Outline::generate(Size::new(w, h), 1.0, round, radius, 9);
            let eps = 1e-3;
            for v in o.outer.iter().chain(&o.inner) {
                prop_assert!(v[0] >= -eps && v[0] <= w as f32 + eps);
                prop_assert!(v[1] >= -eps && v[1] <= h as f32 + eps);
            }
        }

        #[test]
        fn radius_clamps_to_half_the_short_side(
            w in 1u32..400,
            h in 1u32..400,
            radius in -10.0f32..300.0,
        ) {
            let r = clamp_radius(Size::new(w, h), radius);
            prop_assert!(r >= 0.0);
            prop_assert!(r <= w.min(h) as f32 / 2.0);
            if radius > 0.0 && radius <= w.min(h) as f32 / 2.0 {
                prop_assert_eq!(r, radius);
            }
        }

        #[test]
        fn node_radius_tracks_its_size(
            w in 1u32..200,
            h in 1u32..200,
            radius in 0.0f32..150.0,
        ) {
            let mut t = Tree::new(Config::default());
            let id = t.create(TestView::new(10, 10));
            prop_assert!(t.set_radius(id, radius));
            prop_assert!(t.resize(id, Size::new(w, h)));
            let node = t.node(id).ok_or_else(|| TestCaseError::fail("missing node"))?;
            prop_assert!(node.radius() <= w.min(h) as f32 / 2.0);
            prop_assert_eq!(node.requested_radius(), radius);
        }
    }

    #[test]
    fn square_boxes_have_four_vertices() {
        let o = Outline::generate(Size::new(50, 20), 1.0, RoundType::ALL, 0.0, 9);
        assert_eq!(o.vertex_count(), 4);
        let o = Outline::generate(Size::new(50, 20), 1.0, RoundType::NONE, 5.0, 9);
        assert_eq!(o.outer, vec![[0.0, 0.0], [50.0, 0.0], [50.0, 20.0], [0.0, 20.0]]);
        assert_eq!(o.inner, vec![[1.0, 1.0], [49.0, 1.0], [49.0, 19.0], [1.0, 19.0]]);
    }

    #[test]
    fn nodes_regenerate_their_outline() -> Result<()> {
        let config = Config {
            arc_resolution: 5,
            ..Config::default()
        };
        let mut t = Tree::new(config);
        let id = t.create(TestView::new(100, 20));
        assert_eq!(t.node(id).map(|n| n.outline().vertex_count()), Some(4));

        assert!(t.set_round_type(id, RoundType::ALL));
        assert_eq!(t.node(id).map(|n| n.outline().vertex_count()), Some(20));
        assert!(t.set_round_type(id, RoundType::TOP));
        assert_eq!(t.node(id).map(|n| n.outline().vertex_count()), Some(12));

        // The effective radius shrinks with the box and comes back with it.
        assert!(t.set_radius(id, 8.0));
        assert!(t.resize(id, Size::new(100, 6)));
        assert_eq!(t.node(id).map(|n| n.radius()), Some(3.0));
        assert!(t.resize(id, Size::new(100, 40)));
        assert_eq!(t.node(id).map(|n| n.radius()), Some(8.0));

        assert!(!t.set_radius(id, -1.0));
        assert!(!t.set_radius(id, f32::NAN));
        assert_eq!(t.node(id).map(|n| n.requested_radius()), Some(8.0));
        Ok(())
    }
}
