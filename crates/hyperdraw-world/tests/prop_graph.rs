use hyperdraw_geom::{C0, RegularTiling};
use hyperdraw_world::{CellGraph, CellId, Map};
use proptest::prelude::*;

fn arb_tiling() -> impl Strategy<Value = (RegularTiling, u32)> {
    prop_oneof![
        (Just(RegularTiling::new(7, 3)), 1u32..=3),
        (Just(RegularTiling::new(6, 3)), 1u32..=4),
        (Just(RegularTiling::new(4, 4)), 1u32..=4),
        (Just(RegularTiling::new(5, 3)), 1u32..=4),
        (Just(RegularTiling::new(8, 3)), 1u32..=2),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn neighbors_are_reciprocal((t, r) in arb_tiling(), pick in any::<prop::sample::Index>()) {
        let m = Map::ball(t, r);
        let c = CellId(pick.index(m.cell_count()) as u32);
        for d in 0..m.degree(c) {
            if let Some(n) = m.neighbor(c, d) {
                let back = m.neighbor_spin(c, d);
                prop_assert_eq!(m.neighbor(n, back), Some(c));
                prop_assert_eq!(m.neighbor_spin(n, back), d);
            }
        }
    }

    #[test]
    fn relative_matches_placements((t, r) in arb_tiling(), pick in any::<prop::sample::Index>()) {
        let m = Map::ball(t, r);
        let g = m.geometry();
        let c = CellId(pick.index(m.cell_count()) as u32);
        let fc = m.frame(c).unwrap();
        for d in 0..m.degree(c) {
            let rel = m.relative(c, d);
            prop_assert!((g.hdist0(rel * C0) - t.center_distance(g)).abs() < 1e-6);
            if let Some(n) = m.neighbor(c, d) {
                let fnb = m.frame(n).unwrap();
                prop_assert!(g.hdist(fc * rel * C0, fnb * C0) < 1e-6);
                // the neighbor's own corner 0 lands on one of ours
                let k = fc * rel * m.corner(n, 0);
                let near = (0..m.degree(c)).any(|i| g.hdist(fc * m.corner(c, i), k) < 1e-6);
                prop_assert!(near);
            }
        }
    }
}
