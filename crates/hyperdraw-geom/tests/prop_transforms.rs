use hyperdraw_geom::{C0, Geometry, Hyperpoint, Transmatrix};
use proptest::prelude::*;

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn papprox(g: Geometry, a: Hyperpoint, b: Hyperpoint, eps: f64) -> bool {
    g.hdist(a, b) <= eps
}

fn arb_geometry() -> impl Strategy<Value = Geometry> {
    prop_oneof![
        Just(Geometry::Hyperbolic),
        Just(Geometry::Euclidean),
        Just(Geometry::Spherical),
    ]
}

// Points within distance 1.2 of the origin, at any bearing.
fn arb_point() -> impl Strategy<Value = (Geometry, Hyperpoint)> {
    (arb_geometry(), -3.2f64..3.2, 0.0f64..1.2)
        .prop_map(|(g, a, d)| (g, g.xspinpush0(a, d)))
}

fn arb_pair() -> impl Strategy<Value = (Geometry, Hyperpoint, Hyperpoint)> {
    (arb_geometry(), -3.2f64..3.2, 0.0f64..1.2, -3.2f64..3.2, 0.0f64..1.2)
        .prop_map(|(g, a1, d1, a2, d2)| (g, g.xspinpush0(a1, d1), g.xspinpush0(a2, d2)))
}

proptest! {
    #[test]
    fn spin_preserves_distance_from_origin((g, h) in arb_point(), a in -6.3f64..6.3) {
        let r = Transmatrix::spin(a) * h;
        prop_assert!(approx(g.hdist0(r), g.hdist0(h), 1e-9));
    }

    #[test]
    fn gpushxto0_sends_point_to_origin((g, h) in arb_point()) {
        let r = g.gpushxto0(h) * h;
        prop_assert!(papprox(g, r, C0, 1e-7), "{:?} -> {:?}", h, r);
    }

    #[test]
    fn rgpushxto0_sends_origin_to_point((g, h) in arb_point()) {
        let r = g.rgpushxto0(h) * C0;
        prop_assert!(papprox(g, r, h, 1e-7));
    }

    #[test]
    fn pushes_are_isometries((g, a, b) in arb_pair()) {
        let t = g.xpush(0.4) * Transmatrix::spin(1.1) * g.zpush(-0.2);
        let d0 = g.hdist(a, b);
        let d1 = g.hdist(t * a, t * b);
        prop_assert!(approx(d0, d1, 1e-7), "{} vs {}", d0, d1);
    }

    #[test]
    fn inverse_round_trip(g in arb_geometry(), x in -1.0f64..1.0, a in -3.0f64..3.0, z in -0.5f64..0.5) {
        let m = g.xpush(x) * Transmatrix::spin(a) * g.zpush(z);
        let id = m * m.inverse();
        prop_assert!(id.max_diff(&Transmatrix::IDENTITY) < 1e-9);
    }

    #[test]
    fn mid_is_equidistant((g, a, b) in arb_pair()) {
        let m = g.mid(a, b);
        prop_assert!(approx(g.hdist(a, m), g.hdist(b, m), 1e-7));
    }

    #[test]
    fn normalize_is_idempotent((g, h) in arb_point(), k in 0.5f64..2.0) {
        let once = g.normalize(h * k);
        let twice = g.normalize(once);
        for i in 0..4 {
            prop_assert!(approx(once[i], twice[i], 1e-12));
        }
        prop_assert!(approx(g.zlevel(once), 1.0, 1e-9));
    }
}
