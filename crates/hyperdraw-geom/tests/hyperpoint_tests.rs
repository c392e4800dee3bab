use hyperdraw_geom::{C0, DEGREE, Geometry, RegularTiling, Transmatrix};

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn heptagonal_radii() {
    let t = RegularTiling::new(7, 3);
    let g = Geometry::Hyperbolic;
    // Known values for {7,3}
    assert!(approx_eq(t.circumradius(g), 0.620_672, 1e-5));
    assert!(approx_eq(t.center_distance(g), 1.090_550, 1e-5));
}

#[test]
fn corners_sit_on_circumcircle() {
    for (t, g) in [
        (RegularTiling::new(7, 3), Geometry::Hyperbolic),
        (RegularTiling::new(6, 3), Geometry::Euclidean),
        (RegularTiling::new(5, 3), Geometry::Spherical),
    ] {
        for i in 0..t.p as usize {
            let d = g.hdist0(t.corner(g, i));
            assert!(approx_eq(d, t.circumradius(g), 1e-9), "{g:?} corner {i}");
        }
    }
}

#[test]
fn adjacent_corners_are_shared_by_neighbors() {
    let t = RegularTiling::new(7, 3);
    let g = Geometry::Hyperbolic;
    // Corner 0 of our cell, seen from the neighbor across direction 0.
    let rel = t.relative(g, 0, 3);
    let ours = [t.corner(g, 0), t.corner(g, 6)];
    let theirs: Vec<_> = (0..7).map(|i| rel * t.corner(g, i)).collect();
    for c in ours {
        assert!(theirs.iter().any(|h| g.hdist(*h, c) < 1e-9));
    }
}

#[test]
fn euclidean_hex_center_distance() {
    let t = RegularTiling::new(6, 3);
    let g = Geometry::Euclidean;
    let d = t.center_distance(g);
    assert!(approx_eq(d, 0.5 * 3f64.sqrt(), 1e-12));
    let h = t.relative(g, 1, 4) * C0;
    assert!(approx_eq(h.hypot2(), d, 1e-12));
    assert!(approx_eq(h.angle_xy(), 60.0 * DEGREE, 1e-12));
}

#[test]
fn mirror_is_an_involution() {
    let m = Transmatrix::MIRROR * Transmatrix::MIRROR;
    assert_eq!(m, Transmatrix::IDENTITY);
}
