use hyperdraw_geom::{Geometry, Hyperpoint, RegularTiling};
use hyperdraw_shapes::triangulate::{earcut_loop, signed_area};
use hyperdraw_shapes::{MeshBuilder, ModelParams, Ppr};
use proptest::prelude::*;
use std::f64::consts::PI;

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

// Star with `k` spikes: 2k vertices alternating between the two radii.
fn arb_star() -> impl Strategy<Value = Vec<Hyperpoint>> {
    (3usize..12, 0.2f64..0.6, 0.25f64..0.9, -PI..PI).prop_map(|(k, ro, inner, phase)| {
        let g = Geometry::Hyperbolic;
        (0..2 * k)
            .map(|i| {
                let r = if i % 2 == 0 { ro } else { ro * inner };
                g.xspinpush0(phase + PI * i as f64 / k as f64, r)
            })
            .collect()
    })
}

// x-monotone polygon: an upper chain left to right, then a lower chain back.
// Simple, but in general not star-shaped around any point.
fn arb_monotone() -> impl Strategy<Value = Vec<Hyperpoint>> {
    (2usize..10)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(0.02f64..0.3, n),
                prop::collection::vec(0.01f64..0.4, n),
                prop::collection::vec(0.01f64..0.4, n),
            )
        })
        .prop_map(|(steps, upper, lower)| {
            let g = Geometry::Euclidean;
            let xs: Vec<f64> = steps
                .iter()
                .scan(0.0, |x, s| {
                    *x += s;
                    Some(*x)
                })
                .collect();
            let mut pts: Vec<Hyperpoint> = xs.iter().zip(&upper).map(|(&x, &y)| g.hpxy(x, y)).collect();
            pts.extend(xs.iter().zip(&lower).rev().map(|(&x, &y)| g.hpxy(x, -y)));
            pts
        })
}

// Regular polygon with a point pushed just off the middle of every edge.
fn arb_nearly_collinear() -> impl Strategy<Value = Vec<Hyperpoint>> {
    (3usize..10, 0.1f64..1.0, 1e-9f64..1e-6).prop_map(|(n, r, bump)| {
        let g = Geometry::Euclidean;
        let corner = |i: usize| {
            let a = 2.0 * PI * i as f64 / n as f64;
            [r * a.cos(), r * a.sin()]
        };
        let mut pts = Vec::with_capacity(2 * n);
        for i in 0..n {
            let [x0, y0] = corner(i);
            let [x1, y1] = corner(i + 1);
            let (mx, my) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
            let k = 1.0 + bump / mx.hypot(my);
            pts.push(g.hpxy(x0, y0));
            pts.push(g.hpxy(mx * k, my * k));
        }
        pts
    })
}

fn shoelace(pts: &[Hyperpoint]) -> f64 {
    let n = pts.len();
    (0..n)
        .map(|i| {
            let [x0, y0] = pts[i].projected();
            let [x1, y1] = pts[(i + 1) % n].projected();
            x0 * y1 - x1 * y0
        })
        .sum::<f64>()
        .abs()
        / 2.0
}

fn arb_ring() -> impl Strategy<Value = (usize, f64)> {
    (3usize..40, 0.01f64..0.5)
}

fn builder() -> MeshBuilder {
    let p = ModelParams { solid: true, ..ModelParams::default() };
    MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), p)
}

fn ring(n: usize, r: f64) -> Vec<Hyperpoint> {
    let g = Geometry::Hyperbolic;
    (0..n).map(|i| g.xspinpush0(2.0 * PI * i as f64 / n as f64, r)).collect()
}

proptest! {
    #[test]
    fn star_gives_n_minus_two_triangles(pts in arb_star()) {
        let tris = earcut_loop(&pts, None);
        prop_assert_eq!(tris.len(), pts.len() - 2);
    }

    #[test]
    fn every_vertex_is_used(pts in arb_star()) {
        let tris = earcut_loop(&pts, None);
        let mut seen = vec![false; pts.len()];
        for t in &tris {
            for &i in t {
                prop_assert!(i < pts.len());
                seen[i] = true;
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn no_zero_area_triangles(pts in arb_star()) {
        for [a, b, c] in earcut_loop(&pts, None) {
            prop_assert!(signed_area(pts[a], pts[b], pts[c]).abs() > 1e-12);
        }
    }

    #[test]
    fn triangles_tile_the_polygon(pts in arb_star()) {
        let shoelace = shoelace(&pts);
        let sum: f64 = earcut_loop(&pts, None).iter().map(|&[a, b, c]| signed_area(pts[a], pts[b], pts[c]).abs()).sum();
        prop_assert!(approx(sum, shoelace, 1e-9 * shoelace.max(1.0)));
    }

    #[test]
    fn monotone_polygons_are_fully_covered(pts in arb_monotone()) {
        let tris = earcut_loop(&pts, None);
        prop_assert_eq!(tris.len(), pts.len() - 2);
        let area = shoelace(&pts);
        let sum: f64 = tris.iter().map(|&[a, b, c]| signed_area(pts[a], pts[b], pts[c]).abs()).sum();
        prop_assert!(approx(sum, area, 1e-9 * area.max(1.0)));
    }

    #[test]
    fn nearly_collinear_edges_keep_the_area(pts in arb_nearly_collinear()) {
        let tris = earcut_loop(&pts, None);
        prop_assert!(!tris.is_empty());
        prop_assert!(tris.iter().flatten().all(|&i| i < pts.len()));
        let area = shoelace(&pts);
        let sum: f64 = tris.iter().map(|&[a, b, c]| signed_area(pts[a], pts[b], pts[c]).abs()).sum();
        prop_assert!(approx(sum, area, 1e-6 * area.max(1.0)));
    }

    #[test]
    fn prism_between_equal_rings_puts_the_lower_ring_first((n, r) in arb_ring(), z in 0.01f64..0.3) {
        let mut mb = builder();
        let g = mb.geom;
        let id = mb.new_shape(Ppr::MONSTER_BODY);
        let vh = ring(n, r);
        mb.add_prism(0.0, &vh, z, &vh);
        let pts = mb.points_of(id).to_vec();
        prop_assert_eq!(pts.len(), 3 * 2 * n);
        let (p0, p1) = (mb.zpush(0.0), mb.zpush(z));
        let mut used = vec![false; n];
        for tris in pts.chunks(6) {
            let k = (0..n).find(|&k| g.hdist(tris[2], p0 * vh[k]) < 1e-9);
            prop_assert!(k.is_some());
            let k = k.unwrap_or(0);
            prop_assert!(g.hdist(tris[5], p1 * vh[k]) < 1e-9);
            used[k] = true;
        }
        prop_assert!(used.iter().all(|&u| u));

        let mut again = builder();
        let id2 = again.new_shape(Ppr::MONSTER_BODY);
        again.add_prism(0.0, &vh, z, &vh);
        prop_assert_eq!(again.points_of(id2), &pts[..]);
    }

    #[test]
    fn prism_sync_emits_six_per_ring_point((n, r) in arb_ring(), z in 0.0f64..0.3) {
        let mut mb = builder();
        let id = mb.new_shape(Ppr::MONSTER_BODY);
        let vh = ring(n, r);
        mb.add_prism_sync(0.0, &vh, z, &vh);
        prop_assert_eq!(mb.points_of(id).len(), 6 * n);
    }

    #[test]
    fn cone_emits_three_per_ring_point((n, r) in arb_ring(), z1 in -0.3f64..0.3) {
        let mut mb = builder();
        let g = mb.geom;
        let id = mb.new_shape(Ppr::MONSTER_BODY);
        mb.add_cone(0.0, &ring(n, r), z1);
        let pts = mb.points_of(id);
        prop_assert_eq!(pts.len(), 3 * n);
        let apex = g.zpush(z1) * hyperdraw_geom::C0;
        for tri in pts.chunks(3) {
            prop_assert!(g.hdist(tri[2], apex) < 1e-9);
        }
    }
}
