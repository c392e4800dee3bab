//! Ear-clipping triangulation of silhouette loops.

use hyperdraw_geom::Hyperpoint;

/// Triangulates a simple loop (no closing duplicate) projected to `w = 1`.
///
/// With `hole`, the given projected point is appended after the loop as a
/// single-vertex hole; indices equal to `pts.len()` then refer to it.
/// Indices otherwise follow the input order. Degenerate input yields fewer
/// (possibly zero) triangles rather than an error.
pub fn earcut_loop(pts: &[Hyperpoint], hole: Option<[f64; 2]>) -> Vec<[usize; 3]> {
    if pts.len() < 3 {
        return Vec::new();
    }
    let mut flat: Vec<f64> = Vec::with_capacity(pts.len() * 2 + 2);
    for h in pts {
        let [x, y] = h.projected();
        flat.push(x);
        flat.push(y);
    }
    let mut holes_idx: Vec<usize> = Vec::new();
    if let Some([hx, hy]) = hole {
        holes_idx.push(pts.len());
        flat.push(hx);
        flat.push(hy);
    }
    let idx = match earcutr::earcut(&flat, &holes_idx, 2) {
        Ok(idx) => idx,
        Err(e) => {
            log::trace!(target: "shapes", "earcut failed n={} err={:?}", pts.len(), e);
            return Vec::new();
        }
    };
    idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
}

/// Signed area of a triangle of projected points.
pub fn signed_area(a: Hyperpoint, b: Hyperpoint, c: Hyperpoint) -> f64 {
    let [ax, ay] = a.projected();
    let [bx, by] = b.projected();
    let [cx, cy] = c.projected();
    0.5 * ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::Geometry;

    #[test]
    fn square_gives_two_triangles() {
        let g = Geometry::Hyperbolic;
        let sq = [g.hpxy(0.1, 0.1), g.hpxy(-0.1, 0.1), g.hpxy(-0.1, -0.1), g.hpxy(0.1, -0.1)];
        let tris = earcut_loop(&sq, None);
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn center_hole_point_is_used() {
        let g = Geometry::Euclidean;
        let hex: Vec<_> = (0..6)
            .map(|i| {
                let a = i as f64 * std::f64::consts::PI / 3.0;
                g.hpxy(a.cos(), a.sin())
            })
            .collect();
        let tris = earcut_loop(&hex, Some([0.0, 0.0]));
        assert!(tris.iter().flatten().any(|&i| i == hex.len()));
        let mut all = hex.clone();
        all.push(g.hpxy(0.0, 0.0));
        let area: f64 = tris.iter().map(|t| signed_area(all[t[0]], all[t[1]], all[t[2]]).abs()).sum();
        assert!((area - 1.5 * 3f64.sqrt()).abs() < 1e-9, "{area}");
    }

    #[test]
    fn too_short_is_empty() {
        let g = Geometry::Euclidean;
        assert!(earcut_loop(&[g.hpxy(0.0, 0.0), g.hpxy(1.0, 0.0)], None).is_empty());
    }
}
