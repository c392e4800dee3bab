//! Near-spherical solids from a subdivided icosahedron.

use crate::buffer::ShapeId;
use crate::builder::MeshBuilder;
use crate::constants::{HCROSSF7, ICOSA_LATITUDE_DEG, SLIME_STEP};
use crate::ppr::Ppr;
use hyperdraw_geom::{DEGREE, Hyperpoint, Transmatrix};
use std::f64::consts::PI;

/// The 20 faces of an icosahedron with poles `tip` and `atip`.
fn icosahedron(tip: Hyperpoint, atip: Hyperpoint) -> Vec<[Hyperpoint; 3]> {
    let z = ICOSA_LATITUDE_DEG * DEGREE;
    let ring = |deg: f64, lat: f64| Transmatrix::cspin(1, 2, deg * DEGREE) * Transmatrix::spin(lat) * tip;
    let mut faces = Vec::with_capacity(20);
    for i in 0..5 {
        let i = i as f64;
        let a = ring(72.0 * i, z);
        let b = ring(72.0 * i - 72.0, z);
        let c = ring(72.0 * i + 36.0, PI - z);
        let d = ring(72.0 * i - 36.0, PI - z);
        faces.push([tip, a, b]);
        faces.push([a, b, c]);
        faces.push([b, c, d]);
        faces.push([c, d, atip]);
    }
    faces
}

impl MeshBuilder {
    fn balltriangle(&mut self, a: Hyperpoint, b: Hyperpoint, c: Hyperpoint, rad: f64, lev: u32) {
        if lev == 0 {
            self.push(a);
            self.push(b);
            self.push(c);
            return;
        }
        let g = self.geom;
        let onto = |h: Hyperpoint| Transmatrix::rspintox(h) * g.xpush0(rad);
        let cx = onto(g.mid(a, b));
        let ax = onto(g.mid(b, c));
        let bx = onto(g.mid(c, a));
        self.balltriangle(ax, bx, cx, rad, lev - 1);
        self.balltriangle(ax, bx, c, rad, lev - 1);
        self.balltriangle(ax, b, cx, rad, lev - 1);
        self.balltriangle(a, bx, cx, rad, lev - 1);
    }

    /// Rebuilds `id` as a ball of radius `rad`: `20 * 4^lev` triangles.
    pub fn make_ball(&mut self, id: ShapeId, rad: f64, lev: u32) {
        let prio = self.shape(id).map_or(Ppr::DEFAULT, |sh| sh.prio);
        self.bshape(id, prio);
        self.set_triangles();
        let g = self.geom;
        for [a, b, c] in icosahedron(g.xpush0(rad), g.xpush0(-rad)) {
            self.balltriangle(a, b, c, rad, lev);
        }
        self.add_texture(id);
    }

    /// A lumpy ball: each icosahedron face is latticed and bulged towards its
    /// corners.
    pub fn make_slime(&mut self, id: ShapeId) {
        let g = self.geom;
        self.bshape(id, Ppr::MONSTER_BODY);
        let r0 = self.scalefactor() * HCROSSF7 * 0.8;
        for [a, b, c] in icosahedron(g.xpush0(1.0), g.xpush0(-1.0)) {
            texture_order(SLIME_STEP, |x, y| {
                let z = 1.0 - x - y;
                let r = r0 * x.max(y).max(z).powf(0.3);
                let dir = a * x + b * y + c * z;
                self.push(Transmatrix::rspintox(dir) * g.xpush0(r));
            });
        }
        self.set_triangles();
        self.add_texture(id);
        if self.params.solid && !self.params.world_3d {
            self.shift_last_straight(self.lv.floor);
        }
    }
}

/// Visits the barycentric lattice of a triangle, three calls per small
/// triangle: `step^2` triangles in total.
pub(crate) fn texture_order(step: usize, mut f: impl FnMut(f64, f64)) {
    let st = step as f64;
    let d = 1.0 / st;
    for y in 0..step {
        for x in 0..step {
            let x0 = x as f64 / st;
            let y0 = y as f64 / st;
            if x + y < step {
                f(x0, y0);
                f(x0 + d, y0);
                f(x0, y0 + d);
            }
            if x + y <= step && x > 0 && y > 0 {
                f(x0, y0);
                f(x0 - d, y0);
                f(x0, y0 - d);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_covers_step_squared_triangles() {
        let mut calls = 0;
        texture_order(8, |_, _| calls += 1);
        assert_eq!(calls, 3 * 64);
    }
}
