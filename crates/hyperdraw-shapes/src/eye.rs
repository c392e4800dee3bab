//! Seating ball-shaped eyes onto finished head models.

use crate::buffer::ShapeId;
use crate::builder::MeshBuilder;
use hyperdraw_geom::{Geometry, HYPC, Hyperpoint, Transmatrix};

/// Which half of an eye outline is used and how the result is completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyePair {
    /// The whole outline is one eye.
    Single,
    /// The `y > 0` half is one eye; a mirrored copy is added.
    Mirrored,
}

/// Projects `h` to (x, y) over the equidistant surface through it, keeping
/// its height in z.
pub fn psmin(g: Geometry, h: Hyperpoint) -> Hyperpoint {
    let z = g.asin_auto(h[2]);
    let cs = g.cos_auto(z).powi(2);
    let r = (cs + h[0] * h[0] + h[1] * h[1]).sqrt();
    Hyperpoint::new(h[0] / r, h[1] / r, z, 0.0)
}

impl MeshBuilder {
    pub fn adjust_eye(&mut self, eye: ShapeId, head: ShapeId, shift_eye: f64, shift_head: f64, pair: EyePair) {
        self.seat_eye(eye, head, shift_eye, shift_head, pair, false);
    }

    /// Skull eyes sit at a fixed depth and are moved forward.
    pub fn adjust_skull_eyes(&mut self, eye: ShapeId, head: ShapeId, shift_eye: f64, shift_head: f64) {
        self.seat_eye(eye, head, shift_eye, shift_head, EyePair::Mirrored, true);
    }

    fn seat_eye(&mut self, eye: ShapeId, head: ShapeId, shift_eye: f64, shift_head: f64, pair: EyePair, skull: bool) {
        let g = self.geom;
        let eye_pts = self.points_of(eye).to_vec();
        if eye_pts.is_empty() {
            return;
        }
        let chosen = |h: &Hyperpoint| pair == EyePair::Single || h[1] > 0.0;
        let mut center = HYPC;
        for h in eye_pts.iter().filter(|h| chosen(h)) {
            center += *h;
        }
        let center = g.normalize(center);
        let rad: f64 =
            eye_pts.iter().filter(|h| chosen(h)).map(|&h| g.hdist(center, h)).sum::<f64>() / eye_pts.len() as f64;

        let pscenter = psmin(g, center);
        let zs = self.zpush(shift_head);
        let pss: Vec<Hyperpoint> = self.points_of(head).iter().map(|&h| psmin(g, zs * h)).collect();

        let mut pos = 0.0;
        if !pss.is_empty() {
            let zmid = pss.iter().map(|h| h[2]).sum::<f64>() / pss.len() as f64;
            let mut mindist = f64::INFINITY;
            let sq = |h: Hyperpoint| (h[0] - pscenter[0]).powi(2) + (h[1] - pscenter[1]).powi(2);
            for tri in pss.chunks_exact(3) {
                if tri[0][2] < zmid || self.params.world_3d {
                    let d = sq(tri[0]) + sq(tri[1]) + sq(tri[2]);
                    if d < mindist {
                        mindist = d;
                        pos = tri[0][2].min(tri[1][2]).min(tri[2][2]);
                    }
                }
            }
        }
        if skull {
            pos = self.zc(self.eyepos()) - 0.06 * self.sh() * 0.05;
        }

        self.make_ball(eye, rad, 0);
        let t = self.zpush(-shift_eye) * g.rgpushxto0(center) * self.zpush(pos);
        self.transform_last(t);
        if skull {
            self.transform_last(g.xpush(0.07 * self.scalefactor()));
            if let Some(sh) = self.shapes.get_mut(eye.index()) {
                sh.texture = None;
            }
        }
        if pair == EyePair::Mirrored {
            let s = self.last_start();
            let e = self.points.len();
            for i in s..e {
                if let Some(h) = self.points.get(i) {
                    self.push(Transmatrix::MIRROR_Y * h);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psmin_of_plane_point_keeps_direction() {
        let g = Geometry::Hyperbolic;
        let h = g.hpxy(0.3, 0.4);
        let p = psmin(g, h);
        assert!(p[2].abs() < 1e-12);
        assert!((p[1] / p[0] - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn psmin_recovers_height() {
        let g = Geometry::Hyperbolic;
        let h = g.zpush(0.25) * g.hpxy(0.0, 0.0);
        assert!((psmin(g, h)[2] - 0.25).abs() < 1e-12);
    }
}
