//! Surfaces of revolution around the x axis, and wing-flap animation.

use crate::buffer::ShapeId;
use crate::builder::MeshBuilder;
use crate::constants::{BIRD_FRAMES, REV_STEP, REV_STEP_FULL};
use crate::ppr::Ppr;
use hyperdraw_geom::{DEGREE, Hyperpoint, Transmatrix};

fn rot(deg: usize) -> Transmatrix {
    Transmatrix::cspin(1, 2, deg as f64 * DEGREE)
}

impl MeshBuilder {
    fn push_sweep_quad(&mut self, s: usize, step: usize, quad: [Hyperpoint; 4]) {
        let [h0, h1, hs0, hs1] = quad;
        let (a, b) = (rot(s), rot(s + step));
        self.push(a * h0);
        self.push(a * h1);
        self.push(b * hs0);
        self.push(a * h1);
        self.push(b * hs0);
        self.push(b * hs1);
    }

    /// Sweeps the whole outline of `id` through `mx` degrees.
    pub fn make_revolution(&mut self, id: ShapeId, mx: usize, push: f64) {
        let body = self.outline(id);
        self.bshape(id, Ppr::MONSTER_BODY);
        let step = if mx == 360 { REV_STEP_FULL } else { REV_STEP };
        let n = body.len();
        for i in 0..n {
            let h0 = body[i];
            let h1 = body[(i + 1) % n];
            for s in (0..mx).step_by(step) {
                self.push_sweep_quad(s, step, [h0, h1, h0, h1]);
            }
        }
        self.set_triangles();
        self.set_rev_steps(mx.div_ceil(step) as u32);
        self.add_texture(id);
        self.shift_last(-push);
    }

    /// Sweeps the upper half of a symmetric outline through a full turn.
    ///
    /// Interior profile points that stick out (x-local extrema, or wider than
    /// `width`) are dropped greedily, widest first, and re-interpolated from
    /// their surviving neighbors. The unmodified profile is kept at every
    /// multiple of `each` degrees so fins and ears survive there.
    pub fn make_revolution_cut(&mut self, id: ShapeId, each: usize, push: f64, width: f64) {
        let g = self.geom;
        let mut body = self.outline(id);
        body.truncate(body.len() / 2);
        let (Some(first), Some(last)) = (body.first().copied(), body.last().copied()) else {
            return;
        };
        let (fx, lx) = (first[0], last[0]);
        body.insert(0, g.hpxy(fx + (fx - lx) * 1e-3, 0.0));
        body.push(g.hpxy(lx + (lx - fx) * 1e-3, 0.0));
        let n = body.len();

        let mut gbody = body.clone();
        let mut nextid: Vec<usize> = (0..n).map(|i| (i + 1).min(n - 1)).collect();
        let mut lastid: Vec<usize> = (0..n).map(|i| i.saturating_sub(1)).collect();
        let mut stillin = vec![true; n];

        loop {
            let mut cand = None;
            let mut cv = 0.0;
            for i in 1..n - 1 {
                if !stillin[i] {
                    continue;
                }
                let x = gbody[i][0];
                let (xl, xn) = (gbody[lastid[i]][0], gbody[nextid[i]][0]);
                let extreme = (x < xl && x < xn) || (x > xl && x > xn);
                if (extreme || gbody[i][1].abs() > width) && gbody[i][1].abs() > cv {
                    cand = Some(i);
                    cv = gbody[i][1].abs();
                }
            }
            let Some(i) = cand else { break };
            lastid[nextid[i]] = lastid[i];
            nextid[lastid[i]] = nextid[i];
            stillin[i] = false;
        }

        for i in (0..n).rev() {
            if !stillin[i] && !stillin[nextid[i]] {
                nextid[i] = nextid[nextid[i]];
            }
        }
        for i in 0..n {
            if !stillin[i] && !stillin[lastid[i]] {
                lastid[i] = lastid[lastid[i]];
            }
        }
        for i in 0..n {
            if !stillin[i] {
                let (l, nx) = (lastid[i], nextid[i]);
                gbody[i] = g.normalize(gbody[l] * (i - l) as f64 + gbody[nx] * (nx - i) as f64);
            }
        }

        self.bshape(id, Ppr::MONSTER_BODY);
        let step = REV_STEP;
        for i in 0..n {
            let i1 = (i + 1) % n;
            for s in (0..360).step_by(step) {
                let tbody = if s % each != 0 { &gbody } else { &body };
                let nbody = if (s + step) % each != 0 { &gbody } else { &body };
                self.push_sweep_quad(s, step, [tbody[i], tbody[i1], nbody[i], nbody[i1]]);
            }
        }
        self.set_triangles();
        self.set_rev_steps((360 / step) as u32);
        self.add_texture(id);
        self.shift_last(-push);
    }

    /// Thirty wing-flap frames of `orig`: points farther than `body` from the
    /// axis are bent up by `sin(12 deg * i) * 30 deg`. All frames and the
    /// source shape end up at bird height.
    pub fn animate_bird(&mut self, orig: ShapeId, body: f64) -> Vec<ShapeId> {
        let g = self.geom;
        let mut frames = Vec::with_capacity(BIRD_FRAMES);
        for i in 0..BIRD_FRAMES {
            let Some(tgt) = self.clone_shape(orig) else { return frames };
            let alpha = (12.0 * DEGREE * i as f64).sin() * 30.0 * DEGREE;
            if let Some(sh) = self.shape(tgt) {
                let r = sh.range();
                self.points.map_range(r, |mut h| {
                    if h[1].abs() > body {
                        let off = if h[1] > 0.0 { body } else { -body };
                        h[2] += (h[1] - off).abs() * alpha.sin();
                        h[1] = off + (h[1] - off) * alpha.cos();
                        h = g.normalize(h);
                    }
                    h
                });
            }
            frames.push(tgt);
        }
        let bird = self.lv.bird;
        for &f in &frames {
            self.shift_shape(f, bird);
        }
        self.shift_shape(orig, bird);
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ModelParams;
    use hyperdraw_geom::{Geometry, RegularTiling};

    fn builder_with_loop(pts: &[[f64; 2]]) -> (MeshBuilder, ShapeId) {
        let p = ModelParams { solid: true, ..ModelParams::default() };
        let mut mb = MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), p);
        let id = mb.new_shape(Ppr::MONSTER_BODY);
        for &[x, y] in pts.iter().chain(pts.first()) {
            let h = mb.geom.hpxy(x, y);
            mb.push(h);
        }
        (mb, id)
    }

    fn lens(n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                [0.2 * a.cos(), 0.05 * a.sin()]
            })
            .collect()
    }

    #[test]
    fn revolution_point_count() {
        let (mut mb, id) = builder_with_loop(&lens(8));
        mb.make_revolution(id, 180, 0.0);
        assert_eq!(mb.points_of(id).len(), 8 * 18 * 6);
        let (mut mb, id) = builder_with_loop(&lens(8));
        mb.make_revolution(id, 360, 0.0);
        assert_eq!(mb.points_of(id).len(), 8 * 15 * 6);
    }

    #[test]
    fn revolution_cut_sweeps_half_profile_plus_ends() {
        let (mut mb, id) = builder_with_loop(&lens(12));
        mb.make_revolution_cut(id, 180, 0.0, 99.0);
        // half of 12, plus two extended endpoints, 36 steps, 6 points each
        assert_eq!(mb.points_of(id).len(), 8 * 36 * 6);
        assert!(mb.points_of(id).iter().all(|h| h.is_finite()));
    }

    #[test]
    fn revolution_cut_narrows_wide_points_between_keyframes() {
        let (mut mb, id) = builder_with_loop(&lens(12));
        mb.make_revolution_cut(id, 180, 0.0, 0.01);
        let pts = mb.points_of(id);
        let widest = |r: &[Hyperpoint]| r.iter().map(|h| h[1].hypot(h[2])).fold(0.0, f64::max);
        // profile point 3 is the widest; at 0 degrees the unmodified profile is
        // used, at 90 degrees only the cut one
        let base = 3 * 36 * 6;
        let at0 = &pts[base..base + 6];
        let at90 = &pts[base + 9 * 6..base + 10 * 6];
        assert!(widest(at90) < 0.5 * widest(at0));
    }

    #[test]
    fn bird_frames_flap() {
        let (mut mb, id) = builder_with_loop(&[[0.05, 0.0], [0.0, 0.2], [-0.05, 0.0], [0.0, -0.2]]);
        let frames = mb.animate_bird(id, 0.05);
        assert_eq!(frames.len(), 30);
        let g = mb.geom;
        let gap = |f: ShapeId| {
            mb.points_of(f).iter().zip(mb.points_of(id)).map(|(a, b)| g.hdist(*a, *b)).fold(0.0, f64::max)
        };
        assert!(gap(frames[0]) < 1e-9);
        assert!(gap(frames[5]) > 1e-3);
    }
}
