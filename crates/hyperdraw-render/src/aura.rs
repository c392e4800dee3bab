//! The aura: a glow around the edge of the disk, colored by what is drawn in
//! each direction.

use crate::color::{channels, darkened};
use crate::queue::DrawRecord;
use hyperdraw_geom::Hyperpoint;
use std::f64::consts::TAU;

/// Angular buckets.
pub const AURA: usize = 180;
const RINGS: usize = 11;
const RING_DEPTH: [f64; RINGS] = [0.0, 2.0, 4.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 9.5, 10.0];

fn bucket(h: Hyperpoint, dir: i32) -> usize {
    let a = (2 * AURA as i32 + dir) as f64 + h[1].atan2(h[0]) * AURA as f64 / TAU;
    (a as i64).rem_euclid(AURA as i64) as usize
}

#[derive(Clone, Debug)]
pub struct Aura {
    /// `[r, g, b, weight]` per bucket, plus a wrap-around copy of bucket 0.
    acc: Vec<[i64; 4]>,
    specials: Vec<(usize, u32)>,
    memo: i64,
    smoothen: usize,
}

impl Aura {
    pub fn new(strength: i32, smoothen: usize) -> Self {
        let memo = if strength > 0 { (128 * 128 / strength) as i64 } else { 0 };
        Self { acc: vec![[0; 4]; AURA + 1], specials: Vec::new(), memo, smoothen }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.memo > 0
    }

    pub fn reset(&mut self) {
        self.acc.iter_mut().for_each(|b| *b = [0; 4]);
        self.specials.clear();
    }

    /// Adds 0xRRGGBB `col`, seen through `mirrors` reflections, in the
    /// direction of `h`; each darkening step doubles the weight, so darker
    /// cells count for less.
    pub fn add(&mut self, h: Hyperpoint, col: u32, fd: u32, mirrors: u32) {
        self.contribute(h, col, fd, mirrors, 1);
    }

    /// Takes back an earlier [`Aura::add`] with the same arguments.
    pub fn remove(&mut self, h: Hyperpoint, col: u32, fd: u32, mirrors: u32) {
        self.contribute(h, col, fd, mirrors, -1);
    }

    fn contribute(&mut self, h: Hyperpoint, col: u32, fd: u32, mirrors: u32, sign: i64) {
        if !self.enabled() {
            return;
        }
        let b = &mut self.acc[bucket(h, 0)];
        b[3] += sign * (self.memo << fd.min(16));
        for (k, ch) in channels(darkened(col, mirrors)).into_iter().enumerate() {
            b[k] += sign * ch as i64;
        }
    }

    /// Forces bucket colors in the direction of `h`, shifted by `dir` buckets.
    pub fn add_special(&mut self, h: Hyperpoint, col: u32, dir: i32) {
        if self.enabled() {
            self.specials.push((bucket(h, dir), col));
        }
    }

    /// Moving-window sum of channel `v` over `smoothen` buckets.
    pub fn sum(&mut self, v: usize) {
        let smo = self.smoothen.clamp(1, AURA);
        let auc: Vec<i64> = self.acc[..AURA].iter().map(|b| b[v]).collect();
        let mut val: i64 = auc[..smo].iter().sum();
        for t in 0..AURA {
            self.acc[(t + smo / 2) % AURA][v] = val;
            val -= auc[t];
            val += auc[(t + smo) % AURA];
        }
        self.acc[AURA][v] = self.acc[0][v];
    }

    pub fn bucket_totals(&self) -> &[[i64; 4]] {
        &self.acc[..AURA]
    }

    /// Smooths the buckets and builds the ring fan on a disk of radius `rad`.
    /// `background` is the 0xRRGGBB the outermost ring fades to.
    pub fn draw(&mut self, rad: f64, background: u32) -> Option<DrawRecord> {
        if !self.enabled() {
            return None;
        }
        for v in 0..4 {
            self.sum(v);
        }
        for &(r, col) in &self.specials {
            self.acc[r][3] = self.memo;
            for (k, ch) in channels(col).into_iter().enumerate() {
                self.acc[r][k] = ch as i64;
            }
        }
        let mut facs = [0.0; RINGS];
        let mut cmul = [0.0; RINGS];
        for (z, &dd) in RING_DEPTH.iter().enumerate() {
            cmul[z] = 1.0 - dd / 10.0;
            facs[z] = 0.99999 + 0.00001 * dd.exp();
        }
        facs[RINGS - 1] = 10.0;
        cmul[1] = cmul[0];

        let bak = channels(background).map(|c| c as f64 / 255.0);
        let mut rings = Vec::with_capacity(RINGS);
        for z in 0..RINGS {
            let rad0 = rad * facs[z];
            let mut ring = Vec::with_capacity(AURA + 1);
            for r in 0..=AURA {
                let rr = TAU * r as f64 / AURA as f64;
                let b = self.acc[r % AURA];
                let mut col = 0u32;
                for u in 0..3 {
                    let c = bak[u] + (b[u] as f64 / (b[3] as f64 + 0.1) - bak[u]) * cmul[z];
                    col = (col << 8) | (c.clamp(0.0, 1.0) * 255.0).round() as u32;
                }
                ring.push((Hyperpoint::new(rad0 * rr.cos(), rad0 * rr.sin(), 0.0, 1.0), (col << 8) | 0xFF));
            }
            rings.push(ring);
        }
        Some(DrawRecord::Aura { rings })
    }
}
