//! Lofting outlines into z-extruded solids.

use crate::builder::MeshBuilder;
use hyperdraw_geom::Hyperpoint;
use std::cmp::Ordering;

impl MeshBuilder {
    /// Fans `ring` at height `z0` to the apex `shcenter` at `z1`: `3 * |ring|` points.
    pub fn add_cone(&mut self, z0: f64, ring: &[Hyperpoint], z1: f64) {
        self.set_triangles();
        let n = ring.len();
        let t0 = self.zpush(z0);
        let apex = self.zpush(z1) * self.shcenter;
        for i in 0..n {
            self.push(t0 * ring[i]);
            self.push(t0 * ring[(i + 1) % n]);
            self.push(apex);
        }
    }

    /// Quad strip between two rings of equal size: `6 * K` points. Rings of
    /// different sizes fall back to [`MeshBuilder::add_prism`].
    pub fn add_prism_sync(&mut self, z0: f64, vh0: &[Hyperpoint], z1: f64, vh1: &[Hyperpoint]) {
        if vh0.len() != vh1.len() {
            log::trace!(target: "shapes", "prism_sync size mismatch {} != {}", vh0.len(), vh1.len());
            self.add_prism(z0, vh0, z1, vh1);
            return;
        }
        self.set_triangles();
        let k = vh0.len();
        let t0 = self.zpush(z0);
        let t1 = self.zpush(z1);
        for i in 0..k {
            let i1 = (i + 1) % k;
            self.push(t0 * vh0[i]);
            self.push(t1 * vh1[i]);
            self.push(t0 * vh0[i1]);
            self.push(t1 * vh1[i]);
            self.push(t0 * vh0[i1]);
            self.push(t1 * vh1[i1]);
        }
    }

    /// Loft between rings of any sizes, stitched by angle around each ring's
    /// own center. Ties are broken by ring, then by index within the ring.
    pub fn add_prism(&mut self, z0: f64, vh0: &[Hyperpoint], z1: f64, vh1: &[Hyperpoint]) {
        self.set_triangles();
        if vh0.is_empty() || vh1.is_empty() {
            return;
        }
        let g = self.geom;
        let t0 = g.gpushxto0(g.center_of(vh0));
        let t1 = g.gpushxto0(g.center_of(vh1));

        struct Mixed {
            angle: f64,
            owner: usize,
            idx: usize,
            h: Hyperpoint,
        }
        let mut pairs: Vec<Mixed> = Vec::with_capacity(vh0.len() + vh1.len());
        for (idx, &h) in vh0.iter().enumerate() {
            pairs.push(Mixed { angle: (t0 * h).angle_xy(), owner: 0, idx, h });
        }
        for (idx, &h) in vh1.iter().enumerate() {
            pairs.push(Mixed { angle: (t1 * h).angle_xy(), owner: 1, idx, h });
        }
        pairs.sort_by(|p, q| {
            p.angle
                .partial_cmp(&q.angle)
                .unwrap_or(Ordering::Equal)
                .then(p.owner.cmp(&q.owner))
                .then(p.idx.cmp(&q.idx))
        });

        let mut lasts = [vh0[0], vh1[0]];
        for pp in &pairs {
            lasts[pp.owner] = pp.h;
        }

        let zs = [z0, z1];
        let p0 = self.zpush(z0);
        let p1 = self.zpush(z1);
        for pp in &pairs {
            self.push(p0 * lasts[0]);
            self.push(p1 * lasts[1]);
            self.push(self.zpush(zs[pp.owner]) * pp.h);
            lasts[pp.owner] = pp.h;
        }
    }
}
