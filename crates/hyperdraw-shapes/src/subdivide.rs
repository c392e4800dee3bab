//! Adaptive triangle subdivision with face/chest height profiles.

use crate::builder::MeshBuilder;
use crate::constants::{SUBDIVIDE_LIMIT, SUBDIVIDE_SLACK};
use hyperdraw_geom::Hyperpoint;

/// Height profile applied to subdivided triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Face bump around the eye seat; used for heads.
    Face,
    /// Chest bump with a six-layer fin for the central part; armors.
    Chest,
    /// Chest bump without the fin; cloaks and dresses.
    Cloak,
}

const FIN_LEVELS: [f64; 6] = [0.0, 0.125, 0.125, 0.250, 0.375, 0.5];

impl MeshBuilder {
    /// Splits `hs` until no edge exceeds `0.02 * S`, then emits the pieces
    /// lifted by `profile`.
    pub fn addtri(&mut self, hs: [Hyperpoint; 3], profile: Profile) {
        let g = self.geom;
        let s = self.s();
        let ds = [g.hdist(hs[0], hs[1]), g.hdist(hs[1], hs[2]), g.hdist(hs[2], hs[0])];
        let mut maxds = 0.0f64;
        for d in ds {
            maxds = maxds.max(d) - SUBDIVIDE_SLACK;
        }

        if maxds > SUBDIVIDE_LIMIT * s {
            for i in 0..3 {
                let j = (i + 1) % 3;
                let k = (j + 1) % 3;
                if g.hdist(hs[i], hs[j]) > maxds {
                    let hm = g.mid(hs[i], hs[j]);
                    self.addtri([hm, hs[i], hs[k]], profile);
                    self.addtri([hm, hs[j], hs[k]], profile);
                    return;
                }
            }
        }

        match profile {
            Profile::Face => self.emit_face(hs),
            Profile::Chest | Profile::Cloak => self.emit_chest(hs, profile == Profile::Chest),
        }
    }

    fn emit_face(&mut self, hs: [Hyperpoint; 3]) {
        let g = self.geom;
        let (s, sh, rev_z) = (self.s(), self.sh(), self.rev_z());
        for h in hs {
            let mut zz = self.zc(self.eyepos());
            if h[0] < -0.05 * s {
                zz += rev_z * (h[0] / s + 0.05) * sh;
            }
            let d = g.hdist0(h);
            if d <= 0.0501 * s {
                zz += rev_z * (0.0026 - (d / s).powi(2)).max(0.0).sqrt() * sh;
            }
            self.push(g.zpush(zz) * h);
        }
    }

    fn emit_chest(&mut self, mut hs: [Hyperpoint; 3], fin: bool) {
        let g = self.geom;
        let (s, sh, rev_z) = (self.s(), self.sh(), self.rev_z());
        let mut ht = hs;
        let mut hsh = [0.0; 3];
        let mut shi = [0.0; 3];
        let mut ok = true;
        for i in 0..3 {
            hs[i] = g.normalize(hs[i]);
            let h = hs[i];
            let mut zz = self.zc(0.78);
            hsh[i] = h[1].abs();
            zz -= h[1] * h[1] / 0.14 / 0.14 * 0.01 / s / s * sh;
            zz -= h[0] * h[0] / 0.10 / 0.10 * 0.01 / s / s * sh;
            if h[1].abs() > 0.14 * s {
                ok = false;
                zz -= rev_z * (h[1].abs() / s - 0.14) * sh;
            }
            if h[0].abs() > 0.08 * s {
                ok = false;
                let over = h[0].abs() / s - 0.08;
                zz -= rev_z * over * over * 25.0 * sh;
            }
            ht[i] = g.zpush(zz) * h;
            shi[i] = if hsh[i] < 0.1 * s {
                0.5
            } else if hsh[i] < 0.12 * s {
                0.1 + 0.4 * (hsh[i] / s - 0.1) / (0.12 - 0.1)
            } else {
                0.1
            };
        }

        if !(ok && fin) {
            for h in ht {
                self.push(h);
            }
            return;
        }

        let sf = self.scalefactor();
        let mut htx = [ht; 6];
        for i in 0..3 {
            htx[0][i][0] *= 0.7;
            htx[0][i][1] *= 0.7;
            htx[1][i][0] *= 1.2;
            htx[1][i][1] *= 1.7;
            htx[2][i][1] *= 1.7;
            htx[4][i][0] = htx[4][i][0] * 0.4 + sf * 0.1;
            htx[5][i][0] = htx[5][i][0] * 0.3 + sf * 0.1;
            for layer in htx.iter_mut() {
                let p = layer[i];
                layer[i] = g.hpxy3(p[0], p[1], p[2]);
            }
        }
        let hh = self.lv.human_height;
        for (a, layer) in htx.iter_mut().enumerate() {
            for i in 0..3 {
                layer[i] = g.zpush(-shi[i].min(FIN_LEVELS[a]) * hh * rev_z) * layer[i];
            }
        }

        for h in htx[0] {
            self.push(h);
        }
        for a in 0..5 {
            let b = a + 1;
            for i in 0..3 {
                let j = (i + 1) % 3;
                self.push(htx[a][i]);
                self.push(htx[a][j]);
                self.push(htx[b][i]);
                self.push(htx[a][j]);
                self.push(htx[b][i]);
                self.push(htx[b][j]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ModelParams;
    use crate::ppr::Ppr;
    use hyperdraw_geom::{Geometry, RegularTiling};

    fn builder() -> MeshBuilder {
        let p = ModelParams { solid: true, ..ModelParams::default() };
        MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), p)
    }

    #[test]
    fn small_face_triangle_is_not_split() {
        let mut mb = builder();
        let g = mb.geom;
        let s = mb.s();
        let id = mb.new_shape(Ppr::MONSTER_HEAD);
        mb.addtri([g.hpxy(0.0, 0.0), g.hpxy(0.005 * s, 0.0), g.hpxy(0.0, 0.005 * s)], Profile::Face);
        assert_eq!(mb.points_of(id).len(), 3);
    }

    #[test]
    fn large_triangle_is_split_into_short_edges() {
        let mut mb = builder();
        let g = mb.geom;
        let s = mb.s();
        let id = mb.new_shape(Ppr::MONSTER_ARMOR0);
        mb.addtri([g.hpxy(0.2 * s, 0.0), g.hpxy(-0.1 * s, 0.2 * s), g.hpxy(-0.1 * s, -0.2 * s)], Profile::Cloak);
        let pts = mb.points_of(id);
        assert!(pts.len() > 3);
        assert_eq!(pts.len() % 3, 0);
    }

    #[test]
    fn central_chest_triangle_grows_fin() {
        let mut mb = builder();
        let g = mb.geom;
        let s = mb.s();
        let id = mb.new_shape(Ppr::MONSTER_ARMOR0);
        mb.addtri([g.hpxy(0.0, 0.0), g.hpxy(0.01 * s, 0.0), g.hpxy(0.0, 0.01 * s)], Profile::Chest);
        assert_eq!(mb.points_of(id).len(), 3 + 90);
    }
}
