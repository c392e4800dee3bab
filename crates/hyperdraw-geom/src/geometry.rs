use crate::matrix::Transmatrix;
use crate::point::Hyperpoint;

/// The model space the algebra works in.
///
/// Hyperbolic points live on the hyperboloid `w^2 - x^2 - y^2 - z^2 = 1`,
/// spherical points on the unit 3-sphere, and Euclidean points on `w = 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Geometry {
    #[default]
    Hyperbolic,
    Euclidean,
    Spherical,
}

impl Geometry {
    #[inline]
    pub fn curvature(self) -> f64 {
        match self {
            Geometry::Hyperbolic => -1.0,
            Geometry::Euclidean => 0.0,
            Geometry::Spherical => 1.0,
        }
    }

    #[inline]
    pub fn sin_auto(self, x: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => x.sinh(),
            Geometry::Euclidean => x,
            Geometry::Spherical => x.sin(),
        }
    }

    #[inline]
    pub fn cos_auto(self, x: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => x.cosh(),
            Geometry::Euclidean => 1.0,
            Geometry::Spherical => x.cos(),
        }
    }

    #[inline]
    pub fn tan_auto(self, x: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => x.tanh(),
            Geometry::Euclidean => x,
            Geometry::Spherical => x.tan(),
        }
    }

    #[inline]
    pub fn asin_auto(self, x: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => x.asinh(),
            Geometry::Euclidean => x,
            Geometry::Spherical => x.asin(),
        }
    }

    #[inline]
    pub fn atan_auto(self, x: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => x.atanh(),
            Geometry::Euclidean => x,
            Geometry::Spherical => x.atan(),
        }
    }

    pub fn asin_auto_clamp(self, x: f64) -> f64 {
        match self {
            Geometry::Spherical => x.clamp(-1.0, 1.0).asin(),
            g => g.asin_auto(x),
        }
    }

    pub fn acos_auto_clamp(self, x: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => {
                if x < 1.0 {
                    0.0
                } else {
                    x.acosh()
                }
            }
            Geometry::Euclidean => 0.0,
            Geometry::Spherical => x.clamp(-1.0, 1.0).acos(),
        }
    }

    /// Squared chord between two points, signed by curvature on `w`.
    pub fn intval(self, a: Hyperpoint, b: Hyperpoint) -> f64 {
        let d = a - b;
        d.sqhypot3() + self.curvature() * d[3] * d[3]
    }

    pub fn hdist(self, a: Hyperpoint, b: Hyperpoint) -> f64 {
        let iv = self.intval(a, b).max(0.0);
        match self {
            Geometry::Euclidean => iv.sqrt(),
            Geometry::Hyperbolic => 2.0 * (iv.sqrt() / 2.0).asinh(),
            Geometry::Spherical => 2.0 * self.asin_auto_clamp(iv.sqrt() / 2.0),
        }
    }

    /// Distance from the origin.
    pub fn hdist0(self, h: Hyperpoint) -> f64 {
        match self {
            Geometry::Euclidean => h.hypot3() / h[3],
            g => g.acos_auto_clamp(h[3]),
        }
    }

    /// Homogeneous scale of a point: 1 for points on the model surface.
    pub fn zlevel(self, h: Hyperpoint) -> f64 {
        match self {
            Geometry::Euclidean => h[3],
            Geometry::Spherical => (h.sqhypot3() + h[3] * h[3]).sqrt(),
            Geometry::Hyperbolic => {
                let q = (h[3] * h[3] - h.sqhypot3()).max(0.0);
                if h[3] < 0.0 { -q.sqrt() } else { q.sqrt() }
            }
        }
    }

    pub fn normalize(self, h: Hyperpoint) -> Hyperpoint {
        let z = self.zlevel(h);
        if z == 0.0 || !z.is_finite() { h } else { h / z }
    }

    #[inline]
    pub fn mid(self, a: Hyperpoint, b: Hyperpoint) -> Hyperpoint {
        self.normalize(a + b)
    }

    /// Normalized centroid of a set of points.
    pub fn center_of(self, pts: &[Hyperpoint]) -> Hyperpoint {
        self.normalize(pts.iter().sum())
    }

    fn w_for(self, sq: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => (1.0 + sq).sqrt(),
            Geometry::Euclidean => 1.0,
            Geometry::Spherical => (1.0 - sq).max(0.0).sqrt(),
        }
    }

    /// Point with the given Klein-like tangent coordinates in the `z = 0` plane.
    pub fn hpxy(self, x: f64, y: f64) -> Hyperpoint {
        Hyperpoint::new(x, y, 0.0, self.w_for(x * x + y * y))
    }

    pub fn hpxy3(self, x: f64, y: f64, z: f64) -> Hyperpoint {
        Hyperpoint::new(x, y, z, self.w_for(x * x + y * y + z * z))
    }

    pub fn cpush0(self, c: usize, x: f64) -> Hyperpoint {
        let mut h = Hyperpoint::new(0.0, 0.0, 0.0, self.cos_auto(x));
        h[c] = self.sin_auto(x);
        h
    }

    #[inline]
    pub fn xpush0(self, x: f64) -> Hyperpoint {
        self.cpush0(0, x)
    }

    /// Same as `spin(alpha) * xpush0(x)`.
    pub fn xspinpush0(self, alpha: f64, x: f64) -> Hyperpoint {
        let s = self.sin_auto(x);
        Hyperpoint::new(alpha.cos() * s, -alpha.sin() * s, 0.0, self.cos_auto(x))
    }

    /// Translation by `x` along coordinate axis `cid`.
    pub fn cpush(self, cid: usize, x: f64) -> Transmatrix {
        let mut t = Transmatrix::IDENTITY;
        let c = self.cos_auto(x);
        let s = self.sin_auto(x);
        t[3][3] = c;
        t[cid][cid] = c;
        t[cid][3] = s;
        t[3][cid] = -self.curvature() * s;
        t
    }

    #[inline]
    pub fn xpush(self, x: f64) -> Transmatrix {
        self.cpush(0, x)
    }

    #[inline]
    pub fn ypush(self, x: f64) -> Transmatrix {
        self.cpush(1, x)
    }

    #[inline]
    pub fn zpush(self, z: f64) -> Transmatrix {
        self.cpush(2, z)
    }

    /// Translation taking a point on the x axis to the origin.
    pub fn pushxto0(self, h: Hyperpoint) -> Transmatrix {
        let mut t = Transmatrix::IDENTITY;
        t[0][0] = h[3];
        t[0][3] = -h[0];
        t[3][0] = self.curvature() * h[0];
        t[3][3] = h[3];
        t
    }

    /// Inverse of [`Geometry::pushxto0`].
    pub fn rpushxto0(self, h: Hyperpoint) -> Transmatrix {
        let mut t = Transmatrix::IDENTITY;
        t[0][0] = h[3];
        t[0][3] = h[0];
        t[3][0] = -self.curvature() * h[0];
        t[3][3] = h[3];
        t
    }

    fn eupush(h: Hyperpoint, sign: f64) -> Transmatrix {
        let mut t = Transmatrix::IDENTITY;
        for i in 0..3 {
            t[i][3] = sign * h[i] / h[3];
        }
        t
    }

    /// Isometry taking `h` to the origin without twisting.
    pub fn gpushxto0(self, h: Hyperpoint) -> Transmatrix {
        if self == Geometry::Euclidean {
            return Self::eupush(h, -1.0);
        }
        let t = Transmatrix::spintox(h);
        Transmatrix::rspintox(h) * self.pushxto0(t * h) * t
    }

    /// Isometry taking the origin to `h`; inverse of [`Geometry::gpushxto0`].
    pub fn rgpushxto0(self, h: Hyperpoint) -> Transmatrix {
        if self == Geometry::Euclidean {
            return Self::eupush(h, 1.0);
        }
        let t = Transmatrix::spintox(h);
        Transmatrix::rspintox(h) * self.rpushxto0(t * h) * t
    }

    /// Moves `h` by `z` along the geodesic perpendicular to the plane through `h`.
    pub fn zshift(self, h: Hyperpoint, z: f64) -> Hyperpoint {
        self.rgpushxto0(h) * self.cpush0(2, z)
    }

    /// Moves `h` along the equidistant family so that its height above the
    /// `z = 0` plane grows by `z`, keeping its foot point.
    pub fn orthogonal_move(self, h: Hyperpoint, z: f64) -> Hyperpoint {
        if self == Geometry::Euclidean {
            return Hyperpoint::new(h[0], h[1], h[2] + z * h[3], h[3]);
        }
        let t0 = self.asin_auto_clamp(h[2]);
        let c0 = self.cos_auto(t0);
        if c0.abs() < 1e-12 {
            return self.cpush0(2, t0 + z);
        }
        let t1 = t0 + z;
        let f = self.cos_auto(t1) / c0;
        Hyperpoint::new(h[0] * f, h[1] * f, self.sin_auto(t1), h[3] * f)
    }

    /// Height of `h` above the `z = 0` plane.
    #[inline]
    pub fn height_of(self, h: Hyperpoint) -> f64 {
        match self {
            Geometry::Euclidean => h[2] / h[3],
            g => g.asin_auto_clamp(h[2]),
        }
    }

    /// Projects `h` back to the `z = 0` plane; see [`Geometry::orthogonal_move`].
    pub fn foot(self, h: Hyperpoint) -> Hyperpoint {
        self.orthogonal_move(h, -self.height_of(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::C0;

    const ALL: [Geometry; 3] = [Geometry::Hyperbolic, Geometry::Euclidean, Geometry::Spherical];

    #[test]
    fn xpush0_distance_matches_argument() {
        for g in ALL {
            let d = g.hdist0(g.xpush0(0.7));
            assert!((d - 0.7).abs() < 1e-9, "{g:?}: {d}");
        }
    }

    #[test]
    fn orthogonal_move_keeps_foot() {
        for g in ALL {
            let h = g.xspinpush0(0.4, 0.5);
            let up = g.orthogonal_move(h, 0.2);
            assert!((g.height_of(up) - 0.2).abs() < 1e-9, "{g:?}");
            let f = g.foot(up);
            assert!(g.hdist(f, h) < 1e-9, "{g:?}");
        }
    }

    #[test]
    fn zshift_of_origin_is_zpush() {
        for g in ALL {
            let a = g.zshift(C0, 0.3);
            let b = g.zpush(0.3) * C0;
            assert!(g.hdist(a, b) < 1e-12);
        }
    }
}
