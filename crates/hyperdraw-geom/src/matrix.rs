use crate::point::{C0, Hyperpoint};
use core::ops::{Index, IndexMut, Mul, MulAssign};
use std::f64::consts::PI;

/// 4x4 row-major transform acting on homogeneous [`Hyperpoint`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transmatrix(pub [[f64; 4]; 4]);

impl Default for Transmatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transmatrix {
    pub const IDENTITY: Transmatrix = Transmatrix([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    pub const MIRROR_X: Transmatrix = Transmatrix([
        [-1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    /// Reflection across the x axis; the default "mirror" of a pose.
    pub const MIRROR_Y: Transmatrix = Transmatrix([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    pub const MIRROR: Transmatrix = Self::MIRROR_Y;
    pub const MIRROR_Z: Transmatrix = Transmatrix([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[inline]
    pub const fn diag(a: f64, b: f64, c: f64, d: f64) -> Self {
        Transmatrix([
            [a, 0.0, 0.0, 0.0],
            [0.0, b, 0.0, 0.0],
            [0.0, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, d],
        ])
    }

    /// Rotation by `alpha` in the plane of coordinates `a` and `b`.
    pub fn cspin(a: usize, b: usize, alpha: f64) -> Self {
        let mut t = Self::IDENTITY;
        let (s, c) = alpha.sin_cos();
        t.0[a][a] = c;
        t.0[a][b] = s;
        t.0[b][a] = -s;
        t.0[b][b] = c;
        t
    }

    #[inline]
    pub fn spin(alpha: f64) -> Self {
        Self::cspin(0, 1, alpha)
    }

    #[inline]
    pub fn pispin() -> Self {
        Self::spin(PI)
    }

    /// Rotation in the `t`/`f` plane that brings `h` onto the `t` axis.
    pub fn spintoc(h: Hyperpoint, t: usize, f: usize) -> Self {
        let mut m = Self::IDENTITY;
        let r = h[f].hypot(h[t]);
        if r >= 1e-15 {
            m.0[t][t] = h[t] / r;
            m.0[t][f] = h[f] / r;
            m.0[f][t] = -h[f] / r;
            m.0[f][f] = h[t] / r;
        }
        m
    }

    /// Inverse of [`Transmatrix::spintoc`].
    pub fn rspintoc(h: Hyperpoint, t: usize, f: usize) -> Self {
        let mut m = Self::IDENTITY;
        let r = h[f].hypot(h[t]);
        if r >= 1e-15 {
            m.0[t][t] = h[t] / r;
            m.0[t][f] = -h[f] / r;
            m.0[f][t] = h[f] / r;
            m.0[f][f] = h[t] / r;
        }
        m
    }

    /// Rotation bringing `h` onto the positive x axis.
    pub fn spintox(h: Hyperpoint) -> Self {
        let t1 = Self::spintoc(h, 0, 1);
        Self::spintoc(t1 * h, 0, 2) * t1
    }

    /// Rotation bringing the positive x axis onto the direction of `h`.
    pub fn rspintox(h: Hyperpoint) -> Self {
        let t1 = Self::spintoc(h, 0, 1);
        Self::rspintoc(h, 0, 1) * Self::rspintoc(t1 * h, 0, 2)
    }

    /// Scales the spatial columns by `fac` and the homogeneous column by `facz`.
    pub fn xyzscale(&self, fac: f64, facz: f64) -> Self {
        let mut r = *self;
        for row in r.0.iter_mut() {
            for (j, v) in row.iter_mut().enumerate() {
                *v *= if j == 3 { facz } else { fac };
            }
        }
        r
    }

    /// Image of the origin (`tC0`).
    #[inline]
    pub fn c0(&self) -> Hyperpoint {
        *self * C0
    }

    pub fn transpose(&self) -> Self {
        let mut r = Self::IDENTITY;
        for i in 0..4 {
            for j in 0..4 {
                r.0[i][j] = self.0[j][i];
            }
        }
        r
    }

    /// Gauss-Jordan inverse with partial pivoting; `None` when singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let mut a = self.0;
        let mut inv = Self::IDENTITY.0;
        for col in 0..4 {
            let mut pivot = col;
            for row in col + 1..4 {
                if a[row][col].abs() > a[pivot][col].abs() {
                    pivot = row;
                }
            }
            if a[pivot][col].abs() < 1e-300 || !a[pivot][col].is_finite() {
                return None;
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);
            let d = a[col][col];
            for j in 0..4 {
                a[col][j] /= d;
                inv[col][j] /= d;
            }
            for row in 0..4 {
                if row == col {
                    continue;
                }
                let f = a[row][col];
                if f == 0.0 {
                    continue;
                }
                for j in 0..4 {
                    a[row][j] -= f * a[col][j];
                    inv[row][j] -= f * inv[col][j];
                }
            }
        }
        Some(Transmatrix(inv))
    }

    /// Inverse, falling back to identity for a singular matrix.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::IDENTITY)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }

    /// Largest absolute entrywise difference.
    pub fn max_diff(&self, other: &Transmatrix) -> f64 {
        let mut m = 0.0f64;
        for i in 0..4 {
            for j in 0..4 {
                m = m.max((self.0[i][j] - other.0[i][j]).abs());
            }
        }
        m
    }
}

impl Index<usize> for Transmatrix {
    type Output = [f64; 4];
    #[inline]
    fn index(&self, i: usize) -> &[f64; 4] {
        &self.0[i]
    }
}

impl IndexMut<usize> for Transmatrix {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut [f64; 4] {
        &mut self.0[i]
    }
}

impl Mul for Transmatrix {
    type Output = Transmatrix;
    fn mul(self, rhs: Transmatrix) -> Transmatrix {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        Transmatrix(r)
    }
}

impl MulAssign for Transmatrix {
    #[inline]
    fn mul_assign(&mut self, rhs: Transmatrix) {
        *self = *self * rhs;
    }
}

impl Mul<Hyperpoint> for Transmatrix {
    type Output = Hyperpoint;
    fn mul(self, h: Hyperpoint) -> Hyperpoint {
        let mut r = [0.0; 4];
        for (i, v) in r.iter_mut().enumerate() {
            *v = (0..4).map(|k| self.0[i][k] * h[k]).sum();
        }
        Hyperpoint(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spintox_brings_point_to_x_axis() {
        let h = Hyperpoint::new(0.3, -0.4, 0.2, 1.2);
        let r = Transmatrix::spintox(h) * h;
        assert!(r[1].abs() < 1e-12);
        assert!(r[2].abs() < 1e-12);
        assert!(r[0] > 0.0);
    }

    #[test]
    fn rspintox_inverts_spintox() {
        let h = Hyperpoint::new(-0.1, 0.25, 0.6, 1.0);
        let m = Transmatrix::rspintox(h) * Transmatrix::spintox(h);
        assert!(m.max_diff(&Transmatrix::IDENTITY) < 1e-12);
    }

    #[test]
    fn singular_inverse_is_none() {
        let z = Transmatrix::diag(1.0, 0.0, 1.0, 1.0);
        assert!(z.try_inverse().is_none());
        assert_eq!(z.inverse(), Transmatrix::IDENTITY);
    }
}
