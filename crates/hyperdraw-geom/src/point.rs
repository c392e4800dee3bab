use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

/// A point (or direction) in homogeneous coordinates: three spatial components
/// followed by the homogeneous/curvature coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Hyperpoint(pub [f64; 4]);

/// The origin of the model.
pub const C0: Hyperpoint = Hyperpoint([0.0, 0.0, 0.0, 1.0]);

/// The zero vector, used as an accumulator before normalizing.
pub const HYPC: Hyperpoint = Hyperpoint([0.0, 0.0, 0.0, 0.0]);

impl Hyperpoint {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    #[inline]
    pub fn sqhypot2(self) -> f64 {
        self.0[0] * self.0[0] + self.0[1] * self.0[1]
    }

    #[inline]
    pub fn hypot2(self) -> f64 {
        self.sqhypot2().sqrt()
    }

    #[inline]
    pub fn sqhypot3(self) -> f64 {
        self.sqhypot2() + self.0[2] * self.0[2]
    }

    #[inline]
    pub fn hypot3(self) -> f64 {
        self.sqhypot3().sqrt()
    }

    /// Angle of the xy projection, measured from the x axis.
    #[inline]
    pub fn angle_xy(self) -> f64 {
        self.0[1].atan2(self.0[0])
    }

    /// Euclidean projection of the point onto the plane `w = 1`.
    #[inline]
    pub fn projected(self) -> [f64; 2] {
        [self.0[0] / self.0[3], self.0[1] / self.0[3]]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Index<usize> for Hyperpoint {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl IndexMut<usize> for Hyperpoint {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl Add for Hyperpoint {
    type Output = Hyperpoint;
    #[inline]
    fn add(self, rhs: Hyperpoint) -> Hyperpoint {
        let mut r = self;
        r += rhs;
        r
    }
}

impl AddAssign for Hyperpoint {
    #[inline]
    fn add_assign(&mut self, rhs: Hyperpoint) {
        for i in 0..4 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl Sub for Hyperpoint {
    type Output = Hyperpoint;
    #[inline]
    fn sub(self, rhs: Hyperpoint) -> Hyperpoint {
        let mut r = self;
        r -= rhs;
        r
    }
}

impl SubAssign for Hyperpoint {
    #[inline]
    fn sub_assign(&mut self, rhs: Hyperpoint) {
        for i in 0..4 {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl Mul<f64> for Hyperpoint {
    type Output = Hyperpoint;
    #[inline]
    fn mul(self, rhs: f64) -> Hyperpoint {
        Hyperpoint(self.0.map(|v| v * rhs))
    }
}

impl Div<f64> for Hyperpoint {
    type Output = Hyperpoint;
    #[inline]
    fn div(self, rhs: f64) -> Hyperpoint {
        Hyperpoint(self.0.map(|v| v / rhs))
    }
}

impl Neg for Hyperpoint {
    type Output = Hyperpoint;
    #[inline]
    fn neg(self) -> Hyperpoint {
        Hyperpoint(self.0.map(|v| -v))
    }
}

impl Sum for Hyperpoint {
    fn sum<I: Iterator<Item = Hyperpoint>>(iter: I) -> Hyperpoint {
        iter.fold(HYPC, |acc, h| acc + h)
    }
}

impl<'a> Sum<&'a Hyperpoint> for Hyperpoint {
    fn sum<I: Iterator<Item = &'a Hyperpoint>>(iter: I) -> Hyperpoint {
        iter.fold(HYPC, |acc, h| acc + *h)
    }
}
