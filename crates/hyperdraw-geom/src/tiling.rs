//! Metrics of regular `{p,q}` tilings: `p`-gons, `q` around each vertex.

use crate::geometry::Geometry;
use crate::matrix::Transmatrix;
use crate::point::Hyperpoint;
use std::f64::consts::PI;

/// Circumradius used for Euclidean tilings, which have no natural scale.
pub const EUCLID_CIRCUMRADIUS: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegularTiling {
    pub p: u32,
    pub q: u32,
}

impl RegularTiling {
    pub const fn new(p: u32, q: u32) -> Self {
        Self { p, q }
    }

    /// The geometry in which `{p,q}` tiles the plane.
    pub fn natural_geometry(self) -> Geometry {
        let k = (self.p as i64 - 2) * (self.q as i64 - 2);
        match k.cmp(&4) {
            std::cmp::Ordering::Greater => Geometry::Hyperbolic,
            std::cmp::Ordering::Equal => Geometry::Euclidean,
            std::cmp::Ordering::Less => Geometry::Spherical,
        }
    }

    /// Distance from a cell center to its corners.
    pub fn circumradius(self, g: Geometry) -> f64 {
        let a = PI / self.p as f64;
        let b = PI / self.q as f64;
        let cc = 1.0 / (a.tan() * b.tan());
        match g {
            Geometry::Hyperbolic => cc.max(1.0).acosh(),
            Geometry::Spherical => cc.clamp(-1.0, 1.0).acos(),
            Geometry::Euclidean => EUCLID_CIRCUMRADIUS,
        }
    }

    /// Distance from a cell center to the midpoints of its edges.
    pub fn inradius(self, g: Geometry) -> f64 {
        let a = PI / self.p as f64;
        let b = PI / self.q as f64;
        let c = b.cos() / a.sin();
        match g {
            Geometry::Hyperbolic => c.max(1.0).acosh(),
            Geometry::Spherical => c.clamp(-1.0, 1.0).acos(),
            Geometry::Euclidean => EUCLID_CIRCUMRADIUS * a.cos(),
        }
    }

    /// Distance between the centers of two adjacent cells.
    #[inline]
    pub fn center_distance(self, g: Geometry) -> f64 {
        2.0 * self.inradius(g)
    }

    /// Counter-clockwise angle of direction `d`.
    #[inline]
    pub fn direction_angle(self, d: usize) -> f64 {
        2.0 * PI * d as f64 / self.p as f64
    }

    /// Corner between directions `i` and `i + 1`.
    pub fn corner(self, g: Geometry, i: usize) -> Hyperpoint {
        let a = self.direction_angle(i) + PI / self.p as f64;
        g.xspinpush0(-a, self.circumradius(g))
    }

    /// Transform from the frame of the neighbor across direction `d` (whose own
    /// direction `back` points at us) into our frame.
    pub fn relative(self, g: Geometry, d: usize, back: usize) -> Transmatrix {
        Transmatrix::spin(-self.direction_angle(d))
            * g.xpush(self.center_distance(g))
            * Transmatrix::spin(self.direction_angle(back) - PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::C0;

    #[test]
    fn natural_geometries() {
        assert_eq!(RegularTiling::new(7, 3).natural_geometry(), Geometry::Hyperbolic);
        assert_eq!(RegularTiling::new(6, 3).natural_geometry(), Geometry::Euclidean);
        assert_eq!(RegularTiling::new(5, 3).natural_geometry(), Geometry::Spherical);
    }

    #[test]
    fn relative_places_neighbor_at_center_distance() {
        let t = RegularTiling::new(7, 3);
        let g = Geometry::Hyperbolic;
        let rel = t.relative(g, 2, 0);
        let d = g.hdist0(rel * C0);
        assert!((d - t.center_distance(g)).abs() < 1e-9);
    }
}
