//! Homogeneous point and transform algebra for hyperbolic, spherical and Euclidean space.
#![forbid(unsafe_code)]

mod geometry;
mod matrix;
mod point;
pub mod tiling;

pub use geometry::Geometry;
pub use matrix::Transmatrix;
pub use point::{C0, HYPC, Hyperpoint};
pub use tiling::RegularTiling;

/// One degree in radians.
pub const DEGREE: f64 = std::f64::consts::PI / 180.0;
