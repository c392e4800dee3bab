//! Adjacency and relative placement of cells.

use crate::cell::CellId;
use hyperdraw_geom::{Geometry, Hyperpoint, Transmatrix};

/// The tiling layer. Directions are counted counter-clockwise from 0.
pub trait CellGraph {
    fn geometry(&self) -> Geometry;

    fn cell_count(&self) -> usize;

    fn degree(&self, c: CellId) -> usize;

    /// `None` past the edge of a finite map.
    fn neighbor(&self, c: CellId, d: usize) -> Option<CellId>;

    /// The direction at `neighbor(c, d)` that points back at `c`.
    fn neighbor_spin(&self, c: CellId, d: usize) -> usize;

    /// Whether crossing edge `d` flips orientation.
    fn neighbor_mirrored(&self, c: CellId, d: usize) -> bool;

    /// Takes the frame of `neighbor(c, d)` into the frame of `c`.
    fn relative(&self, c: CellId, d: usize) -> Transmatrix;

    fn direction_angle(&self, c: CellId, d: usize) -> f64;

    /// Corner between directions `i` and `i + 1`, in the frame of `c`.
    fn corner(&self, c: CellId, i: usize) -> Hyperpoint;

    /// For a cell showing a mirror image: the reflected cell and the transform
    /// placing it, relative to `c`.
    fn reflect(&self, c: CellId) -> Option<(CellId, Transmatrix)>;
}
