//! The shared point buffer and the shape ranges that index into it.

use crate::ppr::Ppr;
use core::ops::Range;
use hyperdraw_geom::Hyperpoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

impl ShapeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-vertex shading factors for a lit shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureInfo {
    pub factors: Vec<f32>,
}

/// A half-open range `[s, e)` of the point buffer plus draw metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub s: usize,
    pub e: usize,
    /// Points are consumed three at a time as triangles; otherwise the range
    /// is a closed outline.
    pub triangles: bool,
    pub shadow: Option<(usize, usize)>,
    pub texture: Option<TextureInfo>,
    pub prio: Ppr,
    /// Angular steps of a surface of revolution; zero for other shapes.
    pub rev_steps: u32,
}

impl Shape {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.s..self.e
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.e.saturating_sub(self.s)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Append-only store of homogeneous points.
#[derive(Clone, Debug, Default)]
pub struct PointBuffer {
    pts: Vec<Hyperpoint>,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    #[inline]
    pub fn push(&mut self, h: Hyperpoint) {
        self.pts.push(h);
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<Hyperpoint> {
        self.pts.get(i).copied()
    }

    /// Points of `r`, clamped to the buffer.
    pub fn slice(&self, r: Range<usize>) -> &[Hyperpoint] {
        let e = r.end.min(self.pts.len());
        let s = r.start.min(e);
        &self.pts[s..e]
    }

    #[inline]
    pub fn as_slice(&self) -> &[Hyperpoint] {
        &self.pts
    }

    /// Rewrites the points in `r` in place while a shape is still being built.
    pub(crate) fn map_range(&mut self, r: Range<usize>, mut f: impl FnMut(Hyperpoint) -> Hyperpoint) {
        let e = r.end.min(self.pts.len());
        let s = r.start.min(e);
        for h in &mut self.pts[s..e] {
            *h = f(*h);
        }
    }

    /// Appends a copy of `r`, returning the new range.
    pub(crate) fn duplicate(&mut self, r: Range<usize>) -> Range<usize> {
        let e = r.end.min(self.pts.len());
        let s = r.start.min(e);
        let start = self.pts.len();
        self.pts.extend_from_within(s..e);
        start..self.pts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::C0;

    #[test]
    fn duplicate_appends_at_tail() {
        let mut b = PointBuffer::new();
        b.push(C0);
        b.push(Hyperpoint::new(0.1, 0.0, 0.0, 1.0));
        let r = b.duplicate(0..2);
        assert_eq!(r, 2..4);
        assert_eq!(b.slice(r), &b.as_slice()[0..2]);
    }

    #[test]
    fn slice_clamps() {
        let b = PointBuffer::new();
        assert!(b.slice(3..7).is_empty());
    }
}
