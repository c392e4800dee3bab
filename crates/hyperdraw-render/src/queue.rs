//! Draw records and the sinks that collect them.
//!
//! Nothing here rasterizes. A frame fills a [`DrawQueue`], sorts it by
//! priority (stable, so records of equal priority keep their queue order)
//! and hands it to whatever [`DrawSink`] the caller owns.

use hyperdraw_geom::{Hyperpoint, Transmatrix};
use hyperdraw_shapes::{Ppr, ShapeId};
use hyperdraw_world::CellId;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawRecord {
    /// A catalog shape under a transform.
    Poly { shape: ShapeId, transform: Transmatrix, color: u32, prio: Ppr },
    Line { from: Hyperpoint, to: Hyperpoint, color: u32, prio: Ppr },
    /// Fallback text for anything without a shape.
    Glyph { at: Hyperpoint, glyph: char, color: u32, size: f64, prio: Ppr },
    Circle { center: Hyperpoint, radius: f64, color: u32, prio: Ppr },
    /// A cell's contribution to the sky dome.
    Sky { cell: CellId, transform: Transmatrix, color: u32 },
    /// The aura fan: for each ring, a point and its color per angular bucket.
    Aura { rings: Vec<Vec<(Hyperpoint, u32)>> },
}

impl DrawRecord {
    pub fn prio(&self) -> Ppr {
        match self {
            DrawRecord::Poly { prio, .. }
            | DrawRecord::Line { prio, .. }
            | DrawRecord::Glyph { prio, .. }
            | DrawRecord::Circle { prio, .. } => *prio,
            DrawRecord::Sky { .. } => Ppr::SKY,
            DrawRecord::Aura { .. } => Ppr::OUTCIRCLE,
        }
    }

    pub fn is_poly(&self) -> bool {
        matches!(self, DrawRecord::Poly { .. })
    }
}

pub trait DrawSink {
    fn push(&mut self, rec: DrawRecord);
}

impl DrawSink for Vec<DrawRecord> {
    #[inline]
    fn push(&mut self, rec: DrawRecord) {
        Vec::push(self, rec);
    }
}

/// Position in a [`DrawQueue`], taken before emitting something that may be
/// rewritten afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

#[derive(Default, Debug)]
pub struct DrawQueue {
    records: Vec<DrawRecord>,
    /// Cell each record was drawn for, parallel to `records` until sorting.
    owners: Vec<Option<CellId>>,
    owner: Option<CellId>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        Mark(self.records.len())
    }

    /// Records queued since `m`, for in-place rewriting.
    pub fn since(&mut self, m: Mark) -> &mut [DrawRecord] {
        let s = m.0.min(self.records.len());
        &mut self.records[s..]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.owners.clear();
        self.owner = None;
    }

    /// Records pushed from now on belong to `owner`.
    #[inline]
    pub fn set_owner(&mut self, owner: Option<CellId>) {
        self.owner = owner;
    }

    #[inline]
    pub fn owner(&self) -> Option<CellId> {
        self.owner
    }

    /// Drops every record drawn for `c`. Returns how many went.
    pub fn forget(&mut self, c: CellId) -> usize {
        let before = self.records.len();
        let mut keep = self.owners.iter().map(|o| *o != Some(c));
        self.records.retain(|_| keep.next().unwrap_or(true));
        self.owners.retain(|o| *o != Some(c));
        before - self.records.len()
    }

    /// Stable sort by priority. Ownership is dropped.
    pub fn sort(&mut self) {
        self.records.sort_by_key(DrawRecord::prio);
        self.owners.clear();
    }

    /// Moves every record into `sink`, in queue order.
    pub fn drain_into(&mut self, sink: &mut impl DrawSink) {
        self.owners.clear();
        for rec in self.records.drain(..) {
            sink.push(rec);
        }
    }

    pub fn into_records(self) -> Vec<DrawRecord> {
        self.records
    }
}

impl DrawSink for DrawQueue {
    #[inline]
    fn push(&mut self, rec: DrawRecord) {
        self.records.push(rec);
        self.owners.push(self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::C0;

    fn circle(prio: i32, radius: f64) -> DrawRecord {
        DrawRecord::Circle { center: C0, radius, color: 0, prio: Ppr(prio) }
    }

    #[test]
    fn sort_is_stable_within_priority() {
        let mut q = DrawQueue::new();
        q.push(circle(5, 1.0));
        q.push(circle(3, 2.0));
        q.push(circle(5, 3.0));
        q.push(circle(3, 4.0));
        q.sort();
        let radii: Vec<f64> = q
            .records()
            .iter()
            .map(|r| match r {
                DrawRecord::Circle { radius, .. } => *radius,
                _ => -1.0,
            })
            .collect();
        assert_eq!(radii, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn since_covers_only_new_records() {
        let mut q = DrawQueue::new();
        q.push(circle(1, 1.0));
        let m = q.mark();
        q.push(circle(2, 1.0));
        q.push(circle(3, 1.0));
        assert_eq!(q.since(m).len(), 2);
        for r in q.since(m) {
            if let DrawRecord::Circle { prio, .. } = r {
                *prio = Ppr(0);
            }
        }
        q.sort();
        assert_eq!(q.records()[2].prio(), Ppr(1));
    }

    #[test]
    fn forget_drops_only_the_owners_records() {
        let mut q = DrawQueue::new();
        q.push(circle(1, 1.0));
        q.set_owner(Some(CellId(4)));
        q.push(circle(2, 2.0));
        q.push(circle(3, 3.0));
        q.set_owner(Some(CellId(5)));
        q.push(circle(4, 4.0));
        assert_eq!(q.forget(CellId(4)), 2);
        let prios: Vec<Ppr> = q.records().iter().map(DrawRecord::prio).collect();
        assert_eq!(prios, vec![Ppr(1), Ppr(4)]);
        assert_eq!(q.forget(CellId(4)), 0);
        assert_eq!(q.forget(CellId(5)), 1);
    }

    #[test]
    fn drains_into_vec_sink() {
        let mut q = DrawQueue::new();
        q.push(circle(1, 1.0));
        let mut out: Vec<DrawRecord> = Vec::new();
        q.drain_into(&mut out);
        assert!(q.is_empty());
        assert_eq!(out.len(), 1);
    }
}
