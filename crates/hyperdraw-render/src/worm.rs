//! Deferred drawing of multi-cell bodies.
//!
//! Traversal may reach the head before the tail, but segments must be painted
//! tail first. Segment draws are parked by their distance from the tail and
//! replayed in increasing distance once traversal ends.

use crate::queue::{DrawRecord, DrawSink};
use hyperdraw_world::{CellGraph, CellId, LandRules};

/// Longest body followed when measuring the distance to the tail.
const MAX_BODY: u32 = 1000;

/// A parked draw and the segment cell it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentCmd {
    pub cell: CellId,
    pub rec: DrawRecord,
}

#[derive(Default, Debug)]
pub struct WormQueue {
    arena: Vec<SegmentCmd>,
    /// `slots[d]` indexes into `arena`, in insertion order.
    slots: Vec<Vec<usize>>,
}

/// Steps from `c` to the last segment of its body, following each segment's
/// pointer towards the tail.
pub fn tail_dist<W: CellGraph + LandRules>(world: &W, c: CellId) -> u32 {
    let mut cur = c;
    let mut n = 0;
    while n < MAX_BODY {
        let Some(cd) = world.cell(cur) else { break };
        if !cd.monster.is_segmented() {
            break;
        }
        let Some(dir) = cd.mondir else { break };
        let Some(next) = world.neighbor(cur, dir as usize) else { break };
        match world.cell(next) {
            Some(nd) if nd.monster.is_segmented() => {}
            _ => break,
        }
        cur = next;
        n += 1;
    }
    n
}

impl WormQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dist: u32, cmd: SegmentCmd) {
        let d = dist as usize;
        if self.slots.len() <= d {
            self.slots.resize_with(d + 1, Vec::new);
        }
        self.slots[d].push(self.arena.len());
        self.arena.push(cmd);
    }

    /// Parked draws still to be flushed.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unparks every draw of segment cell `c`.
    pub fn forget(&mut self, c: CellId) {
        let WormQueue { arena, slots } = self;
        for slot in slots.iter_mut() {
            slot.retain(|&i| arena.get(i).is_some_and(|cmd| cmd.cell != c));
        }
    }

    /// Replays every parked draw into `sink`, nearest the tail first, and
    /// empties the queue. Returns the cells in the order they were flushed.
    pub fn flush(&mut self, sink: &mut impl DrawSink) -> Vec<CellId> {
        let mut order = Vec::new();
        let mut arena: Vec<Option<SegmentCmd>> = self.arena.drain(..).map(Some).collect();
        for slot in self.slots.drain(..) {
            for i in slot {
                if let Some(cmd) = arena.get_mut(i).and_then(Option::take) {
                    if order.last() != Some(&cmd.cell) {
                        order.push(cmd.cell);
                    }
                    sink.push(cmd.rec);
                }
            }
        }
        order
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::C0;
    use hyperdraw_shapes::Ppr;

    fn cmd(c: u32) -> SegmentCmd {
        SegmentCmd { cell: CellId(c), rec: DrawRecord::Circle { center: C0, radius: c as f64, color: 0, prio: Ppr::DEFAULT } }
    }

    #[test]
    fn flush_goes_by_distance_then_insertion() {
        let mut q = WormQueue::new();
        q.add(2, cmd(10));
        q.add(0, cmd(30));
        q.add(1, cmd(20));
        q.add(0, cmd(31));
        let mut out: Vec<DrawRecord> = Vec::new();
        let order = q.flush(&mut out);
        assert_eq!(order, vec![CellId(30), CellId(31), CellId(20), CellId(10)]);
        assert_eq!(out.len(), 4);
        assert!(q.is_empty());
        assert!(q.flush(&mut out).is_empty());
    }

    #[test]
    fn forgotten_segments_are_not_flushed() {
        let mut q = WormQueue::new();
        q.add(0, cmd(1));
        q.add(1, cmd(2));
        q.add(1, cmd(1));
        q.forget(CellId(1));
        assert_eq!(q.len(), 1);
        let mut out: Vec<DrawRecord> = Vec::new();
        assert_eq!(q.flush(&mut out), vec![CellId(2)]);
    }
}
