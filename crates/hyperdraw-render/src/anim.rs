//! Per-cell pose animations in three independent layers.
//!
//! A record stores where the occupant is drawn relative to its cell. Every
//! frame the pose moves towards the cell center (or towards the attack point
//! and back) by a distance proportional to elapsed time and to the remaining
//! distance, so long and short moves take similar time.

use hashbrown::HashMap;
use hyperdraw_geom::{C0, Geometry, Transmatrix};
use hyperdraw_world::CellId;

/// Residual distances above this are a numerical blow-up.
const MAX_RESIDUAL: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimLayer {
    /// Large creatures and tentacles.
    Big,
    Small,
    /// Boat markers.
    Boat,
}

impl AnimLayer {
    pub const ALL: [AnimLayer; 3] = [AnimLayer::Big, AnimLayer::Small, AnimLayer::Boat];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            AnimLayer::Big => 0,
            AnimLayer::Small => 1,
            AnimLayer::Boat => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attack {
    Idle,
    /// Moving towards `attackat`.
    Lunge,
    /// Returning to the cell center, facing back.
    Recoil,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub ltick: u64,
    pub footphase: f64,
    pub wherenow: Transmatrix,
    pub attacking: Attack,
    pub attackat: Transmatrix,
    pub mirrored: bool,
}

impl Animation {
    fn started(ticks: u64, wherenow: Transmatrix) -> Self {
        Self {
            ltick: ticks,
            footphase: 0.0,
            wherenow,
            attacking: Attack::Idle,
            attackat: Transmatrix::IDENTITY,
            mirrored: false,
        }
    }

    /// Distance still to travel in the current phase.
    pub fn residual(&self, g: Geometry) -> f64 {
        match self.attacking {
            Attack::Lunge => g.hdist(self.attackat * C0, self.wherenow * C0),
            _ => g.hdist0(self.wherenow * C0),
        }
    }
}

/// What the caller multiplies into the occupant's transform. The transform
/// already turns the occupant along its path, so its own facing is not
/// applied on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub transform: Transmatrix,
    pub footphase: f64,
}

#[derive(Clone, Debug)]
struct Stacked {
    layer: AnimLayer,
    cell: CellId,
    anim: Animation,
}

#[derive(Default, Debug)]
pub struct Animations {
    layers: [HashMap<CellId, Animation>; 3],
    stack: Vec<Stacked>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, layer: AnimLayer, c: CellId) -> Option<&Animation> {
        self.layers[layer.index()].get(&c)
    }

    pub fn insert(&mut self, layer: AnimLayer, c: CellId, a: Animation) {
        self.layers[layer.index()].insert(c, a);
    }

    pub fn len(&self) -> usize {
        self.layers.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances the record of `c` to `ticks`. `None` when there is no record
    /// or it has just finished (the record is then removed).
    pub fn apply(&mut self, g: Geometry, layer: AnimLayer, c: CellId, ticks: u64, mspeed: f64) -> Option<Pose> {
        let map = &mut self.layers[layer.index()];
        let a = map.get_mut(&c)?;
        let td = ticks.saturating_sub(a.ltick) as f64;
        let mut aspd = td / 1000.0 * mspeed.exp();
        let r = loop {
            let r = a.residual(g);
            aspd *= 1.0 + r;
            if r < aspd || r.is_nan() || aspd.is_nan() || r > MAX_RESIDUAL {
                if a.attacking == Attack::Lunge {
                    a.attacking = Attack::Recoil;
                    continue;
                }
                log::trace!(target: "anim", "drop cell={} layer={:?} r={:.4}", c.0, layer, r);
                map.remove(&c);
                return None;
            }
            break r;
        };
        let wnow = match a.attacking {
            Attack::Lunge => (a.wherenow.inverse() * a.attackat) * C0,
            _ => a.wherenow.inverse() * C0,
        };
        a.wherenow = a.wherenow * Transmatrix::rspintox(wnow) * g.xpush(aspd);
        a.footphase += if a.attacking == Attack::Recoil { -aspd } else { aspd };
        a.ltick = ticks;
        if !a.wherenow.is_finite() {
            log::trace!(target: "anim", "drop cell={} layer={:?} r={:.4} non-finite", c.0, layer, r);
            map.remove(&c);
            return None;
        }
        let mut t = a.wherenow;
        if a.mirrored {
            t = t * Transmatrix::MIRROR_Y;
        }
        if a.attacking == Attack::Recoil {
            t = t * Transmatrix::pispin();
        }
        Some(Pose { transform: t, footphase: a.footphase })
    }

    /// The occupant of `src` has moved to `tgt`; `t` places `src` in the frame
    /// of `tgt`. A running record follows the occupant.
    pub fn movement(&mut self, layer: AnimLayer, src: CellId, tgt: CellId, t: Transmatrix, mirrored: bool, ticks: u64) {
        let map = &mut self.layers[layer.index()];
        let mut a = match map.remove(&src) {
            Some(mut a) => {
                a.wherenow = t * a.wherenow;
                a
            }
            None => Animation::started(ticks, t),
        };
        if mirrored {
            a.mirrored = !a.mirrored;
        }
        map.insert(tgt, a);
    }

    /// The occupant of `src` attacks the cell that `t` places in its frame.
    pub fn attack(&mut self, g: Geometry, layer: AnimLayer, src: CellId, t: Transmatrix, ticks: u64) {
        let target = t * C0;
        let a = self.layers[layer.index()].entry(src).or_insert_with(|| Animation::started(ticks, Transmatrix::IDENTITY));
        a.attacking = Attack::Lunge;
        a.attackat = Transmatrix::rspintox(target) * g.xpush(g.hdist0(target) / 3.0);
    }

    /// Like [`Animations::movement`], but the result is held back until
    /// [`Animations::commit`], so simultaneous moves do not pick up each
    /// other's records.
    pub fn ind_movement(&mut self, layer: AnimLayer, src: CellId, tgt: CellId, t: Transmatrix, mirrored: bool, ticks: u64) {
        let saved = self.layers[layer.index()].get(&tgt).copied();
        self.movement(layer, src, tgt, t, mirrored, ticks);
        let map = &mut self.layers[layer.index()];
        if let Some(anim) = map.remove(&tgt) {
            self.stack.push(Stacked { layer, cell: tgt, anim });
        }
        if let Some(s) = saved {
            map.insert(tgt, s);
        }
    }

    /// Installs the held-back records of `layer`.
    pub fn commit(&mut self, layer: AnimLayer) {
        let (mine, rest): (Vec<Stacked>, Vec<Stacked>) = self.stack.drain(..).partition(|s| s.layer == layer);
        self.stack = rest;
        for s in mine {
            self.layers[layer.index()].insert(s.cell, s.anim);
        }
    }

    /// The occupants of `a` and `b` swap places.
    pub fn replacement(&mut self, layer: AnimLayer, a: CellId, b: CellId, t_ab: Transmatrix, mirrored: bool, ticks: u64) {
        self.ind_movement(layer, a, b, t_ab, mirrored, ticks);
        self.ind_movement(layer, b, a, t_ab.inverse(), mirrored, ticks);
        self.commit(layer);
    }

    pub fn clear(&mut self) {
        for l in self.layers.iter_mut() {
            l.clear();
        }
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: Geometry = Geometry::Hyperbolic;

    fn moving(r: f64) -> Animations {
        let mut an = Animations::new();
        an.movement(AnimLayer::Small, CellId(1), CellId(2), G.xpush(r), false, 0);
        an
    }

    #[test]
    fn new_movement_starts_at_relative_placement() {
        let an = moving(0.5);
        let a = an.get(AnimLayer::Small, CellId(2)).unwrap();
        assert!(a.wherenow.max_diff(&G.xpush(0.5)) < 1e-12);
        assert_eq!(a.footphase, 0.0);
        assert!(an.get(AnimLayer::Small, CellId(1)).is_none());
    }

    #[test]
    fn residual_shrinks_until_dropped() {
        let mut an = moving(1.0);
        let mut last = f64::INFINITY;
        let mut ticks = 0;
        let mut steps = 0;
        while let Some(a) = an.get(AnimLayer::Small, CellId(2)) {
            let r = a.residual(G);
            assert!(r < last);
            last = r;
            ticks += 16;
            steps += 1;
            an.apply(G, AnimLayer::Small, CellId(2), ticks, 0.5);
            assert!(steps < 1000);
        }
        assert!(an.is_empty());
    }

    #[test]
    fn running_record_follows_the_occupant() {
        let mut an = moving(0.5);
        an.apply(G, AnimLayer::Small, CellId(2), 30, 0.5);
        an.movement(AnimLayer::Small, CellId(2), CellId(3), G.xpush(0.5), true, 30);
        let a = an.get(AnimLayer::Small, CellId(3)).unwrap();
        assert!(a.mirrored);
        assert_eq!(a.attacking, Attack::Idle);
        assert!(G.hdist0(a.wherenow * C0) > 0.5);
    }

    #[test]
    fn attack_lunges_then_recoils() {
        let mut an = Animations::new();
        an.attack(G, AnimLayer::Big, CellId(4), G.xpush(0.9), 0);
        let a = an.get(AnimLayer::Big, CellId(4)).unwrap();
        assert_eq!(a.attacking, Attack::Lunge);
        assert!((G.hdist0(a.attackat * C0) - 0.3).abs() < 1e-9);
        let mut ticks = 0;
        let mut saw_recoil = false;
        while an.get(AnimLayer::Big, CellId(4)).is_some() && ticks < 100_000 {
            ticks += 10;
            if let Some(p) = an.apply(G, AnimLayer::Big, CellId(4), ticks, 0.5) {
                assert!(p.transform.is_finite());
            }
            if let Some(a) = an.get(AnimLayer::Big, CellId(4)) {
                saw_recoil |= a.attacking == Attack::Recoil;
            }
        }
        assert!(saw_recoil);
        assert!(an.is_empty());
    }

    #[test]
    fn move_during_lunge_keeps_the_lunge() {
        let mut an = Animations::new();
        an.attack(G, AnimLayer::Small, CellId(1), G.xpush(0.9), 0);
        an.movement(AnimLayer::Small, CellId(1), CellId(2), G.xpush(0.5), false, 0);
        let a = an.get(AnimLayer::Small, CellId(2)).unwrap();
        assert_eq!(a.attacking, Attack::Lunge);
        assert!(a.wherenow.max_diff(&G.xpush(0.5)) < 1e-12);
    }

    #[test]
    fn blow_up_is_dropped() {
        let mut an = moving(11.0);
        assert!(an.apply(G, AnimLayer::Small, CellId(2), 16, 0.5).is_none());
        assert!(an.is_empty());
    }

    #[test]
    fn independent_moves_swap_cleanly() {
        let mut an = Animations::new();
        an.replacement(AnimLayer::Small, CellId(1), CellId(2), G.xpush(0.4), false, 0);
        let a = an.get(AnimLayer::Small, CellId(2)).unwrap();
        let b = an.get(AnimLayer::Small, CellId(1)).unwrap();
        assert!((G.hdist0(a.wherenow * C0) - 0.4).abs() < 1e-9);
        assert!((G.hdist0(b.wherenow * C0) - 0.4).abs() < 1e-9);
        an.clear();
        assert!(an.is_empty());
    }
}
