//! Floors and monsters falling into chasms.
//!
//! A fall is recorded when it starts; every frame until it ends the cell's
//! old contents are drawn again and pushed down by the distance fallen.

use crate::queue::DrawRecord;
use hashbrown::HashMap;
use hyperdraw_geom::{Geometry, Transmatrix};
use hyperdraw_shapes::{Ppr, ShapeCatalog};
use hyperdraw_world::{CellId, Monster, Wall};

/// Milliseconds a fall is shown for.
pub fn fall_duration(g: Geometry) -> u64 {
    match g {
        Geometry::Hyperbolic => 1500,
        Geometry::Euclidean | Geometry::Spherical => 20000,
    }
}

/// Levels fallen after `t` milliseconds.
pub fn fall_distance(t: u64) -> f64 {
    let t = t as f64;
    t * t / 1_000_000.0 + t / 1000.0
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fall {
    /// When the floor started falling, with the wall it carried.
    pub t_floor: Option<u64>,
    pub wall: Wall,
    /// When the monster started falling.
    pub t_mon: Option<u64>,
    pub monster: Monster,
}

#[derive(Clone, Debug, Default)]
pub struct Falls {
    map: HashMap<CellId, Fall>,
}

impl Falls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floor(&mut self, c: CellId, wall: Wall, monster: Monster, ticks: u64) {
        let fa = self.map.entry(c).or_default();
        fa.t_floor = Some(ticks);
        fa.wall = wall;
        fa.monster = monster;
    }

    pub fn monster(&mut self, c: CellId, monster: Monster, ticks: u64) {
        let fa = self.map.entry(c).or_default();
        fa.t_mon = Some(ticks);
        fa.monster = monster;
    }

    pub fn get(&self, c: CellId) -> Option<&Fall> {
        self.map.get(&c)
    }

    /// The parts of the fall at `c` still in progress, as milliseconds since
    /// each started. Forgets the fall once both parts are over.
    pub fn progress(&mut self, c: CellId, ticks: u64, maxtime: u64) -> Option<(Option<u64>, Option<u64>, Fall)> {
        let fa = *self.map.get(&c)?;
        let live = |t: Option<u64>| t.map(|t| ticks.saturating_sub(t)).filter(|&t| t <= maxtime);
        let (tf, tm) = (live(fa.t_floor), live(fa.t_mon));
        if tf.is_none() && tm.is_none() {
            self.map.remove(&c);
            log::trace!(target: "anim", "fall at {:?} finished", c);
            return None;
        }
        Some((tf, tm, fa))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// How `pushdown` treats the records it moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pushdown {
    pub down: f64,
    /// Shrink the xy extent with the apparent scale of the new level.
    pub rezoom: bool,
    /// Move the records to the falling priorities of the band they end in.
    pub repriority: bool,
    /// Records falling below the lake bottom stay visible (chasms).
    pub keep_below_bottom: bool,
}

/// Factor of the level a flat-display transform draws at: levels scale the
/// spatial rows of an isometry, which leaves its first column's norm at 1.
pub fn flat_factor(g: Geometry, t: &Transmatrix) -> Option<f64> {
    let xyz = t[0][0] * t[0][0] + t[1][0] * t[1][0] + t[2][0] * t[2][0];
    let f2 = (1.0 - g.curvature() * t[3][0] * t[3][0]) / xyz;
    (f2.is_finite() && f2 > 0.0).then(|| f2.sqrt())
}

fn scale_rows(t: &mut Transmatrix, fac: f64) {
    for i in 0..3 {
        for j in 0..4 {
            t[i][j] *= fac;
        }
    }
}

/// Moves the polygons in `records` down by `pd.down` levels. Other records
/// are left alone.
pub fn pushdown(records: &mut [DrawRecord], cat: &ShapeCatalog, pd: Pushdown) {
    let g = cat.geom();
    let p = cat.params();
    let wh = p.wall_height;
    for rec in records.iter_mut() {
        let DrawRecord::Poly { transform, color, prio, .. } = rec else { continue };
        if p.solid {
            *transform = *transform * g.zpush(-pd.down);
            continue;
        }
        let Some(z) = flat_factor(g, transform) else { continue };
        let lev = p.factor_to_lev(g, z);
        let nlev = lev - pd.down;
        let xyscale = if pd.rezoom { p.scale_at_lev(g, lev) / p.scale_at_lev(g, nlev) } else { 1.0 };
        let zscale = p.lev_to_factor(g, nlev) / z;
        if !(zscale * xyscale).is_finite() {
            continue;
        }
        scale_rows(transform, zscale * xyscale);
        if !pd.repriority {
            continue;
        }
        if nlev < -wh * p.lake_bottom - 1e-3 {
            *prio = Ppr::BELOWBOTTOM_FALLANIM;
            if !pd.keep_below_bottom {
                *color = 0;
            }
        } else if nlev < -wh * p.lake_top - 1e-3 {
            *prio = Ppr::INLAKEWALL_FALLANIM;
        } else if nlev < 0.0 {
            *prio = Ppr::LAKEWALL_FALLANIM;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::{C0, RegularTiling};
    use hyperdraw_shapes::{ModelParams, ShapeId, SilhouetteLibrary};

    fn catalog() -> ShapeCatalog {
        let t = RegularTiling::new(7, 3);
        ShapeCatalog::build(Geometry::Hyperbolic, t, ModelParams::default(), &SilhouetteLibrary::builtin(), &[7])
    }

    #[test]
    fn distance_grows_quadratically() {
        assert_eq!(fall_distance(0), 0.0);
        assert!((fall_distance(1000) - 2.0).abs() < 1e-12);
        assert!(fall_distance(1500) > fall_distance(1000));
    }

    #[test]
    fn fall_expires() {
        let mut f = Falls::new();
        f.floor(CellId(4), Wall::Stone, Monster::None, 100);
        let (tf, tm, fa) = f.progress(CellId(4), 600, 1500).unwrap();
        assert_eq!((tf, tm, fa.wall), (Some(500), None, Wall::Stone));
        assert!(f.progress(CellId(4), 5000, 1500).is_none());
        assert!(f.is_empty());
    }

    #[test]
    fn factor_is_recovered() {
        let g = Geometry::Hyperbolic;
        let cat = catalog();
        let v = g.xpush(0.7) * Transmatrix::spin(0.3);
        let t = cat.params().mscale(g, &v, 0.8);
        assert!((flat_factor(g, &t).unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn pushed_floor_sinks_into_the_chasm() {
        let cat = catalog();
        let mut recs = vec![
            DrawRecord::Poly { shape: ShapeId(0), transform: Transmatrix::IDENTITY, color: 0xFFFF_FFFF, prio: Ppr::FLOOR },
            DrawRecord::Line { from: C0, to: C0, color: 1, prio: Ppr::LINE },
        ];
        let pd = Pushdown { down: 0.01, rezoom: true, repriority: true, keep_below_bottom: true };
        pushdown(&mut recs, &cat, pd);
        let DrawRecord::Poly { transform, prio, .. } = recs[0] else { panic!() };
        assert_eq!(prio, Ppr::LAKEWALL_FALLANIM);
        assert!(transform[0][0] < 1.0);
        assert_eq!(recs[1].prio(), Ppr::LINE);

        let pd = Pushdown { down: 50.0, rezoom: true, repriority: true, keep_below_bottom: false };
        pushdown(&mut recs, &cat, pd);
        let DrawRecord::Poly { color, prio, .. } = recs[0] else { panic!() };
        assert_eq!(prio, Ppr::BELOWBOTTOM_FALLANIM);
        assert_eq!(color, 0);
    }
}
