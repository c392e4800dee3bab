//! Floor polygons, their level copies, side panels and caps, per style and degree.

use crate::buffer::ShapeId;
use crate::builder::MeshBuilder;
use crate::constants::SIDE_STEPS;
use crate::ppr::{Ppr, SidePar};
use hyperdraw_geom::{Hyperpoint, Transmatrix};
use serde::Deserialize;
use std::f64::consts::PI;

/// Outline families a land can choose for its floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorStyle {
    /// The plain cell polygon.
    Full,
    Star,
    Cloud,
    Cross,
    Cave,
    Feather,
    Troll,
    Power,
    Desert,
    Lava,
}

impl FloorStyle {
    pub const ALL: [FloorStyle; 10] = [
        FloorStyle::Full,
        FloorStyle::Star,
        FloorStyle::Cloud,
        FloorStyle::Cross,
        FloorStyle::Cave,
        FloorStyle::Feather,
        FloorStyle::Troll,
        FloorStyle::Power,
        FloorStyle::Desert,
        FloorStyle::Lava,
    ];

    /// Radial factors of the corners and of the edge midpoints; `None` means
    /// the edge midpoints are not part of the outline.
    fn factors(self) -> (f64, Option<f64>) {
        match self {
            FloorStyle::Full => (1.0, None),
            FloorStyle::Star => (1.0, Some(0.6)),
            FloorStyle::Cloud => (0.85, Some(1.0)),
            FloorStyle::Cross => (0.4, Some(1.0)),
            FloorStyle::Cave => (0.95, Some(0.9)),
            FloorStyle::Feather => (1.0, Some(0.8)),
            FloorStyle::Troll => (0.75, Some(0.95)),
            FloorStyle::Power => (1.0, Some(0.5)),
            FloorStyle::Desert => (0.9, Some(1.0)),
            FloorStyle::Lava => (1.0, Some(0.85)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloorKey {
    pub style: FloorStyle,
    pub degree: u32,
}

/// Everything drawn for one floor style on cells of one degree.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorShape {
    pub style: FloorStyle,
    pub degree: u32,
    /// The floor outline at the floor level.
    pub b: ShapeId,
    pub shadow: ShapeId,
    /// Outline copies at each band's cap, indexed by [`SidePar::index`].
    pub levels: Vec<ShapeId>,
    /// Side panels, `side[sidepar][edge]`.
    pub side: Vec<Vec<ShapeId>>,
    /// Triangle fans over the cell at the floor and at the wall top.
    pub cone: [ShapeId; 2],
}

fn side_prio(sp: SidePar) -> Ppr {
    match sp {
        SidePar::Lake => Ppr::LAKEWALL,
        SidePar::Ltob => Ppr::INLAKEWALL,
        SidePar::Btoi => Ppr::BELOWBOTTOM,
        _ => Ppr::WALL,
    }
}

impl MeshBuilder {
    /// Corner `i` of a regular `degree`-gon with this tiling's circumradius.
    pub fn floor_corner(&self, degree: u32, i: usize) -> Hyperpoint {
        let d = degree.max(3) as f64;
        let a = 2.0 * PI * i as f64 / d + PI / d;
        self.geom.xspinpush0(-a, self.tiling.circumradius(self.geom))
    }

    fn floor_outline(&self, style: FloorStyle, degree: u32) -> Vec<Hyperpoint> {
        let g = self.geom;
        let (cf, mf) = style.factors();
        let n = degree.max(3) as usize;
        let mut out = Vec::with_capacity(2 * n);
        for i in 0..n {
            let c = self.floor_corner(degree, i);
            out.push(g.xspinpush0(-c.angle_xy(), g.hdist0(c) * cf));
            if let Some(mf) = mf {
                let m = g.mid(c, self.floor_corner(degree, i + 1));
                out.push(g.xspinpush0(-m.angle_xy(), g.hdist0(m) * mf));
            }
        }
        out
    }

    fn push_loop_at(&mut self, prio: Ppr, loop_pts: &[Hyperpoint], fac: f64) -> ShapeId {
        let id = self.new_shape(prio);
        let (g, p) = (self.geom, self.params.clone());
        for &h in loop_pts.iter().chain(loop_pts.first()) {
            self.push(p.mscale_point(g, h, fac));
        }
        id
    }

    fn push_side_panel(&mut self, sp: SidePar, a: Hyperpoint, b: Hyperpoint) -> ShapeId {
        let g = self.geom;
        let p = self.params.clone();
        let (lo, hi) = self.lv.band(sp);
        let id = self.new_shape(side_prio(sp));
        let along = |t: f64| g.normalize(a * (1.0 - t) + b * t);
        let steps = SIDE_STEPS;
        for k in 0..=steps {
            self.push(p.mscale_point(g, along(k as f64 / steps as f64), lo));
        }
        for k in (0..=steps).rev() {
            self.push(p.mscale_point(g, along(k as f64 / steps as f64), hi));
        }
        self.push(p.mscale_point(g, a, lo));
        id
    }

    fn push_fan(&mut self, prio: Ppr, ring: &[Hyperpoint], fac: f64) -> ShapeId {
        let g = self.geom;
        let p = self.params.clone();
        let id = self.new_shape(prio);
        self.set_triangles();
        let center = p.mscale_point(g, hyperdraw_geom::C0, fac);
        let n = ring.len();
        for i in 0..n {
            self.push(p.mscale_point(g, ring[i], fac));
            self.push(p.mscale_point(g, ring[(i + 1) % n], fac));
            self.push(center);
        }
        id
    }

    /// Builds every [`FloorStyle`] for each cell degree in `degrees`. Side
    /// panels and caps depend only on the degree and are shared by the styles.
    pub fn make_floor_shapes(&mut self, degrees: &[u32]) {
        for &degree in degrees {
            let n = degree.max(3) as usize;
            let corners: Vec<Hyperpoint> = (0..n).map(|i| self.floor_corner(degree, i)).collect();
            let mut side: Vec<Vec<ShapeId>> = Vec::with_capacity(SidePar::ALL.len());
            for sp in SidePar::ALL {
                let mut row = Vec::with_capacity(n);
                for i in 0..n {
                    row.push(self.push_side_panel(sp, corners[i], corners[(i + 1) % n]));
                }
                side.push(row);
            }
            let (floor, wall) = (self.lv.floor, self.lv.wall);
            let cone = [self.push_fan(Ppr::FLOOR, &corners, floor), self.push_fan(Ppr::WALL3, &corners, wall)];

            for style in FloorStyle::ALL {
                let outline = self.floor_outline(style, degree);
                let b = self.push_loop_at(Ppr::FLOOR, &outline, floor);
                let shrink = Transmatrix::diag(0.9, 0.9, 1.0, 1.0);
                let shadow_pts: Vec<Hyperpoint> = outline.iter().map(|&h| self.geom.normalize(shrink * h)).collect();
                let shadow = self.push_loop_at(Ppr::WALLSHADOW, &shadow_pts, floor);
                let mut levels = Vec::with_capacity(SidePar::ALL.len());
                for sp in SidePar::ALL {
                    let cap = self.lv.cap(sp);
                    levels.push(self.push_loop_at(Ppr::FLOOR, &outline, cap));
                }
                let key = FloorKey { style, degree };
                self.floors.insert(key, FloorShape { style, degree, b, shadow, levels, side: side.clone(), cone });
            }
        }
        log::debug!(target: "shapes", "floor shapes degrees={:?} styles={}", degrees, FloorStyle::ALL.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ModelParams;
    use hyperdraw_geom::{Geometry, RegularTiling};

    fn built(solid: bool) -> MeshBuilder {
        let p = ModelParams { solid, ..ModelParams::default() };
        let mut mb = MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), p);
        mb.make_floor_shapes(&[7]);
        mb
    }

    #[test]
    fn full_floor_is_closed_heptagon() {
        let mb = built(false);
        let fs = &mb.floors[&FloorKey { style: FloorStyle::Full, degree: 7 }];
        let pts = mb.points_of(fs.b);
        assert_eq!(pts.len(), 8);
        assert_eq!(pts.first(), pts.last());
        let r = mb.tiling.circumradius(mb.geom);
        assert!((mb.geom.hdist0(pts[0]) - r).abs() < 1e-9);
    }

    #[test]
    fn starred_floor_has_midpoints() {
        let mb = built(false);
        let fs = &mb.floors[&FloorKey { style: FloorStyle::Star, degree: 7 }];
        assert_eq!(mb.points_of(fs.b).len(), 15);
    }

    #[test]
    fn side_panels_per_band_and_edge() {
        let mb = built(true);
        let fs = &mb.floors[&FloorKey { style: FloorStyle::Full, degree: 7 }];
        assert_eq!(fs.side.len(), SidePar::ALL.len());
        assert!(fs.side.iter().all(|row| row.len() == 7));
        let panel = mb.points_of(fs.side[SidePar::Wall.index()][0]);
        assert_eq!(panel.len(), 2 * (SIDE_STEPS + 1) + 1);
        assert_eq!(mb.shape(fs.side[SidePar::Lake.index()][3]).unwrap().prio, Ppr::LAKEWALL);
    }

    #[test]
    fn panel_spans_its_band() {
        let mb = built(true);
        let g = mb.geom;
        let fs = &mb.floors[&FloorKey { style: FloorStyle::Full, degree: 7 }];
        let panel = mb.points_of(fs.side[SidePar::Wall.index()][2]);
        let (lo, hi) = mb.lv.band(SidePar::Wall);
        assert!((g.height_of(panel[0]) - lo).abs() < 1e-9);
        assert!((g.height_of(panel[SIDE_STEPS + 1]) - hi).abs() < 1e-9);
    }

    #[test]
    fn cone_is_fan_of_triangles() {
        let mb = built(false);
        let fs = &mb.floors[&FloorKey { style: FloorStyle::Cave, degree: 7 }];
        let sh = mb.shape(fs.cone[1]).unwrap();
        assert!(sh.triangles);
        assert_eq!(sh.len(), 21);
    }
}
