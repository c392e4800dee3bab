//! Cell grid lines and the radar of the solid display.

use crate::color::darkena;
use crate::queue::{DrawRecord, DrawSink};
use hyperdraw_geom::{C0, Geometry, Hyperpoint, Transmatrix};
use hyperdraw_shapes::Ppr;
use hyperdraw_world::{CellGraph, CellId, Item, Land, LandRules};

pub const STD_GRID: u32 = 0x2020_20FF;

/// Color of the grid line between `c1` and `c2`; `darken` halves the
/// default color that many times.
pub fn grid_color<W: CellGraph + LandRules>(world: &W, c1: CellId, c2: Option<CellId>, darken: u32) -> u32 {
    let Some(c2) = c2 else {
        return (0x20_2020 >> darken.min(24)) << 8 | 0xFF;
    };
    let rd1 = world.rose_dist(c1).unwrap_or(0);
    let rd2 = world.rose_dist(c2).unwrap_or(0);
    if rd1 != rd2 {
        match rd1 as u32 + rd2 as u32 {
            1 => return darkena(0x80_2020, 0, 0xFF),
            2 => return darkena(0xF0_2020, 0, 0xFF),
            3 => return darkena(0xC0_2020, 0, 0xFF),
            _ => {}
        }
    }
    if world.chasm_graph(c1) != world.chasm_graph(c2) {
        return darkena(0x80_8080, 0, 0xFF);
    }
    if let (Some(a), Some(b)) = (world.cell(c1), world.cell(c2)) {
        if a.land == Land::Alchemist && b.land == Land::Alchemist && a.wall != b.wall && a.item == Item::None && b.item == Item::None {
            return darkena(0xC0_20C0, 0, 0xFF);
        }
    }
    if darken == 0 { STD_GRID } else { darkena(0x20_2020, 0, 0xFF) }
}

/// Edges of `c` that this cell draws: each shared edge is drawn once, by the
/// cell with the larger id. Yields `(direction, from corner, to corner)`.
fn owned_edges<W: CellGraph>(world: &W, c: CellId) -> impl Iterator<Item = (usize, Hyperpoint, Hyperpoint)> + '_ {
    let n = world.degree(c);
    (0..n).filter_map(move |t| {
        let other = world.neighbor(c, t)?;
        (other < c).then(|| (t, world.corner(c, (t + n - 1) % n), world.corner(c, t)))
    })
}

pub fn draw_grid_at<W: CellGraph + LandRules>(sink: &mut impl DrawSink, world: &W, c: CellId, v: &Transmatrix, darken: u32) {
    for (t, a, b) in owned_edges(world, c) {
        let color = grid_color(world, c, world.neighbor(c, t), darken);
        sink.push(DrawRecord::Line { from: *v * a, to: *v * b, color, prio: Ppr::LINE });
    }
}

/// Projects a point onto the radar disk. `None` when it falls outside the
/// radar range or does not project to a finite point.
pub fn make_radar(g: Geometry, h: Hyperpoint, range: f64, scalefactor: f64) -> Option<Hyperpoint> {
    let d = g.hdist0(h);
    let mut r = h;
    match g {
        Geometry::Hyperbolic => {
            for a in 0..3 {
                r[a] = h[a] / (1.0 + h[3]);
            }
        }
        Geometry::Spherical => r[2] = h[3],
        Geometry::Euclidean => {
            if d > range {
                return None;
            }
            let len = h.hypot3();
            if d > 0.0 && len > 0.0 {
                let k = d / (range + scalefactor / 4.0) / len;
                for a in 0..3 {
                    r[a] = h[a] * k;
                }
            }
        }
    }
    r.is_finite().then_some(r)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarPoint {
    pub at: Hyperpoint,
    pub glyph: char,
    pub color: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarLine {
    pub from: Hyperpoint,
    pub to: Hyperpoint,
    pub color: u32,
}

/// Radar contents gathered during one frame.
#[derive(Clone, Debug, Default)]
pub struct Radar {
    pub points: Vec<RadarPoint>,
    pub lines: Vec<RadarLine>,
    /// Applied to every point before projection.
    pub transform: Option<Transmatrix>,
}

impl Radar {
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
    }

    fn project(&self, g: Geometry, h: Hyperpoint, range: f64, sf: f64) -> Option<Hyperpoint> {
        let h = match self.transform {
            Some(t) => t * h,
            None => h,
        };
        make_radar(g, h, range, sf)
    }

    pub fn add_point(&mut self, g: Geometry, v: &Transmatrix, glyph: char, color: u32, range: f64, sf: f64) {
        if let Some(at) = self.project(g, *v * C0, range, sf) {
            self.points.push(RadarPoint { at, glyph, color });
        }
    }

    pub fn add_line(&mut self, g: Geometry, a: Hyperpoint, b: Hyperpoint, color: u32, range: f64, sf: f64) {
        if let (Some(from), Some(to)) = (self.project(g, a, range, sf), self.project(g, b, range, sf)) {
            self.lines.push(RadarLine { from, to, color });
        }
    }
}

/// The grid of `c` on the radar.
pub fn radar_grid<W: CellGraph + LandRules>(radar: &mut Radar, world: &W, c: CellId, v: &Transmatrix, range: f64, sf: f64) {
    let g = world.geometry();
    for (t, a, b) in owned_edges(world, c) {
        let color = grid_color(world, c, world.neighbor(c, t), 0);
        radar.add_line(g, *v * a, *v * b, color, range, sf);
    }
}
