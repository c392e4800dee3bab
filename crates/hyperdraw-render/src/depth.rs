//! Lakes and chasms: surfaces below the floor and the panels down to them.
//!
//! Only the deeper of two adjacent cells draws the panels between them, so a
//! seam between cells of the same depth class is drawn by neither.

use crate::color::darkena;
use crate::draw::CellCtx;
use crate::queue::{DrawRecord, DrawSink};
use crate::walls::place_sidewall;
use hyperdraw_shapes::{Ppr, SidePar};
use hyperdraw_world::{CellGraph, CellId, Depth, LandRules};

pub const SHALLOW_WATER: u8 = 1;
pub const SHALLOW_BOTTOM: u8 = 2;
pub const SHALLOW_INF: u8 = 4;

const LAKE_SIDE: u32 = 0x2020_30FF;
const LTOB_SIDE: u32 = 0x1818_20FF;
const BTOI_SIDE: u32 = 0x1010_10FF;
const LAKE_BOTTOM: u32 = 0x1010_10FF;
const CHASM_BOTTOM: u32 = 0x0808_08FF;

/// Bands a cell of depth `from` shows towards a neighbor of depth `to`
/// (`None` for a missing neighbor).
pub fn bands_between(from: Depth, to: Option<Depth>) -> &'static [SidePar] {
    match (from, to) {
        (Depth::Lake, Some(Depth::Floor)) => &[SidePar::Lake],
        (Depth::Chasm, Some(Depth::Floor)) => &[SidePar::Lake, SidePar::Ltob],
        (Depth::Chasm, Some(Depth::Lake)) => &[SidePar::Ltob],
        (Depth::Chasm, None) => &[SidePar::Btoi],
        _ => &[],
    }
}

/// Which depth transitions meet at `c`, as `SHALLOW_*` bits.
pub fn shallow<W: CellGraph + LandRules>(world: &W, c: CellId) -> u8 {
    let me = world.chasm_graph(c);
    let mut bits = 0;
    for d in 0..world.degree(c) {
        let other = world.neighbor(c, d).map(|n| world.chasm_graph(n));
        bits |= match (me, other) {
            (Depth::Floor, Some(Depth::Lake)) | (Depth::Lake, Some(Depth::Floor)) => SHALLOW_WATER,
            (Depth::Lake, Some(Depth::Chasm)) | (Depth::Chasm, Some(Depth::Lake)) => SHALLOW_BOTTOM,
            (Depth::Chasm, Some(Depth::Floor)) | (Depth::Floor, Some(Depth::Chasm)) => SHALLOW_WATER | SHALLOW_BOTTOM,
            (Depth::Chasm, None) => SHALLOW_INF,
            _ => 0,
        };
    }
    bits
}

fn side_color(sp: SidePar) -> u32 {
    match sp {
        SidePar::Lake => LAKE_SIDE,
        SidePar::Ltob => LTOB_SIDE,
        _ => BTOI_SIDE,
    }
}

/// Draws the sunken surface of a lake or chasm cell and its panels. Returns
/// `false` for floor-level cells, which draw nothing here.
pub(crate) fn draw_depth<W: CellGraph + LandRules>(ctx: &mut CellCtx<'_>, world: &W, c: CellId, fcol: u32, fd: u32) -> bool {
    let me = world.chasm_graph(c);
    if me == Depth::Floor {
        return false;
    }
    let Some(fs) = ctx.fs else { return true };
    let vs = ctx.vspin();
    let solid = ctx.cat.params().solid;
    if me == Depth::Lake {
        ctx.q.push(DrawRecord::Poly {
            shape: fs.levels[SidePar::Lake.index()],
            transform: vs,
            color: darkena(fcol, fd.saturating_sub(1), 0x80),
            prio: if solid { Ppr::TRANSPARENT_LAKE } else { Ppr::LAKELEV },
        });
    }
    if me == Depth::Chasm || ctx.detail > 0 {
        let color = if me == Depth::Chasm { CHASM_BOTTOM } else { LAKE_BOTTOM };
        ctx.q.push(DrawRecord::Poly { shape: fs.levels[SidePar::Ltob.index()], transform: vs, color, prio: Ppr::LAKEBOTTOM });
    }
    if !ctx.sel.sides_valid && !ctx.escher() {
        return true;
    }

    let degree = world.degree(c);
    let towards: Vec<&[SidePar]> = (0..degree).map(|d| bands_between(me, world.neighbor(c, d).map(|n| world.chasm_graph(n)))).collect();
    for sp in [SidePar::Lake, SidePar::Ltob, SidePar::Btoi] {
        for (d, bands) in towards.iter().enumerate() {
            if bands.contains(&sp) && place_sidewall(ctx, d, sp, side_color(sp)) {
                break;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::RegularTiling;
    use hyperdraw_world::{Map, Wall};

    #[test]
    fn band_table() {
        assert_eq!(bands_between(Depth::Chasm, Some(Depth::Floor)), &[SidePar::Lake, SidePar::Ltob]);
        assert!(bands_between(Depth::Floor, Some(Depth::Chasm)).is_empty());
        assert!(bands_between(Depth::Lake, Some(Depth::Lake)).is_empty());
        assert!(bands_between(Depth::Lake, None).is_empty());
        assert_eq!(bands_between(Depth::Chasm, None), &[SidePar::Btoi]);
    }

    #[test]
    fn shallow_bits() {
        let mut map = Map::ball(RegularTiling::new(6, 3), 2);
        let n = map.neighbor(CellId(0), 0).unwrap();
        map.set_wall(CellId(0), Wall::Lake);
        assert_eq!(shallow(&map, CellId(0)), SHALLOW_WATER);
        map.set_wall(n, Wall::Chasm);
        assert_eq!(shallow(&map, CellId(0)), SHALLOW_WATER | SHALLOW_BOTTOM);
        assert_eq!(shallow(&map, n), SHALLOW_WATER | SHALLOW_BOTTOM);
    }
}
