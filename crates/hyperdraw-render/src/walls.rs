//! Wall tops, side panels and the layered walls of the escher display.
//!
//! A high wall draws a panel only towards neighbors that are not high walls
//! themselves, so the seam between two walls is drawn by neither.

use crate::color::{darkena, gradient};
use crate::config::DarknessTables;
use crate::draw::CellCtx;
use crate::queue::{DrawRecord, DrawSink};
use hyperdraw_geom::{Geometry, Transmatrix};
use hyperdraw_shapes::{FloorShape, Ppr, ShapeId, SidePar};
use hyperdraw_world::{CellGraph, CellId, Land, LandRules, Wall};
use std::f64::consts::TAU;

/// Priority of a side panel of band `sp`.
pub fn side_prio(sp: SidePar) -> Ppr {
    match sp {
        SidePar::Wall | SidePar::Wts3 | SidePar::Sky | SidePar::High | SidePar::High2 => Ppr::WALL3.offset(-2),
        SidePar::Lake => Ppr::LAKEWALL,
        SidePar::Ltob => Ppr::INLAKEWALL,
        SidePar::Btoi => Ppr::BELOWBOTTOM,
        SidePar::Slev(s) => Ppr::REDWALL.offset(-2 + 4 * s as i32),
    }
}

/// Edge of a floor outline facing direction `d`: corner `i` sits between
/// directions `i` and `i + 1`, so direction `d` is flanked by corners
/// `d - 1` and `d`.
#[inline]
pub fn edge_toward(d: usize, degree: usize) -> usize {
    (d + degree - 1) % degree
}

/// The panel of band `sp` on the side of `fs` facing direction `d`.
pub fn side_shape(fs: &FloorShape, sp: SidePar, d: usize) -> Option<ShapeId> {
    let row = fs.side.get(sp.index())?;
    if row.is_empty() {
        return None;
    }
    row.get(edge_toward(d, row.len())).copied()
}

/// Darkening steps for the side of a `degree`-gon facing direction `d`.
pub fn darkval(t: &DarknessTables, g: Geometry, degree: usize, d: usize) -> u32 {
    let table = match (g, degree) {
        (Geometry::Spherical, _) => &t.twelve,
        (Geometry::Euclidean, 6) | (Geometry::Hyperbolic, 6) => &t.hex,
        (Geometry::Hyperbolic, 12) => &t.twelve,
        _ => return 0,
    };
    if table.is_empty() { 0 } else { table[d % table.len()] }
}

/// Side color: `wcol2` less `dv` sixteenths of the base color, channel-wise.
pub fn panel_color(wcol: u32, wcol2: u32, dv: u32) -> u32 {
    let step = (wcol & 0xF0_F0F0) >> 4;
    let mut out = 0;
    for shift in [0, 8, 16] {
        let a = (wcol2 >> shift) & 0xFF;
        let b = ((step >> shift) & 0xFF) * dv;
        out |= a.saturating_sub(b) << shift;
    }
    out
}

/// Level `nom / den` of the way from `l1` to `l2`, as a factor.
fn zgrad(ctx: &CellCtx<'_>, l1: f64, l2: f64, nom: i32, den: i32) -> f64 {
    let p = ctx.cat.params();
    p.lev_to_factor(ctx.cat.geom(), l1 + (l2 - l1) * nom as f64 / den as f64)
}

/// Queues the cell outline at factor `fac`.
fn draw_outline_at(ctx: &mut CellCtx<'_>, fac: f64, col: u32, prio: Ppr) {
    let Some(fs) = ctx.fs else { return };
    let t = ctx.at_factor(&ctx.vspin(), fac);
    ctx.q.push(DrawRecord::Poly { shape: fs.b, transform: t, color: col, prio });
}

/// The escher display stacks copies of the outline instead of drawing panels.
pub(crate) fn escher_sidewall(ctx: &mut CellCtx<'_>, sp: SidePar, col: u32) {
    let p = ctx.cat.params().clone();
    let wh = p.wall_height;
    let detail = ctx.detail as i32;
    match sp {
        SidePar::Slev(sl) => {
            let slev = p.rock_wall_ratio * wh / 3.0;
            let sl = sl as i32;
            for z in 1..=4 {
                if z == 1 || (z == 4 && detail == 2) {
                    let f = zgrad(ctx, slev * sl as f64, slev * (sl + 1) as f64, z, 4);
                    draw_outline_at(ctx, f, col, Ppr::REDWALL.offset(-4 + z + 4 * sl));
                }
            }
        }
        SidePar::Wall | SidePar::Wts3 => {
            let layers = 2 << detail;
            for z in 1..layers {
                let f = zgrad(ctx, 0.0, wh, z, layers);
                draw_outline_at(ctx, f, col, Ppr::WALL3.offset(z - layers));
            }
        }
        SidePar::Lake => {
            let layers = (1 << detail) >> 1;
            for z in 0..layers {
                let f = zgrad(ctx, -wh * p.lake_top, 0.0, z, layers);
                draw_outline_at(ctx, f, col, Ppr::FLOOR.offset(z - layers));
            }
        }
        SidePar::Ltob => {
            let layers = (1 << detail) >> 1;
            for z in 0..layers {
                let f = zgrad(ctx, -wh * p.lake_bottom, -wh * p.lake_top, z, layers);
                draw_outline_at(ctx, f, col, Ppr::INLAKEWALL.offset(z - layers));
            }
        }
        SidePar::Btoi => {
            let layers = 1 << detail;
            let infdeep = ctx.cat.levels().infdeep;
            draw_outline_at(ctx, infdeep, col, Ppr::MINUSINF);
            for z in 1..layers {
                let f = zgrad(ctx, -wh * p.lake_bottom, -wh * p.lake_top, -z, 1);
                draw_outline_at(ctx, f, col, Ppr::LAKEBOTTOM.offset(z - layers));
            }
        }
        SidePar::Sky | SidePar::High | SidePar::High2 => {}
    }
}

/// Queues the panel of band `sp` towards direction `d`. Returns `true` when
/// the escher display handled the whole band at once, so the caller stops
/// iterating directions.
pub(crate) fn place_sidewall(ctx: &mut CellCtx<'_>, d: usize, sp: SidePar, col: u32) -> bool {
    if ctx.escher() {
        escher_sidewall(ctx, sp, col);
        return true;
    }
    let Some(fs) = ctx.fs else { return true };
    if let Some(shape) = side_shape(fs, sp, d) {
        ctx.q.push(DrawRecord::Poly { shape, transform: ctx.v, color: col, prio: side_prio(sp) });
        ctx.stats.panels += 1;
    }
    false
}

/// Tree cones are stacked shrinking outlines instead of prisms.
pub(crate) fn cone_layers(ctx: &mut CellCtx<'_>, wcol: u32) {
    let Some(fs) = ctx.fs else { return };
    if ctx.cat.params().solid {
        ctx.q.push(DrawRecord::Poly { shape: fs.cone[1], transform: ctx.v, color: darkena(wcol, 0, 0xFF), prio: Ppr::WALL });
        floor_shadow(ctx);
        return;
    }
    let wh = ctx.cat.params().wall_height;
    let layers = 2 << ctx.detail as i32;
    for z in 1..layers {
        let zg = zgrad(ctx, 0.0, wh, z, layers);
        let shrink = zg * (layers - z) as f64 / layers as f64;
        let t = (ctx.v * ctx.sel.spin).xyzscale(shrink, zg);
        let col = darkena(gradient(0, wcol, -(layers as f64), z as f64, layers as f64), 0, 0xFF);
        ctx.q.push(DrawRecord::Poly { shape: fs.b, transform: t, color: col, prio: Ppr::WALL3.offset(z - layers + 2) });
    }
    floor_shadow(ctx);
}

pub(crate) fn floor_shadow(ctx: &mut CellCtx<'_>) {
    if let Some(fs) = ctx.fs {
        ctx.q.push(DrawRecord::Poly { shape: fs.shadow, transform: ctx.v * ctx.sel.spin, color: 0x0000_0040, prio: Ppr::WALLSHADOW });
    }
}

/// Draws a high wall (or a round table) on cell `c`.
pub(crate) fn draw_wall<W: CellGraph + LandRules>(ctx: &mut CellCtx<'_>, world: &W, c: CellId, wall: Wall, wcol: u32, fd: u32) {
    let solid = ctx.cat.params().solid;
    let g = ctx.cat.geom();
    let wcol2 = gradient(0, wcol, 0.0, 0.8, 1.0);
    let degree = world.degree(c);
    let needs_panel = |d: usize| match world.neighbor(c, d) {
        Some(n) => !world.is_high_wall(n),
        None => true,
    };

    if wall == Wall::BigTree && (ctx.escher() || solid) {
        cone_layers(ctx, wcol);
        return;
    }

    if !ctx.cfg.wall_spatial && !solid {
        if let Some(star) = ctx.cat.id("GiantStar") {
            ctx.q.push(DrawRecord::Poly { shape: star, transform: ctx.v, color: darkena(wcol, 0, 0xFF), prio: Ppr::WALL });
        }
        return;
    }

    let Some(fs) = ctx.fs else { return };
    let top = fs.levels[SidePar::Wall.index()];
    let alpha = if wall == Wall::Cloud { 0xC0 } else { 0xFF };
    if !solid {
        if let Some(star) = ctx.cat.id("GiantStar") {
            let t = ctx.cat.params().mscale(g, &ctx.v, ctx.cat.levels().wall);
            ctx.q.push(DrawRecord::Poly { shape: star, transform: t, color: darkena(wcol, 0, 0xFF), prio: Ppr::WALL3A });
        }
    }
    ctx.q.push(DrawRecord::Poly {
        shape: top,
        transform: ctx.v * ctx.sel.spin,
        color: darkena(wcol, fd, alpha),
        prio: if solid { Ppr::WALL } else { Ppr::WALL3 },
    });
    floor_shadow(ctx);

    let cfg = ctx.cfg;
    let side_col = |d: usize| darkena(panel_color(wcol, wcol2, darkval(&cfg.darkness, g, degree, d)), fd, alpha);
    if wall == Wall::RoundTable {
        for sp in [SidePar::Slev(0), SidePar::Slev(1), SidePar::Slev(2), SidePar::Wts3] {
            for d in 0..degree {
                if place_sidewall(ctx, d, sp, side_col(d)) {
                    break;
                }
            }
        }
        return;
    }
    for d in 0..degree {
        if needs_panel(d) && place_sidewall(ctx, d, SidePar::Wall, side_col(d)) {
            break;
        }
    }
}

/// Red rock steps: the raised top and panels down to every lower neighbor.
pub(crate) fn draw_snake_level<W: CellGraph + LandRules>(ctx: &mut CellCtx<'_>, world: &W, c: CellId, fcol: u32, wcol: u32, fd: u32) {
    let sl = world.snake_level(c).min(3);
    if sl == 0 {
        return;
    }
    let Some(fs) = ctx.fs else { return };
    let top = fs.levels[SidePar::Slev(sl - 1).index()];
    ctx.q.push(DrawRecord::Poly {
        shape: top,
        transform: ctx.v * ctx.sel.spin,
        color: darkena(fcol, fd, 0xFF),
        prio: Ppr::REDWALL.offset(-4 + 4 * sl as i32),
    });
    floor_shadow(ctx);
    let wcol2 = gradient(0, wcol, 0.0, 0.8, 1.0);
    let col = darkena(wcol2, fd, 0xFF);
    for s in 0..sl {
        for d in 0..world.degree(c) {
            let sl2 = world.neighbor(c, d).map_or(0, |n| world.snake_level(n));
            if s >= sl2 && place_sidewall(ctx, d, SidePar::Slev(s), col) {
                break;
            }
        }
    }
}

const MINE_COLORS: [u32; 10] =
    [0xFF_FFFF, 0x00_00F0, 0x00_F060, 0xF0_0000, 0x00_0060, 0x60_0000, 0x00_C0C0, 0x00_0000, 0x80_8080, 0xFF_D500];

/// Color of a mine count digit.
pub fn mine_color(digit: u8) -> u32 {
    MINE_COLORS[digit as usize % 10]
}

/// Rotation by a full turn every `period` ticks (backwards when negative),
/// offset by `phase` turns.
pub fn spin_tick(ticks: u64, period: i64, phase: f64) -> Transmatrix {
    let p = period.unsigned_abs().max(1);
    let mut turn = (ticks % p) as f64 / p as f64;
    if period < 0 {
        turn = -turn;
    }
    Transmatrix::spin(TAU * (turn + phase))
}

pub(crate) fn push_named(ctx: &mut CellCtx<'_>, name: &str, transform: Transmatrix, color: u32, prio: Ppr) -> bool {
    match ctx.cat.id(name) {
        Some(shape) => {
            ctx.q.push(DrawRecord::Poly { shape, transform, color, prio });
            true
        }
        None => false,
    }
}

/// Low walls and floor decorations drawn over the cell's floor.
pub(crate) fn draw_feature<W: CellGraph + LandRules>(ctx: &mut CellCtx<'_>, world: &W, c: CellId, wcol: u32) {
    let Some(cd) = world.cell(c).copied() else { return };
    let solid = ctx.cat.params().solid;
    let v = ctx.v;
    let floor = ctx.at_factor(&v, ctx.cat.levels().floor);
    match cd.wall {
        Wall::Barrel => {
            if solid {
                if let Some(fs) = ctx.fs {
                    ctx.q.push(DrawRecord::Poly { shape: fs.cone[1], transform: v, color: 0xD000_00FF, prio: Ppr::REDWALL });
                }
                floor_shadow(ctx);
                return;
            }
            let wh = ctx.cat.params().wall_height;
            let layers = 2 << ctx.detail as i32;
            for z in 1..=layers {
                let zg = zgrad(ctx, 0.0, wh, z, layers);
                let col = if z & 1 == 1 { 0xFF_0000 } else { 0xC0_0000 };
                push_named(ctx, "Barrel", v.xyzscale(zg, zg), darkena(col, 0, 0xFF), Ppr::REDWALLM.offset(z));
            }
        }
        Wall::Fan => {
            let t = floor * spin_tick(ctx.ticks, -500, 1.0 / 12.0);
            push_named(ctx, "Fan", t, darkena(wcol, 0, 0xFF), Ppr::WALL);
        }
        Wall::Thorns => {
            push_named(ctx, "Thorns", floor, darkena(wcol, 0, 0xFF), Ppr::THORNS);
        }
        Wall::Trap => {
            push_named(ctx, "Triangle", floor, darkena(0xC0_0000, 0, 0xFF), Ppr::FLOORB);
        }
        Wall::Carpet => {
            let cols = if solid { [0, 0xC0_9F00, 0x60_0000] } else { [0xC0_9F00, 0x60_0000, 0xC0_9F00] };
            let prios = [Ppr::GFLOORA, Ppr::GFLOORB, Ppr::GFLOORC];
            for (k, (col, prio)) in cols.into_iter().zip(prios).enumerate() {
                push_named(ctx, &format!("BigCarpet{}", k + 1), floor, darkena(col, 0, 0xFF), prio);
            }
        }
        _ => {}
    }

    if world.rose_dist(c) == Some(0) {
        push_named(ctx, "Thorns", floor, 0xC080_C0FF, Ppr::THORNS);
        for u in [0.0, 2.0] {
            let t = floor * Transmatrix::spin(TAU / 3.0 / 4.0 * u);
            push_named(ctx, "Rose", t, darkena(0xC0_0000, 0, 0xC0), Ppr::ITEM_BELOW);
        }
    }

    if cd.land == Land::Minefield && cd.wall != Wall::Mine {
        let mines = world.mines_around(c);
        if mines >= 10 {
            push_named(ctx, "MineMark1", floor, darkena(mine_color(mines / 10), 0, 0xFF), Ppr::MINEMARK);
        }
        if mines > 0 {
            push_named(ctx, "MineMark0", floor, darkena(mine_color(mines), 0, 0xFF), Ppr::MINEMARK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_priorities() {
        assert_eq!(side_prio(SidePar::Wall), Ppr::WALL3S);
        assert_eq!(side_prio(SidePar::Slev(0)), Ppr::REDWALLS);
        assert_eq!(side_prio(SidePar::Slev(2)), Ppr::REDWALLS3);
        assert_eq!(side_prio(SidePar::Ltob), Ppr::INLAKEWALL);
    }

    #[test]
    fn edges_face_their_direction() {
        assert_eq!(edge_toward(0, 7), 6);
        assert_eq!(edge_toward(3, 7), 2);
    }

    #[test]
    fn darkness_by_tiling() {
        let t = DarknessTables::default();
        assert_eq!(darkval(&t, Geometry::Euclidean, 6, 2), 6);
        assert_eq!(darkval(&t, Geometry::Hyperbolic, 6, 4), 4);
        assert_eq!(darkval(&t, Geometry::Spherical, 5, 3), 3);
        assert_eq!(darkval(&t, Geometry::Hyperbolic, 7, 3), 0);
    }

    #[test]
    fn mine_digits_wrap() {
        assert_eq!(mine_color(3), 0xF0_0000);
        assert_eq!(mine_color(13), 0xF0_0000);
    }

    #[test]
    fn spin_tick_turns_once_per_period() {
        let a = spin_tick(0, 500, 0.0);
        let b = spin_tick(500, 500, 0.0);
        assert!(a.max_diff(&b) < 1e-9);
        let half = spin_tick(250, -500, 0.0);
        assert!(half.max_diff(&Transmatrix::spin(-std::f64::consts::PI)) < 1e-9);
    }

    #[test]
    fn panel_color_never_wraps() {
        assert_eq!(panel_color(0xFF_FFFF, 0xCC_CCCC, 0), 0xCC_CCCC);
        assert_eq!(panel_color(0xFF_FFFF, 0xCC_CCCC, 6), 0x72_7272);
        assert_eq!(panel_color(0xFF_FFFF, 0x10_1010, 6), 0);
    }
}
