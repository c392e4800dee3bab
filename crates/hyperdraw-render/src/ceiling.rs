//! Ceilings of the solid display: sky, stars and the walls above the wall
//! tops. Lands are grouped by how their ceiling looks.

use crate::color::{darkena, gradient};
use crate::draw::CellCtx;
use crate::queue::{DrawRecord, DrawSink};
use crate::walls::place_sidewall;
use hyperdraw_geom::Geometry;
use hyperdraw_shapes::{Ppr, SidePar};
use hyperdraw_world::palette::wall_color;
use hyperdraw_world::{CellGraph, CellId, Land, LandRules, Wall};

/// How a land's ceiling is drawn.
///
/// * 0: nothing (mirror images)
/// * 1: night sky with scattered stars
/// * 2: colored day sky
/// * 3: cave roof at the wall top
/// * 4: dark sky over a roof two walls up
/// * 6: ruins, tiered by `landparam`
/// * 7: temple columns, tiered by `landparam`
pub fn ceiling_category<W: CellGraph + LandRules>(world: &W, c: CellId) -> u8 {
    if world.in_mirror(c) {
        return 0;
    }
    let Some(cd) = world.cell(c) else { return 0 };
    match cd.land {
        Land::Icy | Land::Crossroads | Land::Jungle | Land::Graveyard => 1,
        Land::Power
        | Land::Desert
        | Land::Alchemist
        | Land::Minefield
        | Land::Ocean
        | Land::Rose
        | Land::Dragon
        | Land::Hell => 2,
        Land::Caves | Land::Camelot | Land::Mirror | Land::MirrorWall => 3,
        Land::Generic => 4,
        Land::Ruins => 6,
        Land::Temple => 7,
    }
}

/// 0..=255; the sky darkens as the camera drops below the wall tops. `mul`
/// of -1 gives the brightness of a sky seen from below.
pub fn sky_brightness(camera: f64, wall: f64, mul: f64) -> u32 {
    let s = 1.0 - mul * (camera - wall) / -2.0;
    if s > 1.0 {
        255
    } else if s < 0.0 {
        0
    } else {
        (s * 255.0) as u32
    }
}

/// Default day sky: blue towards white by the cell's hash, fiery in hell.
pub fn sky_color(land: Land, hash: u32) -> u32 {
    let mut z = (hash.wrapping_mul(5) & 127) as i32;
    if z >= 64 {
        z = 127 - z;
    }
    let z = z as f64;
    if land == Land::Hell {
        if z < 32.0 {
            gradient(0x40_0000, 0xFF_0000, 0.0, z, 32.0)
        } else {
            gradient(0xFF_0000, 0xFF_FF00, 32.0, z, 63.0)
        }
    } else {
        gradient(0x40_40FF, 0xFF_FFFF, 0.0, z, 63.0)
    }
}

fn push_sky(ctx: &mut CellCtx<'_>, c: CellId, col: u32) {
    let wall = ctx.cat.params().wall_height;
    let sk = sky_brightness(ctx.cfg.camera_height, wall, 1.0);
    let color = darkena(gradient(0, col, 0.0, sk as f64, 255.0), 0, 0xFF);
    ctx.q.push(DrawRecord::Sky { cell: c, transform: ctx.v, color });
}

fn push_star(ctx: &mut CellCtx<'_>, above_sky: f64) {
    let Some(star) = ctx.cat.id("Star") else { return };
    let p = ctx.cat.params();
    let g = ctx.cat.geom();
    let fac = p.lev_to_factor(g, p.wall_height * 5.0 + above_sky);
    let t = ctx.at_factor(&ctx.v, fac);
    ctx.q.push(DrawRecord::Poly { shape: star, transform: t, color: 0xFFFF_FFFF, prio: Ppr::SKY });
}

fn push_level(ctx: &mut CellCtx<'_>, sp: SidePar, col: u32) {
    if let Some(fs) = ctx.fs {
        let transform = ctx.vspin();
        ctx.q.push(DrawRecord::Poly { shape: fs.levels[sp.index()], transform, color: col, prio: Ppr::WALL });
    }
}

/// Queues the ceiling of `c`. Only the solid display outside the sphere has
/// one.
pub(crate) fn draw_ceiling<W: CellGraph + LandRules>(ctx: &mut CellCtx<'_>, world: &W, c: CellId, hash: u32, fcol: u32, wcol: u32, fd: u32) {
    let g = ctx.cat.geom();
    if !ctx.cat.params().solid || g == Geometry::Spherical {
        return;
    }
    let Some(cd) = world.cell(c).copied() else { return };
    let wh = ctx.cat.params().wall_height;
    let camera = ctx.cfg.camera_height;
    let euclid = g == Geometry::Euclidean;
    let degree = world.degree(c);
    let landparam = |n: Option<CellId>| n.and_then(|n| world.cell(n)).map_or(-1, |nd| nd.landparam);

    match ceiling_category(world, c) {
        1 => {
            if euclid {
                return;
            }
            if hash % 3 == 0 {
                push_star(ctx, 1.0);
            }
            push_sky(ctx, c, 0x00_000F);
        }
        2 => {
            if euclid {
                return;
            }
            let col = match cd.land {
                Land::Power if cd.landparam != 0 => 0xFF_2010,
                Land::Power => 0x00_0020,
                Land::Desert => 0x40_40FF,
                Land::Alchemist => fcol,
                Land::Dragon if cd.wall == Wall::Chasm => 0xFF_FFFF,
                Land::Dragon => 0x40_40FF,
                land => sky_color(land, hash),
            };
            push_sky(ctx, c, col);
        }
        3 => {
            push_sky(ctx, c, 0);
            if camera <= wh {
                return;
            }
            push_level(ctx, SidePar::Wall, darkena(fcol, fd, 0xFF));
            let col = darkena(gradient(0, wcol, 0.0, 0.8, 1.0), fd, 0xFF);
            for sp in [SidePar::High, SidePar::High2, SidePar::Sky] {
                for d in 0..degree {
                    let open = world.neighbor(c, d).is_none_or(|n| ceiling_category(world, n) != 3);
                    if open && place_sidewall(ctx, d, sp, col) {
                        break;
                    }
                }
            }
        }
        6 | 7 => {
            let temple = cd.land == Land::Temple;
            push_sky(ctx, c, if temple { 0x00_000F } else { sky_color(cd.land, hash) });
            if temple && hash % 5 < 2 {
                push_star(ctx, 1.0);
            }
            if camera <= wh * 3.0 {
                return;
            }
            let wcol2 = if temple { wall_color(Wall::Column, cd.land) } else { 0x55_4433 };
            let col = darkena(wcol2, fd, 0xFF);
            if cd.landparam == 1 {
                for d in 0..degree {
                    if landparam(world.neighbor(c, d)) != 1 && place_sidewall(ctx, d, SidePar::High, col) {
                        break;
                    }
                }
            }
            if cd.landparam != 2 {
                for d in 0..degree {
                    if landparam(world.neighbor(c, d)) == 2 && place_sidewall(ctx, d, SidePar::High2, col) {
                        break;
                    }
                }
            }
            match cd.landparam {
                0 => push_level(ctx, SidePar::High, col),
                1 => push_level(ctx, SidePar::Wall, col),
                _ => {}
            }
        }
        0 => {}
        _ => {
            push_sky(ctx, c, 0x00_000F);
            if camera <= wh * 3.0 {
                return;
            }
            push_level(ctx, SidePar::High, darkena(fcol, fd, 0xFF));
            if !euclid {
                push_star(ctx, 0.5);
            }
        }
    }
}
