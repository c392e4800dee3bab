//! Demo contents: a player, a wolf, a worm and some items on the generated
//! map, and a short script of moves, attacks and effects over the frames.

use hyperdraw_render::{AnimLayer, Renderer};
use hyperdraw_world::{CellGraph, CellId, Depth, Item, LandRules, Map, Monster, Wall};

pub struct Actors {
    pub player: CellId,
    pub wolf: Option<CellId>,
}

fn free(map: &Map, c: CellId) -> bool {
    map.cell(c).is_some_and(|cd| cd.monster == Monster::None && !cd.wall.is_high() && map.chasm_graph(c) == Depth::Floor)
}

/// Cells of a body starting at `start` and heading outwards.
fn body_from(map: &Map, start: CellId, len: usize) -> Vec<CellId> {
    let mut body = vec![start];
    while body.len() < len {
        let Some(&last) = body.last() else { break };
        let next = (0..map.degree(last))
            .filter_map(|d| map.neighbor(last, d))
            .find(|&n| !body.contains(&n) && free(map, n) && map.distance(n) >= map.distance(last));
        match next {
            Some(n) => body.push(n),
            None => break,
        }
    }
    body
}

pub fn populate(map: &mut Map) -> Actors {
    let player = CellId(0);
    map.set_wall(player, Wall::None);
    map.set_monster(player, Monster::Player, Some(0));

    let ring: Vec<CellId> = map.cells().filter(|&c| map.distance(c) == Some(2)).collect();
    let wolf = ring.iter().copied().find(|&c| free(map, c));
    if let Some(w) = wolf {
        map.set_monster(w, Monster::Wolf, Some(0));
    }
    for &c in ring.iter().skip(1).step_by(3) {
        if free(map, c) {
            if let Some(cd) = map.cell_mut(c) {
                cd.item = Item::Gem;
            }
        }
    }

    let start = map.cells().filter(|&c| map.distance(c) == Some(3)).find(|&c| free(map, c));
    if let Some(start) = start {
        let body = body_from(map, start, 4);
        if body.len() >= 2 && map.place_segmented(&body, Monster::Worm, Monster::WormTail) {
            log::debug!(target: "world", "worm placed len={}", body.len());
        }
    }

    let lakes: Vec<CellId> = map.cells().filter(|&c| map.cell(c).is_some_and(|cd| cd.wall == Wall::Lake)).collect();
    if let Some(&boat) = lakes.first() {
        map.set_wall(boat, Wall::Boat);
        map.set_monster(boat, Monster::None, Some(1));
    }
    if let Some(&shark) = lakes.get(1) {
        map.set_monster(shark, Monster::Shark, Some(2));
    }
    Actors { player, wolf }
}

/// Events of frame `f`.
pub fn script(r: &mut Renderer, map: &mut Map, actors: &mut Actors, f: u32) {
    if f == 5 {
        r.draw_fire_particles(actors.player, 8, 100);
    }
    if f % 30 == 10 {
        let src = actors.player;
        let d = (f / 30) as usize % map.degree(src).max(1);
        if let Some(tgt) = map.neighbor(src, d).filter(|&n| free(map, n)) {
            map.set_monster(src, Monster::None, None);
            map.set_monster(tgt, Monster::Player, Some(d as u8));
            r.animate_movement(&*map, src, tgt, AnimLayer::Small, Some(d));
            actors.player = tgt;
        }
    }
    if f % 30 == 20 {
        if let Some(w) = actors.wolf {
            r.animate_attack(&*map, w, 0, AnimLayer::Small);
            if let Some(n) = map.neighbor(w, 0) {
                r.draw_flash(n);
            }
        }
    }
    if f == 15 {
        let chasm = map.cells().find(|&c| map.cell(c).is_some_and(|cd| cd.wall == Wall::Chasm));
        if let Some(c) = chasm {
            r.falling_floor_animation(c, Wall::None, Monster::None);
        }
    }
    if f == 25 {
        r.draw_big_flash(CellId(0));
        r.draw_particles(CellId(0), 0x40_80FF, 12, 60);
    }
}
