use hyperdraw_geom::{RegularTiling, Transmatrix};
use hyperdraw_render::{DrawRecord, RenderConfig, Renderer, select_floor};
use hyperdraw_shapes::{ModelParams, ShapeCatalog, SilhouetteLibrary};
use hyperdraw_world::{CellGraph, CellId, Item, Land, Map, Monster, Wall};
use proptest::prelude::*;

const LANDS: [Land; 9] = [
    Land::Generic,
    Land::Icy,
    Land::Jungle,
    Land::Mirror,
    Land::MirrorWall,
    Land::Minefield,
    Land::Rose,
    Land::Ruins,
    Land::Temple,
];
const WALLS: [Wall; 10] = [
    Wall::None,
    Wall::Stone,
    Wall::BigTree,
    Wall::Chasm,
    Wall::Lake,
    Wall::Boat,
    Wall::Mirror,
    Wall::RedRock(2),
    Wall::Fan,
    Wall::Mine,
];
const MONSTERS: [Monster; 9] = [
    Monster::None,
    Monster::Player,
    Monster::Wolf,
    Monster::Eagle,
    Monster::Ghost,
    Monster::Kraken,
    Monster::Mimic,
    Monster::Worm,
    Monster::WormTail,
];
const ITEMS: [Item; 3] = [Item::None, Item::Gem, Item::Heptamarker];

#[derive(Clone, Debug)]
struct Contents {
    land: Land,
    wall: Wall,
    monster: Monster,
    item: Item,
    dir: Option<u8>,
}

fn arb_contents() -> impl Strategy<Value = Contents> {
    (
        prop::sample::select(LANDS.to_vec()),
        prop::sample::select(WALLS.to_vec()),
        prop::sample::select(MONSTERS.to_vec()),
        prop::sample::select(ITEMS.to_vec()),
        prop::option::of(0u8..7),
    )
        .prop_map(|(land, wall, monster, item, dir)| Contents { land, wall, monster, item, dir })
}

fn finite(rec: &DrawRecord) -> bool {
    match rec {
        DrawRecord::Poly { transform, .. } | DrawRecord::Sky { transform, .. } => transform.is_finite(),
        DrawRecord::Line { from, to, .. } => from.is_finite() && to.is_finite(),
        DrawRecord::Glyph { at, .. } => at.is_finite(),
        DrawRecord::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
        DrawRecord::Aura { .. } => true,
    }
}

fn filled_map(contents: &[Contents]) -> Map {
    let mut map = Map::ball(RegularTiling::new(7, 3), 2);
    let cells: Vec<CellId> = map.cells().collect();
    for (&c, k) in cells.iter().zip(contents) {
        map.set_land(c, k.land);
        map.set_wall(c, k.wall);
        map.set_monster(c, k.monster, k.dir);
        if let Some(cd) = map.cell_mut(c) {
            cd.item = k.item;
            cd.landparam = (c.0 % 3) as i32;
        }
    }
    map
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn floor_selection_is_repeatable(
        contents in prop::collection::vec(arb_contents(), 29),
        random_pattern in any::<bool>(),
    ) {
        let map = filled_map(&contents);
        let cat = ShapeCatalog::build(map.geometry(), map.tiling(), ModelParams::default(), &SilhouetteLibrary::builtin(), &[7]);
        let cfg = RenderConfig { random_pattern, ..RenderConfig::default() };
        for c in map.cells() {
            let first = select_floor(&map, &cat, &cfg, c);
            prop_assert!(first.is_some());
            prop_assert_eq!(&first, &select_floor(&map, &cat, &cfg, c));
        }
    }

    #[test]
    fn random_pattern_ignores_the_land(
        contents in prop::collection::vec(arb_contents(), 29),
        land in prop::sample::select(LANDS.to_vec()),
    ) {
        let mut map = filled_map(&contents);
        let cat = ShapeCatalog::build(map.geometry(), map.tiling(), ModelParams::default(), &SilhouetteLibrary::builtin(), &[7]);
        let cfg = RenderConfig { random_pattern: true, ..RenderConfig::default() };
        let before: Vec<_> = map.cells().map(|c| select_floor(&map, &cat, &cfg, c).map(|s| s.style)).collect();
        let cells: Vec<CellId> = map.cells().collect();
        for &c in &cells {
            map.set_land(c, land);
        }
        let after: Vec<_> = cells.iter().map(|&c| select_floor(&map, &cat, &cfg, c).map(|s| s.style)).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn frames_are_sorted_and_finite(
        contents in prop::collection::vec(arb_contents(), 29),
        solid in any::<bool>(),
        grid in any::<bool>(),
        ticks in 0u64..100_000,
    ) {
        let map = filled_map(&contents);
        let params = ModelParams { solid, ..ModelParams::default() };
        let cat = ShapeCatalog::build(map.geometry(), map.tiling(), params, &SilhouetteLibrary::builtin(), &[7]);
        let cfg = RenderConfig { grid, ..RenderConfig::from_toml_str("").unwrap() };
        let mut r = Renderer::new(cfg);
        r.begin_frame(ticks);
        r.draw_map(&map, &cat, CellId(0), &Transmatrix::IDENTITY, 2);
        let mut out: Vec<DrawRecord> = Vec::new();
        let stats = r.end_frame(&cat, &mut out);

        prop_assert_eq!(stats.cells_drawn, map.cell_count());
        prop_assert_eq!(stats.records, out.len());
        prop_assert!(out.windows(2).all(|w| w[0].prio() <= w[1].prio()));
        prop_assert!(out.iter().all(finite));
    }
}
