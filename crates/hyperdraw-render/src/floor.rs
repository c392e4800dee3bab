//! Which floor outline a cell gets, and how it is turned.
//!
//! Selection is a pure function of the cell, its neighbors and the
//! configuration; the result is handed to the emitters explicitly.

use crate::config::RenderConfig;
use hyperdraw_geom::Transmatrix;
use hyperdraw_shapes::{FloorStyle, ShapeCatalog, ShapeId};
use hyperdraw_world::{CellGraph, CellId, Land, LandRules};

/// Half of a cell's floor, facing direction `dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfFloor {
    pub dir: usize,
    /// Which of the three half shapes; grows with the number of matching
    /// neighbors.
    pub variant: usize,
    /// A mirror-wall cell also draws the mirror edge.
    pub mirror: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloorSelection {
    pub style: FloorStyle,
    pub spin: Transmatrix,
    pub user_shape: Option<ShapeId>,
    /// The catalog has side panels for this cell's degree.
    pub sides_valid: bool,
    pub half: Option<HalfFloor>,
}

impl FloorSelection {
    /// Half floors replace the whole outline.
    #[inline]
    pub fn draws_whole(&self) -> bool {
        self.half.is_none()
    }
}

pub fn land_style(land: Land, pattern: u32) -> FloorStyle {
    match land {
        Land::Generic | Land::Crossroads | Land::Minefield => FloorStyle::Full,
        Land::Desert => FloorStyle::Desert,
        Land::Icy | Land::Rose => FloorStyle::Star,
        Land::Caves => FloorStyle::Cave,
        Land::Jungle => {
            if pattern % 2 == 0 {
                FloorStyle::Feather
            } else {
                FloorStyle::Troll
            }
        }
        Land::Alchemist | Land::Ocean => FloorStyle::Cloud,
        Land::Mirror | Land::MirrorWall => FloorStyle::Full,
        Land::Graveyard => FloorStyle::Cross,
        Land::Hell => FloorStyle::Lava,
        Land::Dragon | Land::Power => FloorStyle::Power,
        Land::Camelot => FloorStyle::Troll,
        Land::Ruins => FloorStyle::Cave,
        Land::Temple => FloorStyle::Star,
    }
}

pub(crate) fn cell_hash(c: CellId) -> u32 {
    let mut h = c.0.wrapping_mul(0x9E37_79B9);
    h ^= h >> 15;
    h.wrapping_mul(0x85EB_CA6B) >> 7
}

pub fn select_floor<W: CellGraph + LandRules>(
    world: &W,
    cat: &ShapeCatalog,
    cfg: &RenderConfig,
    c: CellId,
) -> Option<FloorSelection> {
    let cd = world.cell(c)?;
    let degree = world.degree(c);
    let pattern = world.pattern_id(c);
    let style = if cfg.random_pattern {
        FloorStyle::ALL[cell_hash(c) as usize % FloorStyle::ALL.len()]
    } else {
        land_style(cd.land, pattern)
    };
    let spin = if degree > 0 {
        Transmatrix::spin(-world.direction_angle(c, pattern as usize % degree))
    } else {
        Transmatrix::IDENTITY
    };
    let sides_valid = cat.floor(style, degree as u32).is_some_and(|fs| fs.side.iter().all(|row| row.len() == degree));

    let half = if cd.land == Land::MirrorWall {
        split_towards(world, c, |n| world.cell(n).is_some_and(|nd| nd.land == Land::MirrorWall), true)
    } else if cd.land == Land::Jungle {
        split_towards(
            world,
            c,
            |n| world.cell(n).is_some_and(|nd| nd.land == Land::Jungle) && world.pattern_id(n) == pattern,
            false,
        )
    } else {
        None
    };

    let user_shape = cfg.user_floor.as_deref().and_then(|name| cat.get(name).and(cat.id(name)));
    Some(FloorSelection { style, spin, user_shape, sides_valid, half })
}

/// The half facing the first neighbor that does not match, sized by how many
/// neighbors do. `None` when every neighbor matches or none does.
fn split_towards<W: CellGraph>(
    world: &W,
    c: CellId,
    matches: impl Fn(CellId) -> bool,
    mirror: bool,
) -> Option<HalfFloor> {
    let degree = world.degree(c);
    let mut open = None;
    let mut same = 0;
    for d in 0..degree {
        match world.neighbor(c, d) {
            Some(n) if matches(n) => same += 1,
            _ => {
                open.get_or_insert(d);
            }
        }
    }
    if same == 0 {
        return None;
    }
    open.map(|dir| HalfFloor { dir, variant: (same - 1).min(2), mirror })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::RegularTiling;
    use hyperdraw_shapes::{ModelParams, SilhouetteLibrary};
    use hyperdraw_world::Map;

    fn catalog(map: &Map) -> ShapeCatalog {
        let t = map.tiling();
        ShapeCatalog::build(map.geometry(), t, ModelParams::default(), &SilhouetteLibrary::builtin(), &[t.p])
    }

    #[test]
    fn land_table_and_spin() {
        let mut map = Map::ball(RegularTiling::new(7, 3), 2);
        let cat = catalog(&map);
        map.set_land(CellId(3), Land::Caves);
        let sel = select_floor(&map, &cat, &RenderConfig::default(), CellId(3)).unwrap();
        assert_eq!(sel.style, FloorStyle::Cave);
        assert!(sel.sides_valid);
        assert!(sel.draws_whole());
        assert!(sel.user_shape.is_none());
    }

    #[test]
    fn mirror_seam_gets_half_floor() {
        let mut map = Map::ball(RegularTiling::new(7, 3), 2);
        let cat = catalog(&map);
        map.set_land(CellId(0), Land::MirrorWall);
        map.set_land(CellId(1), Land::MirrorWall);
        let sel = select_floor(&map, &cat, &RenderConfig::default(), CellId(0)).unwrap();
        let half = sel.half.unwrap();
        assert!(half.mirror);
        assert_eq!(half.variant, 0);
        assert_ne!(map.neighbor(CellId(0), half.dir), Some(CellId(1)));
    }

    #[test]
    fn user_floor_resolves_only_known_shapes() {
        let map = Map::ball(RegularTiling::new(7, 3), 1);
        let cat = catalog(&map);
        let cfg = RenderConfig { user_floor: Some("Disk".into()), ..RenderConfig::default() };
        assert_eq!(select_floor(&map, &cat, &cfg, CellId(0)).unwrap().user_shape, cat.id("Disk"));
        let cfg = RenderConfig { user_floor: Some("NoSuchShape".into()), ..RenderConfig::default() };
        assert!(select_floor(&map, &cat, &cfg, CellId(0)).unwrap().user_shape.is_none());
    }
}
