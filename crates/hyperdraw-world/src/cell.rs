//! Per-cell contents: land, wall, monster and item.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Land {
    #[default]
    Generic,
    Crossroads,
    Desert,
    Icy,
    Caves,
    Jungle,
    Alchemist,
    Mirror,
    /// The seam between a mirror image and its source; every cell is split
    /// into a half floor and a half mirror.
    MirrorWall,
    Graveyard,
    Hell,
    Ocean,
    Dragon,
    Minefield,
    Rose,
    Camelot,
    Power,
    /// Ruined walls in tiers given by `landparam`.
    Ruins,
    /// Columns in tiers given by `landparam`.
    Temple,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    #[default]
    None,
    Stone,
    Column,
    BigTree,
    Chasm,
    Lake,
    Sea,
    Boat,
    Mirror,
    Cloud,
    Barrel,
    Fan,
    Thorns,
    /// A mine; drawn as plain floor, counted by its neighbors.
    Mine,
    /// Stepped red rock; the level is 1..=3.
    RedRock(u8),
    RoundTable,
    Trap,
    Carpet,
}

impl Wall {
    /// Full-height walls: drawn as a top face with side panels.
    pub fn is_high(self) -> bool {
        matches!(self, Wall::Stone | Wall::Column | Wall::BigTree | Wall::Mirror | Wall::Cloud)
    }

    pub fn is_water(self) -> bool {
        matches!(self, Wall::Lake | Wall::Sea | Wall::Boat)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Monster {
    #[default]
    None,
    Player,
    Wolf,
    Dog,
    Cat,
    Familiar,
    Eagle,
    Hawk,
    TinyBird,
    Ghost,
    MiniGhost,
    Slime,
    Skeleton,
    Yeti,
    Knight,
    Princess,
    Raider,
    Rat,
    Bull,
    Reptile,
    Trylobite,
    Shark,
    TinyShark,
    Kraken,
    Worm,
    WormTail,
    Dragon,
    DragonTail,
    Tentacle,
    TentacleTail,
    Mimic,
    Butterfly,
    Gadfly,
    Bat,
    Gargoyle,
    WaterElemental,
    JiangShi,
    Golem,
    Demon,
    Goat,
    Bug,
}

impl Monster {
    /// Segments of a multi-cell body; drawn tail first once traversal ends.
    pub fn is_segmented(self) -> bool {
        matches!(
            self,
            Monster::Worm
                | Monster::WormTail
                | Monster::Dragon
                | Monster::DragonTail
                | Monster::Tentacle
                | Monster::TentacleTail
        )
    }

    pub fn flies(self) -> bool {
        matches!(
            self,
            Monster::Eagle | Monster::Hawk | Monster::TinyBird | Monster::Bat | Monster::Gadfly | Monster::Butterfly
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    #[default]
    None,
    Gem,
    Key,
    Orb,
    Star,
    Snowball,
    Heptamarker,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellData {
    pub land: Land,
    pub wall: Wall,
    pub monster: Monster,
    pub item: Item,
    /// Facing of the monster; for body segments, the direction of the next
    /// segment towards the tail.
    pub mondir: Option<u8>,
    pub stuntime: u8,
    /// Land-specific value: distance to the nearest rose in the rose land.
    pub landparam: i32,
}
