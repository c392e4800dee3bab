//! Base colors of lands and walls.

use crate::cell::{Land, Wall};

pub fn floor_color(land: Land) -> u32 {
    match land {
        Land::Generic => 0x808080,
        Land::Crossroads => 0xFFFF80,
        Land::Desert => 0xEDC9AF,
        Land::Icy => 0x8080FF,
        Land::Caves => 0x4080C0,
        Land::Jungle => 0x008000,
        Land::Alchemist => 0xA06000,
        Land::Mirror | Land::MirrorWall => 0x8080C0,
        Land::Graveyard => 0x303030,
        Land::Hell => 0xC00000,
        Land::Ocean => 0x0000C0,
        Land::Dragon => 0xC0A000,
        Land::Minefield => 0x60A060,
        Land::Rose => 0xFFC0C0,
        Land::Camelot => 0xA0A0A0,
        Land::Power => 0x800080,
        Land::Ruins => 0x6A6A4A,
        Land::Temple => 0x285028,
    }
}

pub fn wall_color(wall: Wall, land: Land) -> u32 {
    match wall {
        Wall::None | Wall::Mine | Wall::Trap | Wall::Carpet => floor_color(land),
        Wall::Stone => 0x585858,
        Wall::Column => 0xB0B0B0,
        Wall::BigTree => 0x006000,
        Wall::Chasm => 0x000000,
        Wall::Lake => 0x0000A0,
        Wall::Sea => 0x0000FF,
        Wall::Boat => 0xC06000,
        Wall::Mirror => 0xC0C0FF,
        Wall::Cloud => 0xE0E0FF,
        Wall::Barrel => 0xA04000,
        Wall::Fan => 0xFFFFFF,
        Wall::Thorns => 0x004000,
        Wall::RedRock(_) => 0xC00000,
        Wall::RoundTable => 0x806040,
    }
}
