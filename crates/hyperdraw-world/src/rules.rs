//! What the renderer asks the land layer about a cell.

use crate::cell::{CellData, CellId};

/// Vertical class of a cell, ordered from the floor downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Depth {
    Floor,
    /// Water surface at the lake level, bottom below it.
    Lake,
    /// No surface; only the bottom is visible.
    Chasm,
}

pub trait LandRules {
    fn cell(&self, c: CellId) -> Option<&CellData>;

    /// `(wall color, floor color)` as 0xRRGGBB.
    fn colors(&self, c: CellId) -> (u32, u32);

    /// Bucket used to pick and orient the floor shape.
    fn pattern_id(&self, c: CellId) -> u32;

    fn is_high_wall(&self, c: CellId) -> bool;

    /// Red rock steps, 0 for flat ground.
    fn snake_level(&self, c: CellId) -> u8;

    fn chasm_graph(&self, c: CellId) -> Depth;

    /// Distance to the nearest rose, for cells of the rose land.
    fn rose_dist(&self, c: CellId) -> Option<u8>;

    fn mines_around(&self, c: CellId) -> u8;

    fn in_mirror(&self, c: CellId) -> bool;
}
