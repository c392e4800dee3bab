//! Cell graph and land rules consumed by the renderer, plus an in-memory map.
#![forbid(unsafe_code)]

pub mod cell;
pub mod config;
pub mod graph;
pub mod map;
pub mod palette;
pub mod rules;

pub use cell::{CellData, CellId, Item, Land, Monster, Wall};
pub use config::MapConfig;
pub use graph::CellGraph;
pub use map::Map;
pub use rules::{Depth, LandRules};
