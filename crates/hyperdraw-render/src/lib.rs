//! Per-cell renderer: turns cells, their walls, floors and occupants into a prioritized draw queue.
#![forbid(unsafe_code)]

pub mod anim;
pub mod aura;
mod ceiling;
pub mod color;
pub mod config;
mod depth;
mod draw;
pub mod effects;
pub mod fall;
pub mod floor;
pub mod grid;
pub mod queue;
pub mod renderer;
pub mod rig;
mod walls;
pub mod worm;

pub use anim::{AnimLayer, Animation, Animations, Attack, Pose};
pub use aura::Aura;
pub use ceiling::{ceiling_category, sky_brightness, sky_color};
pub use config::{DarknessTables, RenderConfig};
pub use depth::{bands_between, shallow};
pub use draw::FrameStats;
pub use effects::{Effect, EffectKind, Effects};
pub use fall::{Fall, Falls, Pushdown};
pub use floor::{FloorSelection, HalfFloor, select_floor};
pub use grid::{Radar, RadarLine, RadarPoint};
pub use queue::{DrawQueue, DrawRecord, DrawSink, Mark};
pub use renderer::{FrameRenderState, MAX_MIRROR_DEPTH, Renderer, in_frustum};
pub use rig::{Rig, SegmentKind, rig_for};
pub use walls::{darkval, edge_toward, mine_color, panel_color, side_prio, side_shape, spin_tick};
pub use worm::{SegmentCmd, WormQueue, tail_dist};
