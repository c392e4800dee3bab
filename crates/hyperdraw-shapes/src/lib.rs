//! Mesh builder: flat silhouettes to floor shapes and lofted 3D models in one shared point buffer.
#![forbid(unsafe_code)]

mod ball;
pub mod buffer;
mod builder;
pub mod catalog;
mod constants;
pub mod eye;
pub mod floors;
mod loft;
mod models;
mod ornaments;
pub mod params;
pub mod ppr;
mod revolution;
pub mod silhouette;
pub mod subdivide;
pub mod triangulate;

pub use buffer::{PointBuffer, Shape, ShapeId, TextureInfo};
pub use builder::MeshBuilder;
pub use catalog::ShapeCatalog;
pub use eye::{EyePair, psmin};
pub use floors::{FloorKey, FloorShape, FloorStyle};
pub use params::{Levels, ModelParams};
pub use ppr::{Ppr, SIDEPARS, SidePar};
pub use silhouette::{Silhouette, SilhouetteLibrary};
pub use subdivide::Profile;
