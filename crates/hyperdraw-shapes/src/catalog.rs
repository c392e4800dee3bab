//! The finished, read-only set of shapes the renderer draws from.

use crate::buffer::{PointBuffer, Shape, ShapeId};
use crate::builder::MeshBuilder;
use crate::params::{Levels, ModelParams};
use crate::silhouette::SilhouetteLibrary;
use hashbrown::HashMap;
use hyperdraw_geom::{Geometry, Hyperpoint, RegularTiling};
use std::time::Instant;

pub use crate::floors::{FloorKey, FloorShape, FloorStyle};

pub struct ShapeCatalog {
    pub(crate) geom: Geometry,
    pub(crate) tiling: RegularTiling,
    pub(crate) params: ModelParams,
    pub(crate) lv: Levels,
    pub(crate) scalefactor: f64,
    pub(crate) points: PointBuffer,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) names: HashMap<String, ShapeId>,
    pub(crate) floors: HashMap<FloorKey, FloorShape>,
    pub(crate) bird_frames: HashMap<String, Vec<ShapeId>>,
}

impl ShapeCatalog {
    /// Loads the silhouettes, builds the floor shapes for every degree in
    /// `degrees` and, in the solid display, the 3D models.
    pub fn build(
        geom: Geometry,
        tiling: RegularTiling,
        params: ModelParams,
        lib: &SilhouetteLibrary,
        degrees: &[u32],
    ) -> ShapeCatalog {
        let t0 = Instant::now();
        let mut mb = MeshBuilder::new(geom, tiling, params);
        mb.load_silhouettes(lib);
        mb.make_floor_shapes(degrees);
        if mb.params.solid {
            mb.make_3d_models();
        }
        mb.register_aliases();
        let cat = mb.finish();
        log::info!(
            target: "perf",
            "ms={:.2} shapes_build geom={:?} shapes={} points={} solid={}",
            t0.elapsed().as_secs_f64() * 1000.0,
            geom,
            cat.shapes.len(),
            cat.points.len(),
            cat.params.solid
        );
        cat
    }

    #[inline]
    pub fn geom(&self) -> Geometry {
        self.geom
    }

    #[inline]
    pub fn tiling(&self) -> RegularTiling {
        self.tiling
    }

    #[inline]
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    #[inline]
    pub fn levels(&self) -> &Levels {
        &self.lv
    }

    #[inline]
    pub fn scalefactor(&self) -> f64 {
        self.scalefactor
    }

    pub fn id(&self, name: &str) -> Option<ShapeId> {
        self.names.get(name).copied()
    }

    /// A named shape; `None` for unknown names and for disabled (empty) shapes.
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.id(name).and_then(|id| self.shape(id)).filter(|sh| !sh.is_empty())
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index())
    }

    pub fn points(&self, sh: &Shape) -> &[Hyperpoint] {
        self.points.slice(sh.range())
    }

    pub fn shadow_points(&self, sh: &Shape) -> Option<&[Hyperpoint]> {
        sh.shadow.map(|(s, e)| self.points.slice(s..e))
    }

    pub fn floor(&self, style: FloorStyle, degree: u32) -> Option<&FloorShape> {
        self.floors.get(&FloorKey { style, degree })
    }

    /// Frame `i` (wrapping) of a flapping bird.
    pub fn bird_frame(&self, name: &str, i: usize) -> Option<&Shape> {
        self.bird_frame_id(name, i).and_then(|id| self.shape(id))
    }

    pub fn bird_frame_id(&self, name: &str, i: usize) -> Option<ShapeId> {
        let frames = self.bird_frames.get(name)?;
        if frames.is_empty() {
            return None;
        }
        Some(frames[i % frames.len()])
    }

    /// Number of flap frames built for `name`; 0 outside the solid display.
    pub fn bird_frame_count(&self, name: &str) -> usize {
        self.bird_frames.get(name).map_or(0, Vec::len)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}
