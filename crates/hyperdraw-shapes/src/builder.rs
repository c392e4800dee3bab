//! `MeshBuilder`: owns the point buffer while shapes are being generated.
//!
//! Builders follow one protocol: read the source outline of a shape, restart
//! that shape at the buffer tail with [`MeshBuilder::bshape`], push points,
//! then post-process "everything since the current shape started".

use crate::buffer::{PointBuffer, Shape, ShapeId, TextureInfo};
use crate::catalog::{FloorKey, FloorShape, ShapeCatalog};
use crate::constants::{EYEPOS_FLAT_WORLD, EYEPOS_SOLID_WORLD, HCROSSF7, SILHOUETTE_UNIT};
use crate::params::{Levels, ModelParams};
use crate::ppr::Ppr;
use crate::silhouette::SilhouetteLibrary;
use hashbrown::HashMap;
use hyperdraw_geom::{C0, Geometry, Hyperpoint, RegularTiling, Transmatrix};

pub struct MeshBuilder {
    pub geom: Geometry,
    pub tiling: RegularTiling,
    pub params: ModelParams,
    pub lv: Levels,
    pub(crate) points: PointBuffer,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) names: HashMap<String, ShapeId>,
    pub(crate) floors: HashMap<FloorKey, FloorShape>,
    pub(crate) bird_frames: HashMap<String, Vec<ShapeId>>,
    current: Option<ShapeId>,
    /// Apex/center used by cones and `scaleshape`.
    pub(crate) shcenter: Hyperpoint,
    scalefactor: f64,
    eyepos: f64,
}

impl MeshBuilder {
    pub fn new(geom: Geometry, tiling: RegularTiling, params: ModelParams) -> Self {
        let lv = Levels::new(&params, geom);
        let scalefactor = params
            .scale_factor
            .unwrap_or_else(|| tiling.circumradius(geom) / HCROSSF7);
        let eyepos = if params.world_3d { EYEPOS_SOLID_WORLD } else { EYEPOS_FLAT_WORLD };
        Self {
            geom,
            tiling,
            params,
            lv,
            points: PointBuffer::new(),
            shapes: Vec::new(),
            names: HashMap::new(),
            floors: HashMap::new(),
            bird_frames: HashMap::new(),
            current: None,
            shcenter: C0,
            scalefactor,
            eyepos,
        }
    }

    #[inline]
    pub fn scalefactor(&self) -> f64 {
        self.scalefactor
    }

    /// One silhouette unit.
    #[inline]
    pub fn s(&self) -> f64 {
        self.scalefactor / SILHOUETTE_UNIT
    }

    /// Silhouette unit stretched by the height/width ratio, for vertical offsets.
    #[inline]
    pub fn sh(&self) -> f64 {
        self.s() * self.params.height_width / 1.5
    }

    #[inline]
    pub fn rev_z(&self) -> f64 {
        self.params.rev_z()
    }

    #[inline]
    pub fn eyepos(&self) -> f64 {
        self.eyepos
    }

    /// Factor of a fraction `z` of the human height.
    pub fn zc(&self, z: f64) -> f64 {
        let hh = self.lv.human_height;
        if !self.params.world_3d && self.params.solid {
            self.params.lev_to_factor(self.geom, hh * z)
        } else {
            hh * (z - 0.5)
        }
    }

    #[inline]
    pub fn zpush(&self, z: f64) -> Transmatrix {
        self.geom.zpush(z)
    }

    /// Pushes every silhouette as a closed outline shape and registers its name.
    pub fn load_silhouettes(&mut self, lib: &SilhouetteLibrary) {
        let s = self.s();
        for sil in lib.iter() {
            let id = self.new_shape(sil.prio());
            for &[x, y] in &sil.points {
                let h = self.geom.hpxy(x * s, y * s);
                self.push(h);
            }
            if let Some(&[x, y]) = sil.points.first() {
                let h = self.geom.hpxy(x * s, y * s);
                self.push(h);
            }
            self.register(&sil.name, id);
        }
    }

    pub fn register(&mut self, name: &str, id: ShapeId) {
        self.names.insert(name.to_string(), id);
    }

    #[inline]
    pub fn id(&self, name: &str) -> Option<ShapeId> {
        self.names.get(name).copied()
    }

    /// Like [`MeshBuilder::id`], logging names the driver expected but did not find.
    pub(crate) fn need(&self, name: &str) -> Option<ShapeId> {
        let id = self.id(name);
        if id.is_none() {
            log::warn!(target: "shapes", "missing silhouette {}", name);
        }
        id
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index())
    }

    pub fn points_of(&self, id: ShapeId) -> &[Hyperpoint] {
        match self.shape(id) {
            Some(sh) => self.points.slice(sh.range()),
            None => &[],
        }
    }

    /// Starts a fresh shape at the buffer tail.
    pub fn new_shape(&mut self, prio: Ppr) -> ShapeId {
        let id = ShapeId(self.shapes.len() as u32);
        let n = self.points.len();
        self.shapes.push(Shape { s: n, e: n, prio, ..Shape::default() });
        self.current = Some(id);
        id
    }

    /// Restarts an existing shape at the buffer tail; its old range is
    /// abandoned. A shadow taken from the old outline is kept.
    pub fn bshape(&mut self, id: ShapeId, prio: Ppr) {
        let n = self.points.len();
        if let Some(sh) = self.shapes.get_mut(id.index()) {
            *sh = Shape { s: n, e: n, prio, shadow: sh.shadow, ..Shape::default() };
            self.current = Some(id);
        }
    }

    pub fn push(&mut self, h: Hyperpoint) {
        self.points.push(h);
        let n = self.points.len();
        if let Some(sh) = self.current.and_then(|id| self.shapes.get_mut(id.index())) {
            sh.e = n;
        }
    }

    pub(crate) fn set_triangles(&mut self) {
        if let Some(sh) = self.current.and_then(|id| self.shapes.get_mut(id.index())) {
            sh.triangles = true;
        }
    }

    pub(crate) fn set_rev_steps(&mut self, steps: u32) {
        if let Some(sh) = self.current.and_then(|id| self.shapes.get_mut(id.index())) {
            sh.rev_steps = steps;
        }
    }

    /// Start of the shape currently being built.
    pub(crate) fn last_start(&self) -> usize {
        self.current
            .and_then(|id| self.shapes.get(id.index()))
            .map_or(self.points.len(), |sh| sh.s)
    }

    /// The outline of a shape without its closing point.
    pub fn outline(&self, id: ShapeId) -> Vec<Hyperpoint> {
        let pts = self.points_of(id);
        match pts.split_last() {
            Some((_, rest)) => rest.to_vec(),
            None => Vec::new(),
        }
    }

    pub fn get_center(&self, vh: &[Hyperpoint]) -> Hyperpoint {
        self.geom.center_of(vh)
    }

    /// Shrinks (or grows) an outline towards `shcenter`.
    pub fn scaleshape(&self, vh: &[Hyperpoint], s: f64) -> Vec<Hyperpoint> {
        vh.iter()
            .map(|&h| self.geom.normalize(h * s + self.shcenter * (1.0 - s)))
            .collect()
    }

    /// Records per-vertex shading for everything pushed since `id` started.
    pub fn add_texture(&mut self, id: ShapeId) {
        let Some(sh) = self.shapes.get(id.index()) else { return };
        let factors = self
            .points
            .slice(sh.s..self.points.len())
            .iter()
            .map(|h| {
                let rad = h.hypot3();
                if rad == 0.0 {
                    0.5
                } else {
                    (0.5 + (0.17 * h[2] + 0.13 * h[1] + 0.15 * h[0]) / rad) as f32
                }
            })
            .collect();
        if let Some(sh) = self.shapes.get_mut(id.index()) {
            sh.texture = Some(TextureInfo { factors });
        }
    }

    /// `zshift` of everything pushed since the current shape started.
    pub fn shift_last(&mut self, z: f64) {
        let g = self.geom;
        let s = self.last_start();
        let e = self.points.len();
        self.points.map_range(s..e, |h| g.zshift(h, z));
    }

    /// `zpush` of everything pushed since the current shape started.
    pub fn shift_last_straight(&mut self, z: f64) {
        let t = self.zpush(z);
        let s = self.last_start();
        let e = self.points.len();
        self.points.map_range(s..e, |h| t * h);
    }

    pub(crate) fn transform_last(&mut self, t: Transmatrix) {
        let s = self.last_start();
        let e = self.points.len();
        self.points.map_range(s..e, |h| t * h);
    }

    pub fn shift_shape(&mut self, id: ShapeId, z: f64) {
        let g = self.geom;
        if let Some(sh) = self.shapes.get(id.index()) {
            let r = sh.range();
            self.points.map_range(r, |h| g.zshift(h, z));
        }
    }

    /// `shift_shape` by name; silently skips unknown names.
    pub fn shift_named(&mut self, name: &str, z: f64) {
        if let Some(id) = self.id(name) {
            self.shift_shape(id, z);
        }
    }

    pub fn transform_shape(&mut self, id: ShapeId, t: Transmatrix) {
        if let Some(sh) = self.shapes.get(id.index()) {
            let r = sh.range();
            self.points.map_range(r, |h| t * h);
        }
    }

    /// Appends the shadow range: the shape dropped onto the floor.
    pub fn make_shadow(&mut self, id: ShapeId) {
        let g = self.geom;
        let Some(sh) = self.shapes.get(id.index()) else { return };
        let r = sh.range();
        let z = self.lv.floor - self.lv.human_height / 100.0;
        let shs = self.points.len();
        for i in r {
            if let Some(h) = self.points.get(i) {
                self.points.push(g.orthogonal_move(h, z));
            }
        }
        let she = self.points.len();
        if let Some(sh) = self.shapes.get_mut(id.index()) {
            sh.shadow = Some((shs, she));
        }
    }

    /// Copies a shape's points to the tail as a new shape with the same metadata.
    pub fn clone_shape(&mut self, src: ShapeId) -> Option<ShapeId> {
        let sh = self.shapes.get(src.index())?.clone();
        let r = self.points.duplicate(sh.range());
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(Shape { s: r.start, e: r.end, ..sh });
        Some(id)
    }

    /// Empties a shape so it draws nothing.
    pub fn disable(&mut self, id: ShapeId) {
        if let Some(sh) = self.shapes.get_mut(id.index()) {
            sh.s = 0;
            sh.e = 0;
        }
    }

    pub fn finish(self) -> ShapeCatalog {
        ShapeCatalog {
            geom: self.geom,
            tiling: self.tiling,
            params: self.params,
            lv: self.lv,
            scalefactor: self.scalefactor,
            points: self.points,
            shapes: self.shapes,
            names: self.names,
            floors: self.floors,
            bird_frames: self.bird_frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MeshBuilder {
        MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), ModelParams::default())
    }

    #[test]
    fn heptagonal_scalefactor_is_one() {
        assert!((builder().scalefactor() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn silhouettes_are_closed_loops() {
        let mut mb = builder();
        mb.load_silhouettes(&SilhouetteLibrary::builtin());
        let id = mb.id("PHead").unwrap();
        let pts = mb.points_of(id);
        assert_eq!(pts.first(), pts.last());
        assert_eq!(mb.outline(id).len(), pts.len() - 1);
    }

    #[test]
    fn bshape_moves_range_to_tail() {
        let mut mb = builder();
        let a = mb.new_shape(Ppr::FLOOR);
        mb.push(C0);
        let _b = mb.new_shape(Ppr::WALL);
        mb.push(C0);
        mb.bshape(a, Ppr::ITEM);
        mb.push(C0);
        let sh = mb.shape(a).unwrap();
        assert_eq!((sh.s, sh.e, sh.prio), (2, 3, Ppr::ITEM));
    }

    #[test]
    fn clone_and_disable() {
        let mut mb = builder();
        let a = mb.new_shape(Ppr::FLOOR);
        mb.push(mb.geom.xpush0(0.1));
        let c = mb.clone_shape(a).unwrap();
        assert_eq!(mb.points_of(c), mb.points_of(a));
        mb.disable(a);
        assert!(mb.shape(a).unwrap().is_empty());
        assert_eq!(mb.points_of(c).len(), 1);
    }
}
