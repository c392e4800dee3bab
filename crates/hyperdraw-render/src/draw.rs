//! What every per-cell emitter is handed: the queue, the catalog and the
//! cell's own placement and floor.

use crate::config::RenderConfig;
use crate::floor::FloorSelection;
use crate::queue::DrawQueue;
use hyperdraw_geom::Transmatrix;
use hyperdraw_shapes::{FloorShape, ShapeCatalog};

/// Counters for one frame, logged at `debug` by `end_frame`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub cells_drawn: usize,
    pub records: usize,
    pub clipped: usize,
    pub panels: usize,
    pub mirrored: usize,
}

pub(crate) struct CellCtx<'a> {
    pub q: &'a mut DrawQueue,
    pub cat: &'a ShapeCatalog,
    pub cfg: &'a RenderConfig,
    pub fs: Option<&'a FloorShape>,
    pub sel: FloorSelection,
    pub v: Transmatrix,
    /// 2 near the camera, 0 far away.
    pub detail: u32,
    pub ticks: u64,
    pub stats: &'a mut FrameStats,
}

impl CellCtx<'_> {
    /// Layered walls replace side panels; only in the flat display.
    #[inline]
    pub fn escher(&self) -> bool {
        self.cfg.escher && !self.cat.params().solid
    }

    /// Floor transform: the placement turned by the floor spin.
    #[inline]
    pub fn vspin(&self) -> Transmatrix {
        self.v * self.sel.spin
    }

    /// Places a flat, floor-level shape at the level with factor `fac`.
    pub fn at_factor(&self, v: &Transmatrix, fac: f64) -> Transmatrix {
        self.cat.params().mscale(self.cat.geom(), v, fac)
    }
}
