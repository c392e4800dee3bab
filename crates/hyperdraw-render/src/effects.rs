//! Short-lived effects: expanding flash rings and particle sparks.
//!
//! Effects live in a small pool owned by the renderer. Each frame draws the
//! live ones at their cell's placement and drops the expired ones.

use crate::color::{darkena, fire_gradient, gradient};
use crate::queue::{DrawRecord, DrawSink};
use hashbrown::HashMap;
use hyperdraw_geom::{C0, Transmatrix};
use hyperdraw_shapes::{Ppr, ShapeCatalog};
use hyperdraw_world::CellId;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Color of the ordinary flash.
pub const FLASH_COLOR: u32 = 0xFF_FFFF;
pub const BIG_FLASH_COLOR: u32 = 0xC0_FF00;
/// Milliseconds a particle lives.
const PARTICLE_LIFE: u64 = 300;
/// Upper bound on live effects; older particles go first when it is hit.
pub const MAX_EFFECTS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    Flash,
    BigFlash,
    Particle { angle: f64, speed: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub start: u64,
    pub cell: CellId,
    pub color: u32,
    pub kind: EffectKind,
}

impl Effect {
    /// Milliseconds after which the effect is dropped.
    pub fn lifetime(&self) -> u64 {
        match self.kind {
            EffectKind::Flash => 1000,
            EffectKind::BigFlash => 2000,
            EffectKind::Particle { .. } => PARTICLE_LIFE,
        }
    }
}

pub struct Effects {
    live: Vec<Effect>,
    rng: SmallRng,
    particles: bool,
}

impl Effects {
    pub fn new(seed: u64, particles: bool) -> Self {
        Self { live: Vec::new(), rng: SmallRng::seed_from_u64(seed), particles }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn live(&self) -> &[Effect] {
        &self.live
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }

    fn push(&mut self, e: Effect) {
        if self.live.len() >= MAX_EFFECTS {
            if let Some(i) = self.live.iter().position(|e| matches!(e.kind, EffectKind::Particle { .. })) {
                self.live.swap_remove(i);
            } else {
                return;
            }
        }
        self.live.push(e);
    }

    pub fn flash(&mut self, c: CellId, ticks: u64) {
        self.push(Effect { start: ticks, cell: c, color: FLASH_COLOR, kind: EffectKind::Flash });
    }

    pub fn big_flash(&mut self, c: CellId, ticks: u64) {
        self.push(Effect { start: ticks, cell: c, color: BIG_FLASH_COLOR, kind: EffectKind::BigFlash });
    }

    /// One spark of 0xRRGGBB `col` flying off in a random direction with a
    /// speed in `1..=maxspeed`.
    pub fn particle(&mut self, c: CellId, col: u32, maxspeed: u32, ticks: u64) {
        if !self.particles {
            return;
        }
        let speed = 1 + self.rng.gen_range(0..maxspeed.max(1));
        let angle = self.rng.gen_range(0..1000) as f64;
        self.push(Effect { start: ticks, cell: c, color: col, kind: EffectKind::Particle { angle, speed } });
    }

    pub fn particles(&mut self, c: CellId, col: u32, qty: u32, maxspeed: u32, ticks: u64) {
        for _ in 0..qty {
            self.particle(c, col, maxspeed, ticks);
        }
    }

    /// Sparks running from yellow to red.
    pub fn fire_particles(&mut self, c: CellId, qty: u32, maxspeed: u32, ticks: u64) {
        for i in 0..qty {
            let t = if qty > 1 { i as f64 / (qty - 1) as f64 } else { 0.0 };
            self.particle(c, fire_gradient(t), maxspeed, ticks);
        }
    }

    /// Queues every live effect whose cell is placed this frame and drops the
    /// expired ones. Particles whose cell is not placed are dropped too.
    pub fn draw(&mut self, sink: &mut impl DrawSink, placements: &HashMap<CellId, Transmatrix>, cat: &ShapeCatalog, ticks: u64) {
        let g = cat.geom();
        let hexf = cat.tiling().circumradius(g);
        let particle = cat.id("Particle");
        let before = self.live.len();
        self.live.retain(|f| {
            let tim = ticks.saturating_sub(f.start);
            let placed = placements.get(&f.cell);
            match f.kind {
                EffectKind::Particle { angle, speed } => {
                    let Some(v) = placed else { return false };
                    if tim > PARTICLE_LIFE {
                        return false;
                    }
                    if let Some(shape) = particle {
                        let a = 255u64.saturating_sub(tim * 255 / PARTICLE_LIFE) as u8;
                        let dist = speed as f64 * tim as f64 * cat.scalefactor() / 50000.0;
                        let transform = *v * Transmatrix::spin(angle) * g.xpush(dist);
                        sink.push(DrawRecord::Poly { shape, transform, color: darkena(f.color, 0, a), prio: Ppr::PARTICLE });
                    }
                    true
                }
                EffectKind::Flash | EffectKind::BigFlash => {
                    if tim > f.lifetime() {
                        return false;
                    }
                    if let Some(v) = placed {
                        for (rad, color) in flash_rings(f, tim, hexf) {
                            sink.push(DrawRecord::Circle { center: *v * C0, radius: rad, color, prio: Ppr::LINE });
                        }
                    }
                    true
                }
            }
        });
        if before != self.live.len() {
            log::trace!(target: "render", "effects expired={} live={}", before - self.live.len(), self.live.len());
        }
    }
}

/// Rings of a flash `tim` milliseconds old: one every 50 ms over its recent
/// past, growing then slowing, fading to black late in its life.
pub fn flash_rings(f: &Effect, tim: u64, hexf: f64) -> Vec<(f64, u32)> {
    let big = f.kind == EffectKind::BigFlash;
    let (trail, scale, fade_from, fade_to) = if big { (250, 2000.0, 1000, 2200) } else { (150, 1000.0, 500, 1100) };
    let mut rings = Vec::new();
    let first = tim.saturating_sub(trail);
    for u in first..=tim {
        if (tim - u) % 50 != 0 {
            continue;
        }
        let r = u as f64 * 3.0 / scale;
        let r = if big { r * (5.0 - r) * 1.25 } else { r * (5.0 - r) / 2.0 };
        let mut col = f.color;
        if u > fade_from {
            col = gradient(col, 0, fade_from as f64, u as f64, fade_to as f64);
        }
        rings.push((r * hexf, darkena(col, 0, 0xFF)));
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flash(kind: EffectKind) -> Effect {
        Effect { start: 0, cell: CellId(0), color: FLASH_COLOR, kind }
    }

    #[test]
    fn flash_ring_count() {
        // rings at 0, 50, 100, 150 ms back
        assert_eq!(flash_rings(&flash(EffectKind::Flash), 400, 1.0).len(), 4);
        assert_eq!(flash_rings(&flash(EffectKind::BigFlash), 400, 1.0).len(), 6);
        assert_eq!(flash_rings(&flash(EffectKind::Flash), 20, 1.0).len(), 1);
    }

    #[test]
    fn flash_fades_late() {
        let early = flash_rings(&flash(EffectKind::Flash), 100, 1.0);
        assert!(early.iter().all(|&(_, c)| c == 0xFFFF_FFFF));
        let late = flash_rings(&flash(EffectKind::Flash), 1000, 1.0);
        assert!(late.iter().all(|&(_, c)| c != 0xFFFF_FFFF));
    }

    #[test]
    fn particles_are_seeded() {
        let mut a = Effects::new(7, true);
        let mut b = Effects::new(7, true);
        a.particles(CellId(1), 0xFF0000, 5, 100, 0);
        b.particles(CellId(1), 0xFF0000, 5, 100, 0);
        assert_eq!(a.live(), b.live());
        assert_eq!(a.len(), 5);
        let mut off = Effects::new(7, false);
        off.fire_particles(CellId(1), 5, 100, 0);
        assert!(off.is_empty());
    }

    #[test]
    fn pool_is_bounded() {
        let mut e = Effects::new(1, true);
        e.particles(CellId(0), 0xFF, MAX_EFFECTS as u32 + 10, 10, 0);
        assert_eq!(e.len(), MAX_EFFECTS);
    }
}
