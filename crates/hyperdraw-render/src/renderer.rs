//! The frame driver: owns the persistent animation, fall and effect state
//! and the per-frame queue, and turns one cell at a time into draw records.
//!
//! A frame is `begin_frame`, any number of `draw_cell` (or one `draw_map`),
//! then `end_frame`, which flushes the deferred segment draws, the effects
//! and the aura, sorts the queue and hands it to the caller's sink.

use crate::anim::{AnimLayer, Animation, Animations};
use crate::aura::Aura;
use crate::ceiling::draw_ceiling;
use crate::color::{darkena, darkened_by, gradient};
use crate::config::RenderConfig;
use crate::depth::draw_depth;
use crate::draw::{CellCtx, FrameStats};
use crate::effects::Effects;
use crate::fall::{Falls, Pushdown, fall_distance, fall_duration, pushdown};
use crate::floor::{cell_hash, select_floor};
use crate::grid::{Radar, draw_grid_at, radar_grid};
use crate::queue::{DrawQueue, DrawRecord, DrawSink};
use crate::rig::{Rigger, SegmentKind, item_color, monster_color, monster_glyph, rig_for};
use crate::walls::{draw_feature, draw_snake_level, draw_wall, push_named};
use crate::worm::{SegmentCmd, WormQueue, tail_dist};
use hashbrown::{HashMap, HashSet};
use hyperdraw_geom::{C0, Hyperpoint, Transmatrix};
use hyperdraw_shapes::{Ppr, ShapeCatalog};
use hyperdraw_world::palette::wall_color;
use hyperdraw_world::{CellData, CellGraph, CellId, Depth, Item, Land, LandRules, Monster, Wall};
use std::collections::VecDeque;
use std::time::Instant;

/// Mirror images of mirror images stop here.
pub const MAX_MIRROR_DEPTH: u32 = 10;
/// Color mirror images are tinted towards.
const MIRROR_TINT: u32 = 0xC0_C0FF;
const HALF_MIRROR_COLOR: u32 = 0xC0_C0FF;
/// Disk radius the aura is spread around.
const AURA_RADIUS: f64 = 1.0;

/// What the last frame learned about the cells it drew.
#[derive(Clone, Debug, Default)]
pub struct FrameRenderState {
    /// Placement of every cell drawn directly this frame.
    pub placements: HashMap<CellId, Transmatrix>,
    /// Placements of the previous frame.
    pub prev_placements: HashMap<CellId, Transmatrix>,
    pub player_view: Option<Transmatrix>,
    pub radar: Radar,
    pub stats: FrameStats,
    mouse: Option<(CellId, f64)>,
    mouse2: Option<(CellId, f64)>,
    center: Option<(CellId, f64)>,
}

impl FrameRenderState {
    /// Cell nearest the mouse on screen.
    pub fn mouse_over(&self) -> Option<CellId> {
        self.mouse.map(|(c, _)| c)
    }

    /// Second nearest cell to the mouse.
    pub fn mouse_over2(&self) -> Option<CellId> {
        self.mouse2.map(|(c, _)| c)
    }

    /// Cell nearest the screen center.
    pub fn center_over(&self) -> Option<CellId> {
        self.center.map(|(c, _)| c)
    }

    fn begin(&mut self) {
        self.prev_placements = std::mem::take(&mut self.placements);
        self.player_view = None;
        self.radar.clear();
        self.stats = FrameStats::default();
        self.mouse = None;
        self.mouse2 = None;
        self.center = None;
    }

    fn track(&mut self, c: CellId, center: Hyperpoint, dist: f64, mouse: Option<[f64; 2]>) {
        if let Some([mx, my]) = mouse {
            let [x, y] = center.projected();
            let d = (x - mx).hypot(y - my);
            if d.is_finite() {
                match self.mouse {
                    Some((_, d1)) if d1 <= d => {
                        if self.mouse2.is_none_or(|(_, d2)| d < d2) {
                            self.mouse2 = Some((c, d));
                        }
                    }
                    _ => {
                        self.mouse2 = self.mouse;
                        self.mouse = Some((c, d));
                    }
                }
            }
        }
        if self.center.is_none_or(|(_, d0)| dist < d0) {
            self.center = Some((c, dist));
        }
    }
}

/// An aura contribution, kept so a cell placed again can take it back.
type AuraAdd = (Hyperpoint, u32, u32, u32);

/// Everything rebuilt every frame.
#[derive(Debug)]
struct Frame {
    queue: DrawQueue,
    state: FrameRenderState,
    worms: WormQueue,
    aura: Aura,
    aura_from: HashMap<CellId, Vec<AuraAdd>>,
    /// Cells counted in `stats.cells_drawn`.
    drawn: HashSet<CellId>,
}

impl Frame {
    /// Takes back everything `c` contributed from a farther placement.
    fn forget(&mut self, c: CellId) {
        self.queue.forget(c);
        self.worms.forget(c);
        for (h, col, fd, mirrors) in self.aura_from.remove(&c).unwrap_or_default() {
            self.aura.remove(h, col, fd, mirrors);
        }
        if self.drawn.remove(&c) {
            self.state.stats.cells_drawn -= 1;
        }
    }
}

/// Is the floor-level point `h` of a cell with circumradius `margin` inside
/// the view frustum of the solid display? The camera looks along +z.
pub fn in_frustum(h: Hyperpoint, tan_fov: f64, margin: f64) -> bool {
    let z = h[2];
    if z <= -margin {
        return false;
    }
    let lim = tan_fov * z.max(0.0) + margin;
    h[0].abs() <= lim && h[1].abs() <= lim
}

pub struct Renderer {
    cfg: RenderConfig,
    anims: Animations,
    falls: Falls,
    effects: Effects,
    ticks: u64,
    frame: Frame,
}

impl Renderer {
    pub fn new(cfg: RenderConfig) -> Self {
        let effects = Effects::new(cfg.particle_seed, cfg.particles);
        let aura = Aura::new(cfg.aura_str, cfg.aura_smoothen);
        Self {
            anims: Animations::new(),
            falls: Falls::new(),
            effects,
            ticks: 0,
            frame: Frame {
                queue: DrawQueue::new(),
                state: FrameRenderState::default(),
                worms: WormQueue::new(),
                aura,
                aura_from: HashMap::new(),
                drawn: HashSet::new(),
            },
            cfg,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> &FrameRenderState {
        &self.frame.state
    }

    /// Records queued so far this frame, unsorted.
    pub fn queue(&self) -> &DrawQueue {
        &self.frame.queue
    }

    pub fn animation(&self, layer: AnimLayer, c: CellId) -> Option<&Animation> {
        self.anims.get(layer, c)
    }

    pub fn animations(&self) -> &Animations {
        &self.anims
    }

    pub fn falls(&self) -> &Falls {
        &self.falls
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Starts a frame at `ticks` milliseconds.
    pub fn begin_frame(&mut self, ticks: u64) {
        self.ticks = ticks;
        let f = &mut self.frame;
        f.queue.clear();
        f.worms.clear();
        f.aura.reset();
        f.aura_from.clear();
        f.drawn.clear();
        f.state.begin();
    }

    /// Queues everything standing on `c`, placed at `v`. `mirrored` tells
    /// that the placement reverses orientation.
    ///
    /// A cell reached again through a closer placement is redrawn from there
    /// and its earlier records are dropped; a farther one is ignored.
    pub fn draw_cell<W: CellGraph + LandRules>(&mut self, world: &W, cat: &ShapeCatalog, c: CellId, v: &Transmatrix, mirrored: bool) {
        let Some(cd) = world.cell(c) else { return };
        if !v.is_finite() {
            return;
        }
        let g = cat.geom();
        let center = *v * C0;
        let dist = g.hdist0(center);
        if let Some(old) = self.frame.state.placements.get(&c) {
            if g.hdist0(*old * C0) <= dist {
                return;
            }
            self.frame.forget(c);
        }
        let state = &mut self.frame.state;
        state.placements.insert(c, *v);
        state.track(c, center, dist, self.cfg.mouse);
        if cd.monster == Monster::Player {
            state.player_view = Some(*v);
        }

        let before = self.frame.state.stats.cells_drawn;
        self.frame.queue.set_owner(Some(c));
        self.draw_cell_at(world, cat, c, *v, mirrored, 0);
        self.frame.queue.set_owner(None);
        if self.frame.state.stats.cells_drawn > before {
            self.frame.drawn.insert(c);
        }
    }

    /// Draws every cell within `radius` steps of `root`, placing `root` at
    /// `v0` and the others through the graph's relative transforms.
    pub fn draw_map<W: CellGraph + LandRules>(&mut self, world: &W, cat: &ShapeCatalog, root: CellId, v0: &Transmatrix, radius: u32) {
        let mut seen = HashSet::new();
        let mut todo = VecDeque::new();
        seen.insert(root);
        todo.push_back((root, *v0, false, 0u32));
        while let Some((c, v, mirrored, steps)) = todo.pop_front() {
            self.draw_cell(world, cat, c, &v, mirrored);
            if steps >= radius {
                continue;
            }
            for d in 0..world.degree(c) {
                let Some(n) = world.neighbor(c, d) else { continue };
                if !seen.insert(n) {
                    continue;
                }
                let m = mirrored ^ world.neighbor_mirrored(c, d);
                todo.push_back((n, v * world.relative(c, d), m, steps + 1));
            }
        }
    }

    fn draw_cell_at<W: CellGraph + LandRules>(
        &mut self,
        world: &W,
        cat: &ShapeCatalog,
        c: CellId,
        v: Transmatrix,
        mirrored: bool,
        depth: u32,
    ) {
        let Some(cd) = world.cell(c).copied() else { return };
        if !v.is_finite() {
            return;
        }
        let g = cat.geom();
        let p = cat.params();
        let center = v * C0;
        let dist = g.hdist0(center);

        let sf = cat.scalefactor();
        if p.solid && self.cfg.tan_fov > 0.0 {
            let h = p.mscale_point(g, center, cat.levels().floor);
            if !in_frustum(h, self.cfg.tan_fov, cat.tiling().circumradius(g)) {
                let state = &mut self.frame.state;
                state.stats.clipped += 1;
                if cd.monster != Monster::None {
                    state.radar.add_point(g, &v, monster_glyph(cd.monster), monster_color(cd.monster), self.cfg.radar_range, sf);
                }
                return;
            }
        }

        if let Some((src, t)) = world.reflect(c) {
            if depth < MAX_MIRROR_DEPTH {
                self.frame.state.stats.mirrored += 1;
                self.draw_cell_at(world, cat, src, v * t, !mirrored, depth + 1);
                return;
            }
            log::trace!(target: "render", "mirror chain at {:?} cut at depth {}", c, depth);
        }

        let detail = if dist < self.cfg.highdetail {
            2
        } else if dist < self.cfg.middetail {
            1
        } else {
            0
        };
        let fd = 2 - detail;
        let (wcol, fcol) = self.cell_colors(world, c, &cd, depth);

        let Some(sel) = select_floor(world, cat, &self.cfg, c) else { return };
        let fs = cat.floor(sel.style, world.degree(c) as u32);

        let Renderer { cfg, anims, falls, ticks, frame, .. } = self;
        let cfg: &RenderConfig = cfg;
        let ticks = *ticks;
        let Frame { queue, state, worms, aura, aura_from, .. } = frame;
        let FrameRenderState { radar, stats, .. } = state;

        if aura.enabled() {
            aura.add(center, fcol, fd, depth);
            if let Some(owner) = queue.owner() {
                aura_from.entry(owner).or_default().push((center, fcol, fd, depth));
            }
        }

        let mut ctx = CellCtx { q: queue, cat, cfg, fs, sel, v, detail, ticks, stats };
        let high = cd.wall.is_high() && (cfg.wall_spatial || p.solid);
        let tree_on_floor = cd.wall == Wall::BigTree && (ctx.escher() || p.solid);
        let sunk = draw_depth(&mut ctx, world, c, fcol, fd);
        if !sunk && (!high || tree_on_floor) {
            draw_floor(&mut ctx, world, c, fcol, fd);
        }
        if cd.wall.is_high() || cd.wall == Wall::RoundTable {
            draw_wall(&mut ctx, world, c, cd.wall, wcol, fd);
        }
        draw_snake_level(&mut ctx, world, c, fcol, wcol, fd);
        draw_feature(&mut ctx, world, c, wcol);
        draw_ceiling(&mut ctx, world, c, cell_hash(c), fcol, wcol, fd);

        let rg = Rigger { cat, spatial: cfg.monster_spatial, detail, ticks, fd };

        if let Some((tf, tm, fa)) = falls.progress(c, ticks, fall_duration(g)) {
            let keep_below_bottom = world.chasm_graph(c) == Depth::Chasm;
            if let Some(t) = tf {
                let m = ctx.q.mark();
                draw_floor(&mut ctx, world, c, fcol, fd);
                if fa.wall.is_high() {
                    draw_wall(&mut ctx, world, c, fa.wall, wall_color(fa.wall, cd.land), fd);
                }
                pushdown(ctx.q.since(m), cat, Pushdown { down: fall_distance(t), rezoom: true, repriority: true, keep_below_bottom });
            }
            if let Some(t) = tm {
                if let Some(rig) = rig_for(fa.monster) {
                    let m = ctx.q.mark();
                    rg.draw_rig(ctx.q, &rig, &v, monster_color(fa.monster), 0.0, 0.0);
                    pushdown(ctx.q.since(m), cat, Pushdown { down: fall_distance(t), rezoom: false, repriority: true, keep_below_bottom });
                }
            }
        }

        let facing = |d: Option<u8>| match d {
            Some(d) if (d as usize) < world.degree(c) => Transmatrix::spin(-world.direction_angle(c, d as usize)),
            _ => Transmatrix::IDENTITY,
        };

        if cd.wall == Wall::Boat {
            let vb = match anims.apply(g, AnimLayer::Boat, c, ticks, cfg.mspeed) {
                Some(ps) => v * ps.transform,
                None => v * facing(cd.mondir),
            };
            rg.draw_boat(ctx.q, &vb);
        }
        if cd.item != Item::None {
            rg.draw_item(ctx.q, cd.item, &v, item_color(cd.item));
        }
        if cd.monster != Monster::None {
            let layer = if cd.monster.is_segmented() || cd.monster == Monster::Kraken { AnimLayer::Big } else { AnimLayer::Small };
            let (vm, footphase, turned) = match anims.apply(g, layer, c, ticks, cfg.mspeed) {
                Some(ps) => (v * ps.transform, ps.footphase, true),
                None => (v, 0.0, false),
            };
            let mut col = monster_color(cd.monster);
            if cd.stuntime > 0 {
                col = darkened_by(col, 1);
            }
            if cd.monster.is_segmented() {
                let (kind, face) = segment_pose(world, c, &cd);
                let mut recs: Vec<DrawRecord> = Vec::new();
                rg.draw_segment(&mut recs, cd.monster, kind, &(vm * face), col);
                let dist = tail_dist(world, c);
                let owner = ctx.q.owner().unwrap_or(c);
                for rec in recs {
                    worms.add(dist, SegmentCmd { cell: owner, rec });
                }
            } else {
                let vf = if turned { vm } else { vm * facing(cd.mondir) };
                match cd.monster {
                    Monster::Kraken => rg.draw_kraken(ctx.q, &vf, col),
                    Monster::Mimic => {
                        rg.draw_mimic(ctx.q, &vf, col, footphase);
                    }
                    m => {
                        if let Some(rig) = rig_for(m) {
                            rg.draw_rig(ctx.q, &rig, &vf, col, footphase, c.0 as f64);
                        }
                    }
                }
                if cd.stuntime > 0 {
                    rg.stun_stars(ctx.q, &vf, cd.stuntime);
                }
            }
            if p.solid {
                radar.add_point(g, &vm, monster_glyph(cd.monster), col, cfg.radar_range, sf);
            }
        }

        if cfg.grid {
            draw_grid_at(ctx.q, world, c, &v, fd);
        }
        if p.solid {
            radar_grid(radar, world, c, &v, cfg.radar_range, sf);
        }
        ctx.stats.cells_drawn += 1;
    }

    /// `(wall, floor)` colors of `c` after mirror, peace, rose, minefield
    /// tinting.
    fn cell_colors<W: CellGraph + LandRules>(&self, world: &W, c: CellId, cd: &CellData, depth: u32) -> (u32, u32) {
        let (mut wcol, mut fcol) = world.colors(c);
        if depth > 0 {
            let k = (0.2 * depth as f64).min(1.0);
            wcol = gradient(wcol, MIRROR_TINT, 0.0, k, 1.0);
            fcol = gradient(fcol, MIRROR_TINT, 0.0, k, 1.0);
        }
        if self.cfg.peace && cd.item != Item::None {
            let pulse = 0.5 + 0.5 * (self.ticks as f64 / 500.0).sin();
            fcol = gradient(fcol, 0xFF_FFFF, 0.0, 0.25 * pulse, 1.0);
        }
        if let Some(rd) = world.rose_dist(c) {
            if rd < 3 {
                fcol = gradient(fcol, 0xFF_C0C0, 0.0, (3 - rd) as f64, 6.0);
            }
        }
        if cd.land == Land::Minefield && cd.wall == Wall::None && world.mines_around(c) == 0 {
            fcol = gradient(fcol, 0xFF_FFFF, 0.0, 0.25, 1.0);
        }
        (wcol, fcol)
    }

    /// Flushes the frame into `sink`, priority order, and returns its
    /// counters.
    pub fn end_frame(&mut self, cat: &ShapeCatalog, sink: &mut impl DrawSink) -> FrameStats {
        let start = Instant::now();
        let Renderer { effects, frame, ticks, .. } = self;
        let Frame { queue, state, worms, aura, .. } = frame;
        effects.draw(queue, &state.placements, cat, *ticks);
        let order = worms.flush(queue);
        if !cat.params().solid {
            if let Some(rec) = aura.draw(AURA_RADIUS, 0) {
                queue.push(rec);
            }
        }
        queue.sort();
        state.stats.records = queue.len();
        queue.drain_into(sink);
        let s = state.stats;
        log::debug!(
            target: "render",
            "frame t={} cells={} records={} clipped={} panels={} mirrored={} segments={} ms={}",
            ticks,
            s.cells_drawn,
            s.records,
            s.clipped,
            s.panels,
            s.mirrored,
            order.len(),
            start.elapsed().as_millis()
        );
        s
    }

    /// Where the occupant of `src` is drawn from `tgt`'s point of view, and
    /// whether the step reverses orientation.
    fn placement_between<W: CellGraph>(&self, world: &W, src: CellId, tgt: CellId, dir: Option<usize>) -> Option<(Transmatrix, bool)> {
        if let Some(d) = dir.filter(|&d| world.neighbor(src, d) == Some(tgt)) {
            let back = world.neighbor_spin(src, d);
            return Some((world.relative(tgt, back), world.neighbor_mirrored(src, d)));
        }
        let st = &self.frame.state;
        let find = |c: CellId| st.placements.get(&c).or_else(|| st.prev_placements.get(&c));
        let (ps, pt) = (find(src)?, find(tgt)?);
        Some((pt.try_inverse()? * *ps, false))
    }

    /// The occupant of `src` moved to `tgt`; `dir` is the step direction when
    /// the cells are adjacent.
    pub fn animate_movement<W: CellGraph>(&mut self, world: &W, src: CellId, tgt: CellId, layer: AnimLayer, dir: Option<usize>) {
        if !self.cfg.animations_enabled() {
            return;
        }
        match self.placement_between(world, src, tgt, dir) {
            Some((t, mirrored)) => self.anims.movement(layer, src, tgt, t, mirrored, self.ticks),
            None => log::debug!(target: "anim", "no placement for move {:?} -> {:?}", src, tgt),
        }
    }

    /// Like `animate_movement`, but collected until `commit_animations` so
    /// that moves swapping occupants do not overwrite each other.
    pub fn ind_animate_movement<W: CellGraph>(&mut self, world: &W, src: CellId, tgt: CellId, layer: AnimLayer, dir: Option<usize>) {
        if !self.cfg.animations_enabled() {
            return;
        }
        if let Some((t, mirrored)) = self.placement_between(world, src, tgt, dir) {
            self.anims.ind_movement(layer, src, tgt, t, mirrored, self.ticks);
        }
    }

    pub fn commit_animations(&mut self, layer: AnimLayer) {
        self.anims.commit(layer);
    }

    /// The occupant of `src` lunges towards its neighbor in direction `dir`.
    pub fn animate_attack<W: CellGraph>(&mut self, world: &W, src: CellId, dir: usize, layer: AnimLayer) {
        if !self.cfg.animations_enabled() || dir >= world.degree(src) {
            return;
        }
        let t = world.relative(src, dir);
        self.anims.attack(world.geometry(), layer, src, t, self.ticks);
    }

    /// The occupants of `a` and `b` traded places.
    pub fn animate_replacement<W: CellGraph>(&mut self, world: &W, a: CellId, b: CellId, layer: AnimLayer, dir: Option<usize>) {
        if !self.cfg.animations_enabled() {
            return;
        }
        if let Some((t, mirrored)) = self.placement_between(world, a, b, dir) {
            self.anims.replacement(layer, a, b, t, mirrored, self.ticks);
        }
    }

    pub fn clear_animations(&mut self) {
        self.anims.clear();
    }

    pub fn draw_flash(&mut self, c: CellId) {
        self.effects.flash(c, self.ticks);
    }

    pub fn draw_big_flash(&mut self, c: CellId) {
        self.effects.big_flash(c, self.ticks);
    }

    pub fn draw_particle(&mut self, c: CellId, col: u32, maxspeed: u32) {
        self.effects.particle(c, col, maxspeed, self.ticks);
    }

    pub fn draw_particles(&mut self, c: CellId, col: u32, qty: u32, maxspeed: u32) {
        self.effects.particles(c, col, qty, maxspeed, self.ticks);
    }

    pub fn draw_fire_particles(&mut self, c: CellId, qty: u32, maxspeed: u32) {
        self.effects.fire_particles(c, qty, maxspeed, self.ticks);
    }

    /// The floor of `c`, with `wall` and `monster` on it, starts falling.
    pub fn falling_floor_animation(&mut self, c: CellId, wall: Wall, monster: Monster) {
        self.falls.floor(c, wall, monster, self.ticks);
    }

    pub fn falling_monster_animation(&mut self, c: CellId, monster: Monster) {
        self.falls.monster(c, monster, self.ticks);
    }

    /// Adds a directional contribution to this frame's aura.
    pub fn add_aura_special(&mut self, h: Hyperpoint, col: u32, dir: i32) {
        self.frame.aura.add_special(h, col, dir);
    }
}

/// Floor of `c`: the user shape, a half floor, or the style's outline.
fn draw_floor<W: CellGraph>(ctx: &mut CellCtx<'_>, world: &W, c: CellId, fcol: u32, fd: u32) {
    let color = darkena(fcol, fd, 0xFF);
    if let Some(shape) = ctx.sel.user_shape {
        let transform = ctx.vspin();
        ctx.q.push(DrawRecord::Poly { shape, transform, color, prio: Ppr::FLOOR });
        return;
    }
    if let Some(half) = ctx.sel.half {
        let t = ctx.v * Transmatrix::spin(-world.direction_angle(c, half.dir));
        push_named(ctx, &format!("HalfFloor{}", half.variant), t, color, Ppr::FLOOR);
        if half.mirror {
            push_named(ctx, &format!("HalfMirror{}", half.variant), t, darkena(HALF_MIRROR_COLOR, fd, 0xC0), Ppr::WALL);
        }
        return;
    }
    if let Some(fs) = ctx.fs {
        let transform = ctx.vspin();
        ctx.q.push(DrawRecord::Poly { shape: fs.b, transform, color, prio: Ppr::FLOOR });
    }
}

/// Which segment `c` holds and how it is turned. Heads and middles face
/// away from the tail; the last segment faces the segment pointing at it.
fn segment_pose<W: CellGraph + LandRules>(world: &W, c: CellId, cd: &CellData) -> (SegmentKind, Transmatrix) {
    let away = |d: usize| Transmatrix::spin(-world.direction_angle(c, d)) * Transmatrix::pispin();
    let head = matches!(cd.monster, Monster::Worm | Monster::Dragon | Monster::Tentacle);
    match cd.mondir {
        Some(d) if (d as usize) < world.degree(c) => {
            let kind = if head { SegmentKind::Head } else { SegmentKind::Middle };
            (kind, away(d as usize))
        }
        _ if head => (SegmentKind::Head, Transmatrix::IDENTITY),
        _ => {
            let prev = (0..world.degree(c)).find(|&d| {
                world.neighbor(c, d).is_some_and(|n| {
                    world.cell(n).is_some_and(|nd| {
                        nd.monster.is_segmented() && nd.mondir.and_then(|md| world.neighbor(n, md as usize)) == Some(c)
                    })
                })
            });
            let face = prev.map_or(Transmatrix::IDENTITY, |d| Transmatrix::spin(-world.direction_angle(c, d)));
            (SegmentKind::End, face)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::{Geometry, RegularTiling};
    use hyperdraw_shapes::{ModelParams, SilhouetteLibrary};
    use hyperdraw_world::Map;

    fn setup(solid: bool) -> (Map, ShapeCatalog) {
        let map = Map::ball(RegularTiling::new(7, 3), 2);
        let params = ModelParams { solid, ..ModelParams::default() };
        let cat = ShapeCatalog::build(Geometry::Hyperbolic, map.tiling(), params, &SilhouetteLibrary::builtin(), &[7]);
        (map, cat)
    }

    fn config() -> RenderConfig {
        RenderConfig::from_toml_str("").unwrap()
    }

    #[test]
    fn frustum() {
        assert!(in_frustum(Hyperpoint::new(0.0, 0.0, 1.0, 1.0), 1.0, 0.1));
        assert!(in_frustum(Hyperpoint::new(1.05, 0.0, 1.0, 1.0), 1.0, 0.1));
        assert!(!in_frustum(Hyperpoint::new(2.0, 0.0, 1.0, 1.0), 1.0, 0.1));
        assert!(!in_frustum(Hyperpoint::new(0.0, 0.0, -1.0, 1.0), 1.0, 0.1));
    }

    #[test]
    fn cells_are_drawn_once_per_frame() {
        let (map, cat) = setup(false);
        let mut r = Renderer::new(config());
        r.begin_frame(0);
        r.draw_cell(&map, &cat, CellId(0), &Transmatrix::IDENTITY, false);
        r.draw_cell(&map, &cat, CellId(0), &Transmatrix::IDENTITY, false);
        assert_eq!(r.state().stats.cells_drawn, 1);
        assert_eq!(r.state().center_over(), Some(CellId(0)));
        let mut out: Vec<DrawRecord> = Vec::new();
        let stats = r.end_frame(&cat, &mut out);
        assert_eq!(stats.records, out.len());
        assert!(out.windows(2).all(|w| w[0].prio() <= w[1].prio()));
    }

    #[test]
    fn draw_map_reaches_the_whole_ball() {
        let (map, cat) = setup(false);
        let mut r = Renderer::new(config());
        r.begin_frame(0);
        r.draw_map(&map, &cat, CellId(0), &Transmatrix::IDENTITY, 2);
        assert_eq!(r.state().placements.len(), map.cell_count());
        r.begin_frame(16);
        assert!(r.state().placements.is_empty());
        assert_eq!(r.state().prev_placements.len(), map.cell_count());
    }

    #[test]
    fn mirror_chain_is_bounded() {
        let (mut map, cat) = setup(false);
        map.set_mirror_image(CellId(0), CellId(0));
        let mut r = Renderer::new(config());
        r.begin_frame(0);
        r.draw_cell(&map, &cat, CellId(0), &Transmatrix::IDENTITY, false);
        assert_eq!(r.state().stats.mirrored, MAX_MIRROR_DEPTH as usize);
        assert_eq!(r.state().stats.cells_drawn, 1);
    }

    #[test]
    fn mouse_tracks_nearest_two() {
        let (map, cat) = setup(false);
        let cfg = RenderConfig { mouse: Some([0.0, 0.0]), ..config() };
        let mut r = Renderer::new(cfg);
        r.begin_frame(0);
        r.draw_map(&map, &cat, CellId(0), &Transmatrix::IDENTITY, 1);
        assert_eq!(r.state().mouse_over(), Some(CellId(0)));
        let second = r.state().mouse_over2().unwrap();
        assert_ne!(second, CellId(0));
        assert_eq!(map.distance(second), Some(1));
    }

    #[test]
    fn player_view_is_recorded() {
        let (mut map, cat) = setup(false);
        map.set_monster(CellId(0), Monster::Player, None);
        let mut r = Renderer::new(config());
        r.begin_frame(0);
        r.draw_cell(&map, &cat, CellId(0), &Transmatrix::IDENTITY, false);
        assert_eq!(r.state().player_view, Some(Transmatrix::IDENTITY));
    }

    #[test]
    fn clipped_cells_emit_nothing() {
        let (map, cat) = setup(true);
        let cfg = RenderConfig { tan_fov: 0.5, ..config() };
        let mut r = Renderer::new(cfg);
        r.begin_frame(0);
        let turned = Transmatrix::cspin(0, 2, std::f64::consts::PI) * Geometry::Hyperbolic.zpush(-1.0);
        let far_side = turned * Geometry::Hyperbolic.xpush(3.0);
        r.draw_cell(&map, &cat, CellId(0), &far_side, false);
        assert_eq!(r.state().stats.clipped, 1);
        assert!(r.queue().is_empty());
    }

    #[test]
    fn falling_floor_is_pushed_down() {
        let (mut map, cat) = setup(false);
        map.set_wall(CellId(0), Wall::Chasm);
        let mut r = Renderer::new(config());
        r.begin_frame(0);
        r.falling_floor_animation(CellId(0), Wall::None, Monster::None);
        r.begin_frame(500);
        r.draw_cell(&map, &cat, CellId(0), &Transmatrix::IDENTITY, false);
        assert!(r.queue().records().iter().any(|rec| rec.prio() == Ppr::LAKEWALL_FALLANIM
            || rec.prio() == Ppr::INLAKEWALL_FALLANIM
            || rec.prio() == Ppr::BELOWBOTTOM_FALLANIM));
        r.begin_frame(10_000);
        r.draw_cell(&map, &cat, CellId(0), &Transmatrix::IDENTITY, false);
        assert!(r.falls().is_empty());
    }
}
