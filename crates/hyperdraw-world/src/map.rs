//! A finite ball of a regular tiling, grown breadth-first from one cell, with
//! noise-generated lands.

use crate::cell::{CellData, CellId, Land, Monster, Wall};
use crate::config::MapConfig;
use crate::graph::CellGraph;
use crate::palette::{floor_color, wall_color};
use crate::rules::{Depth, LandRules};
use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;
use hyperdraw_geom::{C0, Geometry, Hyperpoint, RegularTiling, Transmatrix};
use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::time::Instant;

/// Two cell centers closer than this are the same cell.
const SAME_CELL: f64 = 1e-3;
/// Bucket size of the position hash; larger than `SAME_CELL`.
const BUCKET: f64 = 1e-2;

type BucketKey = (i64, i64, i64);

fn bucket_of(h: Hyperpoint) -> BucketKey {
    let q = |v: f64| (v / BUCKET).round() as i64;
    (q(h[0]), q(h[1]), q(h[3]))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Link {
    to: CellId,
    back: u8,
}

pub struct Map {
    geom: Geometry,
    tiling: RegularTiling,
    cells: Vec<CellData>,
    /// Placement of each cell relative to cell 0.
    frames: Vec<Transmatrix>,
    links: Vec<Vec<Option<Link>>>,
    dist: Vec<u32>,
    /// Mirror images: the cell shown and the transform placing it.
    mirrored: HashMap<CellId, (CellId, Transmatrix)>,
}

impl Map {
    /// All cells within `radius` steps of the origin, in the tiling's natural
    /// geometry, with empty contents.
    pub fn ball(tiling: RegularTiling, radius: u32) -> Map {
        let t0 = Instant::now();
        let geom = tiling.natural_geometry();
        let p = tiling.p.max(3) as usize;
        let mut map = Map {
            geom,
            tiling,
            cells: vec![CellData::default()],
            frames: vec![Transmatrix::IDENTITY],
            links: vec![vec![None; p]],
            dist: vec![0],
            mirrored: HashMap::new(),
        };
        let mut index: HashMap<BucketKey, Vec<CellId>> = HashMap::new();
        index.entry(bucket_of(C0)).or_default().push(CellId(0));

        let mut queue = VecDeque::from([CellId(0)]);
        while let Some(c) = queue.pop_front() {
            for d in 0..p {
                if map.links[c.index()][d].is_some() {
                    continue;
                }
                let guess = map.frames[c.index()] * tiling.relative(geom, d, 0);
                let at = guess * C0;
                let found = map.find_near(&index, at);
                let n = match found {
                    Some(n) => n,
                    None if map.dist[c.index()] < radius => {
                        let n = CellId(map.cells.len() as u32);
                        map.cells.push(CellData::default());
                        map.frames.push(guess);
                        map.links.push(vec![None; p]);
                        map.dist.push(map.dist[c.index()] + 1);
                        index.entry(bucket_of(at)).or_default().push(n);
                        queue.push_back(n);
                        n
                    }
                    None => continue,
                };
                let back = map.direction_towards(n, map.frames[c.index()] * C0);
                map.links[c.index()][d] = Some(Link { to: n, back: back as u8 });
                map.links[n.index()][back] = Some(Link { to: c, back: d as u8 });
            }
        }
        log::info!(
            target: "perf",
            "ms={:.2} map_ball p={} q={} radius={} cells={}",
            t0.elapsed().as_secs_f64() * 1000.0,
            tiling.p,
            tiling.q,
            radius,
            map.cells.len()
        );
        map
    }

    /// A ball of `cfg.radius` with lands, walls and water taken from noise.
    pub fn generate(cfg: &MapConfig) -> Map {
        let mut map = Map::ball(RegularTiling::new(cfg.p, cfg.q), cfg.radius);
        map.paint_lands(cfg);
        map
    }

    fn find_near(&self, index: &HashMap<BucketKey, Vec<CellId>>, h: Hyperpoint) -> Option<CellId> {
        let (bx, by, bw) = bucket_of(h);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dw in -1..=1 {
                    let Some(list) = index.get(&(bx + dx, by + dy, bw + dw)) else { continue };
                    for &c in list {
                        if self.geom.hdist(self.frames[c.index()] * C0, h) < SAME_CELL {
                            return Some(c);
                        }
                    }
                }
            }
        }
        None
    }

    /// The direction of `c` whose neighbor center is `target` (absolute).
    fn direction_towards(&self, c: CellId, target: Hyperpoint) -> usize {
        let p = self.tiling.p.max(3) as usize;
        let local = self.frames[c.index()].inverse() * target;
        let a = local.angle_xy().rem_euclid(TAU);
        ((a / (TAU / p as f64)).round() as usize) % p
    }

    fn paint_lands(&mut self, cfg: &MapConfig) {
        let mut terrain = FastNoiseLite::with_seed(cfg.seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(cfg.noise_frequency));
        let mut region = FastNoiseLite::with_seed(cfg.seed ^ 99_173);
        region.set_noise_type(Some(NoiseType::OpenSimplex2));
        region.set_frequency(Some(cfg.noise_frequency * 0.5));

        for i in 0..self.cells.len() {
            let h = self.frames[i] * C0;
            let (x, y) = (h[0] as f32, h[1] as f32);
            let land = if cfg.lands.is_empty() {
                Land::Generic
            } else {
                let r = (region.get_noise_2d(x, y) * 0.5 + 0.5).clamp(0.0, 0.999);
                cfg.lands[(r * cfg.lands.len() as f32) as usize]
            };
            let n = terrain.get_noise_2d(x, y);
            let wall = if i == 0 {
                Wall::None
            } else if n > cfg.wall_threshold {
                Wall::Stone
            } else if n < cfg.chasm_threshold {
                Wall::Chasm
            } else if n < cfg.water_threshold {
                Wall::Lake
            } else {
                Wall::None
            };
            self.cells[i] = CellData { land, wall, ..CellData::default() };
        }
        let walls = self.cells.iter().filter(|c| c.wall != Wall::None).count();
        log::debug!(target: "world", "painted lands cells={} walls={}", self.cells.len(), walls);
    }

    pub fn tiling(&self) -> RegularTiling {
        self.tiling
    }

    /// Placement of `c` relative to the origin cell.
    pub fn frame(&self, c: CellId) -> Option<Transmatrix> {
        self.frames.get(c.index()).copied()
    }

    /// Steps from the origin cell.
    pub fn distance(&self, c: CellId) -> Option<u32> {
        self.dist.get(c.index()).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len() as u32).map(CellId)
    }

    pub fn cell_mut(&mut self, c: CellId) -> Option<&mut CellData> {
        self.cells.get_mut(c.index())
    }

    /// The direction at `a` leading to `b`, if they are adjacent.
    pub fn direction_to(&self, a: CellId, b: CellId) -> Option<usize> {
        self.links.get(a.index())?.iter().position(|l| matches!(l, Some(l) if l.to == b))
    }

    pub fn set_land(&mut self, c: CellId, land: Land) {
        if let Some(cd) = self.cell_mut(c) {
            cd.land = land;
        }
    }

    pub fn set_wall(&mut self, c: CellId, wall: Wall) {
        if let Some(cd) = self.cell_mut(c) {
            cd.wall = wall;
        }
    }

    pub fn set_monster(&mut self, c: CellId, monster: Monster, dir: Option<u8>) {
        if let Some(cd) = self.cell_mut(c) {
            cd.monster = monster;
            cd.mondir = dir;
        }
    }

    /// Places a segmented creature along `body`, head first. Each segment
    /// points at the next one towards the tail. Returns `false` (and places
    /// nothing) when consecutive cells are not adjacent.
    pub fn place_segmented(&mut self, body: &[CellId], head: Monster, tail: Monster) -> bool {
        let mut dirs = Vec::with_capacity(body.len());
        for w in body.windows(2) {
            match self.direction_to(w[0], w[1]) {
                Some(d) => dirs.push(Some(d as u8)),
                None => return false,
            }
        }
        dirs.push(None);
        for (i, (&c, dir)) in body.iter().zip(dirs).enumerate() {
            let m = if i == 0 { head } else { tail };
            self.set_monster(c, m, dir);
        }
        true
    }

    /// Makes `c` show the mirror image of `src`, reflected in the line
    /// through the origin cell along the x axis.
    pub fn set_mirror_image(&mut self, c: CellId, src: CellId) {
        let (Some(fc), Some(fs)) = (self.frame(c), self.frame(src)) else { return };
        let Some(inv) = fc.try_inverse() else { return };
        self.mirrored.insert(c, (src, inv * Transmatrix::MIRROR_Y * fs));
    }

    /// Turns every cell below the x axis into the mirror image of its
    /// counterpart above, and marks the image cells as the mirror land.
    /// Cells centered on the axis become the mirror-wall seam.
    pub fn mirror_lower_half(&mut self) -> usize {
        let mut index: HashMap<BucketKey, Vec<CellId>> = HashMap::new();
        for c in self.cells() {
            index.entry(bucket_of(self.frames[c.index()] * C0)).or_default().push(c);
        }
        let mut pairs = Vec::new();
        let mut seam = Vec::new();
        for c in self.cells() {
            let h = self.frames[c.index()] * C0;
            if h[1].abs() < SAME_CELL {
                seam.push(c);
                continue;
            }
            if h[1] > 0.0 {
                continue;
            }
            if let Some(src) = self.find_near(&index, Transmatrix::MIRROR_Y * h) {
                pairs.push((c, src));
            }
        }
        for &(c, src) in &pairs {
            self.set_mirror_image(c, src);
            self.set_land(c, Land::Mirror);
        }
        for c in seam {
            self.set_land(c, Land::MirrorWall);
        }
        pairs.len()
    }
}

impl CellGraph for Map {
    fn geometry(&self) -> Geometry {
        self.geom
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn degree(&self, c: CellId) -> usize {
        self.links.get(c.index()).map_or(0, Vec::len)
    }

    fn neighbor(&self, c: CellId, d: usize) -> Option<CellId> {
        self.links.get(c.index())?.get(d).copied().flatten().map(|l| l.to)
    }

    fn neighbor_spin(&self, c: CellId, d: usize) -> usize {
        self.links
            .get(c.index())
            .and_then(|l| l.get(d).copied().flatten())
            .map_or(0, |l| l.back as usize)
    }

    fn neighbor_mirrored(&self, _c: CellId, _d: usize) -> bool {
        false
    }

    fn relative(&self, c: CellId, d: usize) -> Transmatrix {
        self.tiling.relative(self.geom, d, self.neighbor_spin(c, d))
    }

    fn direction_angle(&self, _c: CellId, d: usize) -> f64 {
        self.tiling.direction_angle(d)
    }

    fn corner(&self, _c: CellId, i: usize) -> Hyperpoint {
        self.tiling.corner(self.geom, i)
    }

    fn reflect(&self, c: CellId) -> Option<(CellId, Transmatrix)> {
        self.mirrored.get(&c).copied()
    }
}

impl LandRules for Map {
    fn cell(&self, c: CellId) -> Option<&CellData> {
        self.cells.get(c.index())
    }

    fn colors(&self, c: CellId) -> (u32, u32) {
        match self.cell(c) {
            Some(cd) => (wall_color(cd.wall, cd.land), floor_color(cd.land)),
            None => (0, 0),
        }
    }

    fn pattern_id(&self, c: CellId) -> u32 {
        self.distance(c).map_or(0, |d| d % 3)
    }

    fn is_high_wall(&self, c: CellId) -> bool {
        self.cell(c).is_some_and(|cd| cd.wall.is_high())
    }

    fn snake_level(&self, c: CellId) -> u8 {
        match self.cell(c).map(|cd| cd.wall) {
            Some(Wall::RedRock(l)) => l.min(3),
            _ => 0,
        }
    }

    fn chasm_graph(&self, c: CellId) -> Depth {
        match self.cell(c).map(|cd| cd.wall) {
            Some(Wall::Chasm) => Depth::Chasm,
            Some(w) if w.is_water() => Depth::Lake,
            _ => Depth::Floor,
        }
    }

    fn rose_dist(&self, c: CellId) -> Option<u8> {
        let cd = self.cell(c)?;
        (cd.land == Land::Rose).then(|| cd.landparam.clamp(0, u8::MAX as i32) as u8)
    }

    fn mines_around(&self, c: CellId) -> u8 {
        (0..self.degree(c))
            .filter_map(|d| self.neighbor(c, d))
            .filter(|&n| self.cell(n).is_some_and(|cd| cd.wall == Wall::Mine))
            .count() as u8
    }

    fn in_mirror(&self, c: CellId) -> bool {
        self.mirrored.contains_key(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heptagonal_ball_sizes() {
        // {7,3}: 1, then 7, then 21 cells at distance 2
        assert_eq!(Map::ball(RegularTiling::new(7, 3), 1).cell_count(), 8);
        assert_eq!(Map::ball(RegularTiling::new(7, 3), 2).cell_count(), 29);
    }

    #[test]
    fn hex_ball_sizes() {
        assert_eq!(Map::ball(RegularTiling::new(6, 3), 1).cell_count(), 7);
        assert_eq!(Map::ball(RegularTiling::new(6, 3), 2).cell_count(), 19);
    }

    #[test]
    fn dodecahedron_closes() {
        let m = Map::ball(RegularTiling::new(5, 3), 10);
        assert_eq!(m.cell_count(), 12);
        for c in m.cells() {
            assert!((0..5).all(|d| m.neighbor(c, d).is_some()));
        }
    }

    #[test]
    fn inner_cells_have_all_neighbors() {
        let m = Map::ball(RegularTiling::new(7, 3), 2);
        for c in m.cells().filter(|&c| m.distance(c) == Some(1)) {
            assert!((0..7).all(|d| m.neighbor(c, d).is_some()));
        }
    }

    #[test]
    fn segmented_body_points_to_tail() {
        let mut m = Map::ball(RegularTiling::new(6, 3), 2);
        let a = CellId(0);
        let b = m.neighbor(a, 0).unwrap();
        let c = m.neighbor(b, 3).unwrap_or_else(|| m.neighbor(b, 2).unwrap());
        assert!(m.place_segmented(&[a, b, c], Monster::Worm, Monster::WormTail));
        assert_eq!(m.cell(a).unwrap().monster, Monster::Worm);
        assert_eq!(m.neighbor(b, m.cell(b).unwrap().mondir.unwrap() as usize), Some(c));
        assert_eq!(m.cell(c).unwrap().mondir, None);
    }

    #[test]
    fn mines_are_counted() {
        let mut m = Map::ball(RegularTiling::new(6, 3), 1);
        m.set_wall(CellId(1), Wall::Mine);
        m.set_wall(CellId(2), Wall::Mine);
        assert_eq!(m.mines_around(CellId(0)), 2);
    }

    #[test]
    fn depth_classes() {
        let mut m = Map::ball(RegularTiling::new(6, 3), 1);
        m.set_wall(CellId(1), Wall::Chasm);
        m.set_wall(CellId(2), Wall::Sea);
        assert_eq!(m.chasm_graph(CellId(0)), Depth::Floor);
        assert_eq!(m.chasm_graph(CellId(1)), Depth::Chasm);
        assert_eq!(m.chasm_graph(CellId(2)), Depth::Lake);
    }

    #[test]
    fn mirror_images_reflect_across_axis() {
        let mut m = Map::ball(RegularTiling::new(6, 3), 2);
        assert!(m.mirror_lower_half() > 0);
        assert_eq!(m.cell(CellId(0)).unwrap().land, Land::MirrorWall);
        let c = m.cells().find(|&c| m.in_mirror(c)).unwrap();
        let (src, t) = m.reflect(c).unwrap();
        let g = m.geometry();
        let fc = m.frame(c).unwrap();
        let fs = m.frame(src).unwrap();
        let seen = fc * t * C0;
        assert!(g.hdist(seen, Transmatrix::MIRROR_Y * fs * C0) < 1e-9);
    }

    #[test]
    fn generated_origin_is_open() {
        let m = Map::generate(&MapConfig::default());
        assert_eq!(m.cell(CellId(0)).unwrap().wall, Wall::None);
        assert!(m.cells().all(|c| m.cell(c).is_some()));
    }
}
