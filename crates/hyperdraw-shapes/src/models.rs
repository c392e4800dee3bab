//! Builders turning silhouettes into 3D models, and the driver applying them.

use crate::buffer::ShapeId;
use crate::builder::MeshBuilder;
use crate::eye::EyePair;
use crate::ppr::Ppr;
use crate::subdivide::Profile;
use crate::triangulate::earcut_loop;
use hyperdraw_geom::{C0, DEGREE, Hyperpoint, Transmatrix};
use std::time::Instant;

// Silhouettes that cast a shadow on the floor in a flat world.
const SHADOWED: &[&str] = &[
    "BatWings",
    "BullBody",
    "CatBody",
    "DogBody",
    "DogTorso",
    "Eagle",
    "FemaleBody",
    "GadflyWing",
    "GargoyleWings",
    "Hawk",
    "JiangShi",
    "PBody",
    "PHead",
    "RaiderBody",
    "ReptileBody",
    "SkeletonBody",
    "WaterElemental",
    "WolfBody",
    "Yeti",
];

const HUMANOIDS: &[&str] =
    &["PBody", "Yeti", "FemaleBody", "RaiderBody", "SkeletonBody", "FatBody", "WaterElemental", "JiangShi"];

const HEADS: &[&str] = &[
    "FemaleHair",
    "PHead",
    "Turban1",
    "VikingHelmet",
    "WestHat1",
    "Golemhead",
    "PirateHood",
    "Skull",
    "RatHead",
    "Demon",
    "GoatHead",
];

// (name, profile, sits on the head rather than the body)
const ARMORS: &[(&str, Profile, bool)] = &[
    ("KnightArmor", Profile::Chest, false),
    ("KnightCloak", Profile::Cloak, false),
    ("PrinceDress", Profile::Chest, false),
    ("PrincessDress", Profile::Cloak, false),
    ("Suspenders", Profile::Chest, false),
    ("FemaleDress", Profile::Chest, false),
    ("WightCloak", Profile::Cloak, true),
    ("RaiderArmor", Profile::Chest, false),
    ("Armor", Profile::Chest, true),
    ("RatCape2", Profile::Cloak, false),
    ("Hood", Profile::Cloak, true),
];

const PAWS: &[(&str, &str)] = &[
    ("WolfFrontPaw", "WolfFrontLeg"),
    ("WolfRearPaw", "WolfRearLeg"),
    ("DogFrontPaw", "DogFrontLeg"),
    ("DogRearPaw", "DogRearLeg"),
];

const SEGMENTS: &[&str] = &[
    "DragonSegment",
    "DragonHead",
    "DragonTail",
    "WormSegment",
    "SmallWormSegment",
    "WormHead",
    "WormTail",
    "SmallWormTail",
    "TentHead",
    "DragonLegs",
    "DragonWings",
];

impl MeshBuilder {
    /// Lofts a humanoid body: groin, chest and neck stacked on the axis, arms
    /// and hands found in the outline, limbs mirrored to the other side.
    pub fn make_humanoid(&mut self, id: ShapeId, scale: f64) {
        let (Some(groin_id), Some(body_id), Some(neck_id), Some(hand_id), Some(arm_id)) = (
            self.need("HumanGroin"),
            self.need("PBodyOnly"),
            self.need("HumanNeck"),
            self.need("PBodyHand"),
            self.need("PBodyArm"),
        ) else {
            return;
        };
        self.shcenter = C0;
        let s = self.s();
        let groin = self.scaleshape(&self.outline(groin_id), scale);
        let neck = self.scaleshape(&self.outline(neck_id), scale);
        let body0 = self.outline(body_id);
        let (Some(&body7), Some(&body26)) = (body0.get(7), body0.get(26)) else { return };
        let Some(&arm8) = self.outline(arm_id).get(8) else { return };
        let Some(&hand0) = self.outline(hand_id).first() else { return };
        let full = self.outline(id);

        let mut body = Vec::with_capacity(full.len());
        let (mut plus, mut minus) = (false, false);
        for &h in &full {
            if h[1] > 0.14 * s {
                if !plus {
                    plus = true;
                    body.push(body7);
                }
            } else if h[1] < -0.14 * s {
                if !minus {
                    minus = true;
                    body.push(body26);
                }
            } else {
                body.push(h);
            }
        }

        let mut arm = Vec::new();
        let mut arm_used = false;
        for &h in &full {
            if h[1] < 0.08 * s {
                continue;
            }
            if h[0] > -0.03 * s {
                if !arm_used {
                    arm_used = true;
                    arm.push(arm8);
                }
            } else {
                arm.push(h);
            }
        }

        let mut hand = vec![hand0];
        hand.extend(full.iter().copied().filter(|h| h[1] + h[0] > 0.13 * s));

        self.bshape(id, Ppr::MONSTER_BODY);
        self.add_cone(self.zc(0.4), &groin, self.zc(0.36));
        self.add_prism_sync(self.zc(0.4), &groin, self.zc(0.6), &groin);
        self.add_prism(self.zc(0.6), &groin, self.zc(0.7), &body);
        self.add_prism(self.zc(0.7), &body, self.zc(0.8), &neck);
        self.add_cone(self.zc(0.8), &neck, self.zc(0.83));

        let at0 = self.points.len();
        let hh = self.lv.human_height;
        let bz = self.lv.body;
        if arm.len() > 3 {
            self.shcenter = self.get_center(&arm);
            let arm0 = self.points.len();
            self.add_prism_sync(bz - hh * 0.03, &arm, bz + hh * 0.03, &arm);
            self.add_cone(bz + hh * 0.03, &arm, bz + hh * 0.05);
            self.add_cone(bz - hh * 0.03, &arm, bz - hh * 0.05);
            let arm1 = self.points.len();
            let g = self.geom;
            let lift = self.zc(0.7) - bz;
            self.points.map_range(arm0..arm1, |h| {
                let zl = h[2].asinh();
                let flat = g.zpush(-zl) * h;
                let rad = 1.0 - (g.hdist0(flat) - 0.1124 * s) / (0.2804 * s - 0.1124 * s);
                g.zpush(rad * lift) * h
            });
        }
        if hand.len() > 3 {
            self.shcenter = self.get_center(&hand);
            self.add_cone(bz, &hand, bz + 0.05 * hh);
            self.add_cone(bz, &hand, bz - 0.05 * hh);
        }
        let at1 = self.points.len();
        for i in at0..at1 {
            if let Some(h) = self.points.get(i) {
                self.push(Transmatrix::MIRROR * h);
            }
        }
        self.add_texture(id);
        self.shift_last(-bz);
    }

    /// Triangulates an armor outline and lifts it onto the chest (or the head).
    pub fn make_armor(&mut self, id: ShapeId, profile: Profile, on_head: bool) {
        let body = self.outline(id);
        let prio = self.shape(id).map_or(Ppr::MONSTER_ARMOR0, |sh| sh.prio);
        let tris = earcut_loop(&body, None);
        self.bshape(id, prio);
        self.set_triangles();
        for [a, b, c] in tris {
            self.addtri([body[a], body[b], body[c]], profile);
        }
        self.add_texture(id);
        let lev = if on_head { self.lv.head } else { self.lv.body };
        self.shift_last(-lev);
    }

    /// Triangulates a head outline around its center and bulges it into a face.
    pub fn make_head(&mut self, id: ShapeId) {
        let mut head = self.outline(id);
        let prio = self.shape(id).map_or(Ppr::MONSTER_HEAD, |sh| sh.prio);
        let tris = earcut_loop(&head, Some([0.0, 0.0]));
        head.push(C0);
        self.bshape(id, prio);
        self.set_triangles();
        for [a, b, c] in tris {
            self.addtri([head[a], head[b], head[c]], Profile::Face);
        }
        self.add_texture(id);
        self.shift_last(-self.lv.head);
    }

    /// A latitude/longitude ball in 30 degree steps standing in for a bare head.
    pub fn make_head_only(&mut self) {
        let Some(id) = self.need("PHeadOnly") else { return };
        let prio = self.shape(id).map_or(Ppr::MONSTER_HEAD, |sh| sh.prio);
        let g = self.geom;
        let (s, sh, ze) = (self.s(), self.sh(), self.zc(self.eyepos()));
        let pt = |d: i32, u: i32| {
            let (d, u) = (d as f64 * DEGREE, u as f64 * DEGREE);
            g.zpush(ze + 0.06 * sh * u.sin()) * g.xspinpush0(d, 0.05 * s * u.cos())
        };
        self.bshape(id, prio);
        self.set_triangles();
        for d in (0..360).step_by(30) {
            for u in (-90..=90).step_by(30) {
                for (dd, du) in [(0, 0), (30, 0), (0, 30), (30, 30), (30, 0), (0, 30)] {
                    self.push(pt(d + dd, u + du));
                }
            }
        }
        self.add_texture(id);
        self.shift_last(-self.lv.head - self.rev_z() * 0.01 * sh);
    }

    /// A foot lofted into a tapering human leg, nudged backwards.
    pub fn make_foot(&mut self, id: ShapeId) {
        let Some(leg_id) = self.need("HumanLeg") else { return };
        let foot = self.outline(id);
        let leg = self.outline(leg_id);
        self.shcenter = self.get_center(&leg);
        let leg5 = self.scaleshape(&leg, 0.8);
        self.bshape(id, Ppr::MONSTER_BODY);
        self.add_cone(self.zc(0.0), &foot, self.zc(0.0));
        self.add_prism(self.zc(0.0), &foot, self.zc(0.1), &leg);
        self.add_prism_sync(self.zc(0.1), &leg, self.zc(0.4), &leg5);
        self.add_cone(self.zc(0.4), &leg5, self.zc(0.45));
        self.add_texture(id);
        let back = self.geom.cpush(0, -0.0125 * self.s());
        self.transform_last(back);
    }

    /// An animal paw lofted into its leg outline.
    pub fn make_paw(&mut self, id: ShapeId, leg_id: ShapeId) {
        let foot = self.outline(id);
        let leg = self.outline(leg_id);
        self.shcenter = self.get_center(&leg);
        self.bshape(id, Ppr::MONSTER_BODY);
        self.add_cone(self.zc(0.0), &foot, self.zc(0.0));
        self.add_prism(self.zc(0.0), &foot, self.zc(0.1), &leg);
        self.add_prism_sync(self.zc(0.1), &leg, self.zc(0.4), &leg);
        self.add_cone(self.zc(0.4), &leg, self.zc(0.45));
        self.add_texture(id);
    }

    /// An animal body; the rearmost `tail` of the outline only reaches the
    /// middle layer.
    pub fn make_abody(&mut self, id: ShapeId, tail: f64) {
        let body = self.outline(id);
        self.shcenter = self.get_center(&body);
        let minx = body.iter().map(|h| h[0]).fold(9.0, f64::min);
        let notail: Vec<Hyperpoint> = body.iter().copied().filter(|h| h[0] >= minx + tail).collect();
        let body8 = self.scaleshape(&notail, 0.8);
        self.bshape(id, Ppr::MONSTER_BODY);
        self.add_prism(self.zc(0.4), &body8, self.zc(0.45), &body);
        self.add_prism(self.zc(0.45), &body, self.zc(0.5), &notail);
        self.add_prism_sync(self.zc(0.6), &body8, self.zc(0.5), &notail);
        self.add_cone(self.zc(0.4), &body8, self.zc(0.36));
        self.add_cone(self.zc(0.6), &body8, self.zc(0.64));
        self.add_texture(id);
        if !self.params.world_3d {
            self.shift_last(-self.lv.abody);
        }
    }

    pub fn make_ahead(&mut self, id: ShapeId) {
        let body = self.outline(id);
        self.shcenter = self.get_center(&body);
        let body8 = self.scaleshape(&body, 0.5);
        self.bshape(id, Ppr::MONSTER_BODY);
        self.add_prism_sync(self.zc(0.4), &body8, self.zc(0.5), &body);
        self.add_prism_sync(self.zc(0.6), &body8, self.zc(0.5), &body);
        self.add_cone(self.zc(0.4), &body8, self.zc(0.36));
        self.add_cone(self.zc(0.6), &body8, self.zc(0.64));
        self.add_texture(id);
    }

    /// A thin slab: bones and skeletal feet.
    pub fn make_skeletal(&mut self, id: ShapeId, push: f64) {
        let body = self.outline(id);
        self.shcenter = self.get_center(&body);
        self.bshape(id, Ppr::MONSTER_BODY);
        self.add_prism_sync(self.zc(0.48), &body, self.zc(0.5), &body);
        self.add_prism_sync(self.zc(0.52), &body, self.zc(0.5), &body);
        self.add_cone(self.zc(0.48), &body, self.zc(0.47));
        self.add_cone(self.zc(0.52), &body, self.zc(0.53));
        self.add_texture(id);
        self.shift_last(-push);
    }

    fn each_named(&mut self, names: &[&str], mut f: impl FnMut(&mut Self, ShapeId)) {
        for name in names {
            if let Some(id) = self.need(name) {
                f(self, id);
            }
        }
    }

    fn cut_named(&mut self, name: &str, each: usize, push: f64, width: f64) {
        if let Some(id) = self.need(name) {
            self.make_revolution_cut(id, each, push, width);
        }
    }

    fn eye_named(&mut self, eye: &str, head: &str, shift_eye: f64, shift_head: f64, pair: EyePair) {
        if let (Some(e), Some(h)) = (self.need(eye), self.need(head)) {
            self.adjust_eye(e, h, shift_eye, shift_head, pair);
        }
    }

    fn disable_named(&mut self, names: &[&str]) {
        self.each_named(names, |mb, id| mb.disable(id));
    }

    /// Applies every builder to its silhouettes, in dependency order: eyes
    /// are seated on finished heads, and shadows are taken from the flat
    /// outlines before those are replaced.
    pub fn make_3d_models(&mut self) {
        let t0 = Instant::now();
        let flat_world = !self.params.world_3d;
        let lv = self.lv.clone();
        let (s, sf, hh) = (self.s(), self.scalefactor(), lv.human_height);
        self.shcenter = C0;

        if flat_world {
            self.each_named(SHADOWED, |mb, id| mb.make_shadow(id));
        }

        self.each_named(HUMANOIDS, |mb, id| mb.make_humanoid(id, 1.0));
        self.each_named(HEADS, |mb, id| mb.make_head(id));
        for &(name, profile, on_head) in ARMORS {
            if let Some(id) = self.need(name) {
                self.make_armor(id, profile, on_head);
            }
        }

        self.each_named(&["HumanFoot", "YetiFoot"], |mb, id| mb.make_foot(id));
        let skeletal_push = if flat_world { self.zc(0.5) + hh / 40.0 - lv.floor } else { 0.0 };
        self.each_named(&["SkeletalFoot"], |mb, id| mb.make_skeletal(id, skeletal_push));
        for &(paw, leg) in PAWS {
            if let (Some(p), Some(l)) = (self.need(paw), self.need(leg)) {
                self.make_paw(p, l);
            }
        }

        let g = if flat_world { lv.abody - self.zc(0.4) } else { 0.0 };
        let head_off = lv.ahead - lv.abody + g;
        self.cut_named("WolfBody", 30, g, 0.01 * s);
        self.cut_named("WolfHead", 180, head_off, 99.0);
        self.cut_named("FamiliarHead", 30, head_off, 99.0);
        self.cut_named("DogTorso", 30, g, 99.0);
        self.cut_named("DogHead", 180, head_off, 99.0);
        self.cut_named("CatBody", 30, g, 99.0);
        self.cut_named("CatHead", 180, head_off, 0.055 * sf);

        for (paw, leg) in [("ReptileFrontFoot", "ReptileFrontLeg"), ("ReptileRearFoot", "ReptileRearLeg")] {
            if let (Some(p), Some(l)) = (self.need(paw), self.need(leg)) {
                self.make_paw(p, l);
            }
        }
        self.each_named(&["ReptileBody"], |mb, id| mb.make_abody(id, -1.0));
        self.cut_named("ReptileHead", 180, head_off, 99.0);

        self.each_named(&["BullFrontHoof", "BullRearHoof"], |mb, id| mb.make_paw(id, id));
        self.cut_named("BullBody", 180, g, 99.0);
        self.cut_named("BullHead", 60, head_off, 99.0);
        self.shift_named("BullHorn", g - (lv.ahead - lv.abody));

        self.each_named(&["TrylobiteBody"], |mb, id| mb.make_abody(id, 0.0));
        self.cut_named("TrylobiteHead", 180, head_off, 99.0);

        self.cut_named("Shark", 180, if flat_world { -lv.floor } else { 0.0 }, 99.0);
        self.cut_named("Ghost", 60, lv.ghost + g, 99.0);
        self.cut_named("Eagle", 180, -lv.bird, 0.05 * s);
        self.cut_named("Hawk", 180, -lv.bird, 0.05 * s);
        self.cut_named("TinyBird", 180, 0.0, 0.025 * s);
        self.cut_named("TinyShark", 90, 0.0, 99.0);
        self.cut_named("MiniGhost", 60, 0.0, 99.0);
        self.cut_named("GargoyleWings", 180, 0.0, 0.05 * s);
        self.cut_named("GargoyleBody", 180, 0.0, 0.05 * s);
        self.cut_named("GadflyWing", 180, -lv.bird, 0.05 * s);
        self.cut_named("BatWings", 180, -lv.bird, 0.05 * s);
        self.cut_named("BatBody", 180, -lv.bird, 0.05 * s);

        self.each_named(&["FoxTail1", "FoxTail2"], |mb, id| mb.make_revolution(id, 180, 0.0));
        self.each_named(&["GadflyBody"], |mb, id| mb.make_revolution(id, 180, -lv.bird));
        self.cut_named("BugLeg", 60, 0.0, 99.0);
        self.each_named(&["BugArmor"], |mb, id| mb.make_revolution(id, 180, lv.abody));
        self.cut_named("BugAntenna", 90, lv.abody, 99.0);
        self.cut_named("ButterflyBody", 180, -lv.bird, 99.0);

        for (name, body) in [("Eagle", 0.05 * s), ("TinyBird", 0.025 * s)] {
            if let Some(id) = self.need(name) {
                let frames = self.animate_bird(id, body);
                self.bird_frames.insert(name.to_string(), frames);
            }
        }

        self.disable_named(&[
            "WolfRearLeg",
            "WolfFrontLeg",
            "DogRearLeg",
            "DogFrontLeg",
            "ReptileFrontLeg",
            "ReptileRearLeg",
            "PFace",
            "JiangShi",
        ]);

        for name in SEGMENTS {
            self.cut_named(name, 60, g, 99.0);
        }
        self.cut_named("KrakenHead", 60, -lv.floor, 99.0);
        self.cut_named("SeaTentacle", 60, -lv.floor, 99.0);
        self.disable_named(&["DragonNostril"]);

        self.make_head_only();

        let orbsize = 0.3 * sf;
        let zhexf = self.tiling.circumradius(self.geom);
        for (name, rad, lev) in [("Disk", orbsize * 0.2, 2), ("HeptaMarker", zhexf * 0.2, 1), ("Snowball", zhexf * 0.1, 0)] {
            if let Some(id) = self.need(name) {
                self.make_ball(id, rad, lev);
            }
        }

        self.place_floor_ornaments();

        self.each_named(&["Slime"], |mb, id| mb.make_slime(id));
        self.shift_named("MagicSword", lv.abody);

        self.eye_named("SlimeEyes", "Slime", lv.flateye, 0.0, EyePair::Mirrored);
        self.eye_named("GhostEyes", "Ghost", lv.ghost, lv.ghost, EyePair::Mirrored);
        self.eye_named("MiniEyes", "MiniGhost", lv.ghost, lv.ghost, EyePair::Mirrored);
        self.eye_named("WormEyes", "WormHead", 0.0, 0.0, EyePair::Mirrored);
        self.eye_named("DragonEyes", "DragonHead", 0.0, 0.0, EyePair::Mirrored);
        self.eye_named("KrakenEye", "KrakenHead", 0.0, 0.0, EyePair::Single);
        self.eye_named("KrakenEye2", "KrakenEye", 0.0, 0.0, EyePair::Single);
        for wolf in ["Wolf1", "Wolf2", "Wolf3"] {
            self.eye_named(wolf, "DogHead", lv.ahead, lv.ahead, EyePair::Single);
        }
        self.eye_named("FamiliarEye", "WolfHead", lv.ahead, lv.ahead, EyePair::Single);
        self.eye_named("WolfEyes", "WolfHead", lv.ahead, lv.ahead, EyePair::Single);
        self.eye_named("ReptileEye", "ReptileHead", lv.ahead, lv.ahead, EyePair::Single);
        self.eye_named("GadflyEye", "GadflyBody", -lv.bird, -lv.bird, EyePair::Single);
        if let (Some(e), Some(h)) = (self.need("SkullEyes"), self.need("PHeadOnly")) {
            self.adjust_skull_eyes(e, h, lv.head1, lv.head);
        }

        if let Some(id) = self.need("RatTail") {
            self.shift_shape(id, self.zc(0.5) - lv.leg);
            self.transform_shape(id, self.geom.xpush(-sf * 0.1));
        }

        log::info!(
            target: "perf",
            "ms={:.2} make_3d_models shapes={} points={}",
            t0.elapsed().as_secs_f64() * 1000.0,
            self.shapes.len(),
            self.points.len()
        );
    }

    /// Lifts flat floor decorations to just above (or below) the floor.
    fn place_floor_ornaments(&mut self) {
        let lv = self.lv.clone();
        let hh = lv.human_height;
        if !self.params.world_3d {
            let half = self.params.lev_to_factor(self.geom, hh * 0.01);
            for name in ["HalfFloor0", "HalfFloor1", "HalfFloor2"] {
                self.shift_named(name, half);
            }
        }
        self.shift_named("BoatOuter", lv.floor);
        self.shift_named("BoatInner", (lv.floor + lv.lake) / 2.0);
        for (k, name) in ["BigCarpet1", "BigCarpet2", "BigCarpet3"].into_iter().enumerate() {
            self.shift_named(name, lv.floor - hh * (k + 1) as f64 / 40.0);
        }
        self.shift_named("MineMark0", lv.floor - hh / 40.0);
        self.shift_named("MineMark1", lv.floor - hh / 40.0);
        self.cut_named("Statue", 60, 0.0, 99.0);
        self.shift_named("Thorns", lv.floor - hh / 40.0);
        self.shift_named("Rose", lv.floor - hh / 20.0);
    }

    /// Names that share another shape's geometry.
    pub fn register_aliases(&mut self) {
        if let Some(id) = self.id("Slime") {
            self.register("Jelly", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ModelParams;
    use crate::silhouette::SilhouetteLibrary;
    use hyperdraw_geom::{Geometry, RegularTiling};

    fn loaded() -> MeshBuilder {
        let p = ModelParams { solid: true, ..ModelParams::default() };
        let mut mb = MeshBuilder::new(Geometry::Hyperbolic, RegularTiling::new(7, 3), p);
        mb.load_silhouettes(&SilhouetteLibrary::builtin());
        mb
    }

    #[test]
    fn humanoid_is_triangles_with_mirrored_limbs() {
        let mut mb = loaded();
        let id = mb.id("PBody").unwrap();
        mb.make_humanoid(id, 1.0);
        let sh = mb.shape(id).unwrap();
        assert!(sh.triangles);
        assert_eq!(sh.len() % 3, 0);
        assert!(sh.texture.is_some());
        assert!(mb.points_of(id).iter().all(|h| h.is_finite()));
    }

    #[test]
    fn head_only_lattice_size() {
        let mut mb = loaded();
        mb.make_head_only();
        let id = mb.id("PHeadOnly").unwrap();
        // 12 longitudes, 7 latitudes, 6 points each
        assert_eq!(mb.points_of(id).len(), 12 * 7 * 6);
    }

    #[test]
    fn armor_triangles_come_in_threes() {
        let mut mb = loaded();
        let id = mb.id("KnightArmor").unwrap();
        mb.make_armor(id, Profile::Chest, false);
        let n = mb.points_of(id).len();
        assert!(n > 0 && n % 3 == 0);
    }

    #[test]
    fn skeletal_counts() {
        let mut mb = loaded();
        let id = mb.id("SkeletalFoot").unwrap();
        let k = mb.outline(id).len();
        mb.make_skeletal(id, 0.0);
        assert_eq!(mb.points_of(id).len(), 2 * 6 * k + 2 * 3 * k);
    }

    #[test]
    fn slime_alias() {
        let mut mb = loaded();
        mb.register_aliases();
        assert_eq!(mb.id("Jelly"), mb.id("Slime"));
    }
}
