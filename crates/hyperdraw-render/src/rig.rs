//! Monsters, items and boats.
//!
//! Most species are plain data: a list of parts, each a catalog shape lifted
//! to a body level, plus a gait that animates the legs. One generic composer
//! interprets the table. Multi-cell bodies, krakens and mimics have their own
//! composers.

use crate::color::{darkena, gradient};
use crate::queue::{DrawRecord, DrawSink};
use crate::walls::spin_tick;
use hyperdraw_geom::{C0, Transmatrix};
use hyperdraw_shapes::{Levels, Ppr, ShapeCatalog, ShapeId};
use hyperdraw_world::{Item, Monster};
use std::f64::consts::TAU;

/// Alpha of a monster's shadow on the floor.
const SHADOW_ALPHA: u32 = 0x18;

/// Body level a part is lifted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lev {
    Floor,
    Leg,
    Groin,
    Body,
    Neck,
    Head,
    ALeg,
    ABody,
    AHead,
    Ghost,
    FlatEye,
    Boat,
    Boat2,
}

impl Lev {
    pub fn factor(self, lv: &Levels) -> f64 {
        match self {
            Lev::Floor => lv.floor,
            Lev::Leg => lv.leg,
            Lev::Groin => lv.groin,
            Lev::Body => lv.body,
            Lev::Neck => lv.neck1,
            Lev::Head => lv.head,
            Lev::ALeg => lv.aleg,
            Lev::ABody => lv.abody,
            Lev::AHead => lv.ahead,
            Lev::Ghost => lv.ghost,
            Lev::FlatEye => lv.flateye,
            Lev::Boat => lv.boatlev,
            Lev::Boat2 => lv.boatlev2,
        }
    }
}

/// How a part is colored from the monster's body color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Own,
    /// Body color halved `n` times.
    Darker(u32),
    /// 0xRRGGBB regardless of the body.
    Fixed(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub shape: &'static str,
    pub lev: Lev,
    pub tint: Tint,
}

macro_rules! part {
    ($shape:literal, $lev:ident, $tint:expr) => {
        Part { shape: $shape, lev: Lev::$lev, tint: $tint }
    };
}

/// Leg shapes of a four-legged gait: front paw, rear paw, front leg, rear leg.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimalLegs {
    pub shapes: [Option<&'static str>; 4],
    /// Phase lag of the left feet, in steps.
    pub lag: f64,
    /// Steps per unit of footphase.
    pub cadence: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gait {
    Still,
    /// Two legs with the given foot shape; the body sways with the stride.
    Humanoid { foot: &'static str },
    Animal(AnimalLegs),
    /// Hovers at the bird level, bobbing; flaps when the catalog has frames.
    Flying,
    /// Floats at the ghost level, translucent.
    Floating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rig {
    /// 0xRRGGBB body color.
    pub color: u32,
    pub glyph: char,
    pub parts: &'static [Part],
    pub gait: Gait,
}

const WOLF_LEGS: AnimalLegs = AnimalLegs {
    shapes: [Some("WolfFrontPaw"), Some("WolfRearPaw"), Some("WolfFrontLeg"), Some("WolfRearLeg")],
    lag: 0.25,
    cadence: 1.0,
};
const DOG_LEGS: AnimalLegs = AnimalLegs {
    shapes: [Some("DogFrontPaw"), Some("DogRearPaw"), Some("DogFrontLeg"), Some("DogRearLeg")],
    lag: 0.1,
    cadence: 1.0,
};
const REPTILE_LEGS: AnimalLegs = AnimalLegs {
    shapes: [Some("ReptileFrontFoot"), Some("ReptileRearFoot"), Some("ReptileFrontLeg"), Some("ReptileRearLeg")],
    lag: 0.25,
    cadence: 1.0,
};
const BULL_LEGS: AnimalLegs = AnimalLegs {
    shapes: [Some("BullFrontHoof"), Some("BullRearHoof"), Some("BullFrontHoof"), Some("BullRearHoof")],
    lag: 0.25,
    cadence: 1.0,
};
const BUG_LEGS: AnimalLegs = AnimalLegs { shapes: [Some("BugLeg"), None, None, None], lag: 0.5, cadence: 2.5 };

const HUMAN: Gait = Gait::Humanoid { foot: "HumanFoot" };
const BIGFOOT: Gait = Gait::Humanoid { foot: "YetiFoot" };

const SKIN: Tint = Tint::Fixed(0xFF_D0A0);
const HAIR: Tint = Tint::Fixed(0x33_2A22);
const EYES: Tint = Tint::Fixed(0x00_0000);

const PLAYER: Rig = Rig {
    color: 0xFF_FFFF,
    glyph: '@',
    parts: &[
        part!("PBody", Body, Tint::Own),
        part!("PHead", Head, HAIR),
        part!("PFace", Head, SKIN),
    ],
    gait: HUMAN,
};

/// The table entry of `m`; `None` for an empty cell and for the species
/// drawn by their own composers.
pub fn rig_for(m: Monster) -> Option<Rig> {
    use Tint::*;
    let r = |color, glyph, parts, gait| Some(Rig { color, glyph, parts, gait });
    match m {
        Monster::None
        | Monster::Kraken
        | Monster::Mimic
        | Monster::Worm
        | Monster::WormTail
        | Monster::Dragon
        | Monster::DragonTail
        | Monster::Tentacle
        | Monster::TentacleTail => None,
        Monster::Player => Some(PLAYER),
        Monster::Wolf => r(
            0xC0_C0C0,
            'W',
            &[part!("WolfBody", ABody, Own), part!("WolfHead", AHead, Own), part!("WolfEyes", AHead, Fixed(0x20_2020))],
            Gait::Animal(WOLF_LEGS),
        ),
        Monster::Dog => r(
            0xC0_8040,
            'D',
            &[part!("DogBody", ABody, Own), part!("DogTorso", ABody, Darker(1)), part!("DogHead", AHead, Own)],
            Gait::Animal(DOG_LEGS),
        ),
        Monster::Cat => r(
            0x90_9090,
            'c',
            &[part!("CatBody", ABody, Own), part!("CatHead", AHead, Own), part!("WolfEyes", AHead, Fixed(0x30_FF30))],
            Gait::Animal(DOG_LEGS),
        ),
        Monster::Familiar => r(
            0xC0_4040,
            'f',
            &[part!("WolfBody", ABody, Own), part!("FamiliarHead", AHead, Own), part!("FamiliarEye", AHead, Fixed(0xFF_FF00))],
            Gait::Animal(WOLF_LEGS),
        ),
        Monster::Eagle => r(0xFF_FFFF, 'E', &[part!("Eagle", Floor, Own)], Gait::Flying),
        Monster::Hawk => r(0xC0_A080, 'H', &[part!("Hawk", Floor, Own)], Gait::Flying),
        Monster::TinyBird => r(0xF0_F000, 'b', &[part!("TinyBird", Floor, Own)], Gait::Flying),
        Monster::Bat => r(0x40_3030, 'B', &[part!("BatWings", Floor, Darker(1)), part!("BatBody", Floor, Own)], Gait::Flying),
        Monster::Gadfly => r(
            0x60_8000,
            'g',
            &[part!("GadflyWing", Floor, Fixed(0xC0_C0C0)), part!("GadflyBody", Floor, Own), part!("GadflyEye", Floor, EYES)],
            Gait::Flying,
        ),
        Monster::Butterfly => r(0xFF_80FF, 'b', &[part!("ButterflyBody", Floor, Own)], Gait::Flying),
        Monster::Ghost => r(0xFF_FFFF, 'G', &[part!("Ghost", Floor, Own), part!("GhostEyes", Floor, EYES)], Gait::Floating),
        Monster::MiniGhost => {
            r(0xE0_E0FF, 'g', &[part!("MiniGhost", Floor, Own), part!("MiniEyes", Floor, EYES)], Gait::Floating)
        }
        Monster::Slime => r(0x40_C040, 'J', &[part!("Slime", Floor, Own), part!("SlimeEyes", FlatEye, EYES)], Gait::Still),
        Monster::Skeleton => r(
            0xFF_FFFF,
            'S',
            &[part!("SkeletonBody", Body, Own), part!("Skull", Head, Own), part!("SkullEyes", Head, EYES)],
            Gait::Humanoid { foot: "SkeletalFoot" },
        ),
        Monster::Yeti => r(0xFF_FFFF, 'Y', &[part!("Yeti", Body, Own), part!("PHead", Head, Own)], BIGFOOT),
        Monster::Knight => r(
            0xC0_C0C0,
            'K',
            &[
                part!("PBody", Body, Fixed(0x80_8080)),
                part!("KnightArmor", Body, Own),
                part!("KnightCloak", Body, Fixed(0x40_40C0)),
                part!("PHead", Head, HAIR),
                part!("PFace", Head, SKIN),
            ],
            HUMAN,
        ),
        Monster::Princess => r(
            0xFF_80C0,
            'P',
            &[
                part!("FemaleBody", Body, SKIN),
                part!("PrincessDress", Body, Own),
                part!("PHead", Head, HAIR),
                part!("FemaleHair", Head, HAIR),
                part!("PFace", Head, SKIN),
            ],
            HUMAN,
        ),
        Monster::Raider => r(
            0xA0_4040,
            'R',
            &[
                part!("RaiderBody", Body, Own),
                part!("RaiderArmor", Body, Darker(1)),
                part!("PHead", Head, HAIR),
                part!("PFace", Head, SKIN),
            ],
            HUMAN,
        ),
        Monster::Rat => r(
            0x80_6040,
            'r',
            &[
                part!("RatTail", Groin, Own),
                part!("PBody", Body, Own),
                part!("RatCape2", Body, Darker(1)),
                part!("RatHead", Head, Own),
            ],
            BIGFOOT,
        ),
        Monster::Bull => r(
            0x80_4020,
            'B',
            &[part!("BullBody", ABody, Own), part!("BullHead", AHead, Own), part!("BullHorn", AHead, Fixed(0xFF_FFFF))],
            Gait::Animal(BULL_LEGS),
        ),
        Monster::Reptile => r(
            0x40_A040,
            'L',
            &[part!("ReptileBody", ABody, Own), part!("ReptileHead", AHead, Own), part!("ReptileEye", AHead, EYES)],
            Gait::Animal(REPTILE_LEGS),
        ),
        Monster::Trylobite => {
            r(0x80_8000, 'T', &[part!("TrylobiteBody", ABody, Own), part!("TrylobiteHead", AHead, Own)], Gait::Still)
        }
        Monster::Shark => r(0x60_60A0, 'S', &[part!("Shark", Floor, Own)], Gait::Still),
        Monster::TinyShark => r(0x60_60A0, 's', &[part!("TinyShark", Floor, Own)], Gait::Still),
        Monster::Gargoyle => r(
            0x80_8080,
            'G',
            &[part!("GargoyleWings", Body, Darker(1)), part!("GargoyleBody", Body, Own), part!("PHead", Head, Own)],
            HUMAN,
        ),
        Monster::WaterElemental => r(0x00_80FF, 'W', &[part!("WaterElemental", Body, Own), part!("PHead", Head, Own)], HUMAN),
        Monster::JiangShi => r(
            0x80_8020,
            'J',
            &[part!("JiangShi", Body, Own), part!("PHead", Head, HAIR), part!("PFace", Head, Fixed(0xC0_FFC0))],
            HUMAN,
        ),
        Monster::Golem => r(0xC0_8040, 'G', &[part!("PBody", Body, Own), part!("Golemhead", Head, Own)], BIGFOOT),
        Monster::Demon => r(0xC0_2020, 'D', &[part!("PBody", Body, Own), part!("Demon", Head, Own)], HUMAN),
        Monster::Goat => r(0x80_8080, 'g', &[part!("PBody", Body, Own), part!("GoatHead", Head, Own)], BIGFOOT),
        Monster::Bug => r(
            0xC0_8000,
            'x',
            &[part!("BugArmor", ABody, Own), part!("BugAntenna", AHead, Darker(1))],
            Gait::Animal(BUG_LEGS),
        ),
    }
}

/// Body color of `m`, including the bespoke species.
pub fn monster_color(m: Monster) -> u32 {
    match m {
        Monster::Kraken => 0x20_A020,
        Monster::Worm | Monster::WormTail => 0xD0_9050,
        Monster::Dragon | Monster::DragonTail => 0xD0_D000,
        Monster::Tentacle | Monster::TentacleTail => 0x60_8040,
        Monster::Mimic => 0xC0_0000,
        _ => rig_for(m).map_or(0xFF_FFFF, |r| r.color),
    }
}

pub fn monster_glyph(m: Monster) -> char {
    match m {
        Monster::Kraken => 'K',
        Monster::Worm | Monster::WormTail => 'W',
        Monster::Dragon | Monster::DragonTail => 'D',
        Monster::Tentacle | Monster::TentacleTail => 'T',
        Monster::Mimic => '@',
        _ => rig_for(m).map_or('?', |r| r.glyph),
    }
}

/// Stride shape: rises linearly, swings back, and returns over one period.
pub fn footfun(d: f64) -> f64 {
    let d = d - d.floor();
    if d < 0.25 {
        d
    } else if d < 0.75 {
        0.5 - d
    } else {
        d - 1.0
    }
}

/// Which segment of a multi-cell body is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Head,
    Middle,
    /// The last segment.
    End,
}

/// Shape context shared by the composers.
pub(crate) struct Rigger<'a> {
    pub cat: &'a ShapeCatalog,
    /// Body levels apply; otherwise everything is drawn at the floor.
    pub spatial: bool,
    pub detail: u32,
    pub ticks: u64,
    /// Darkening steps of the cell.
    pub fd: u32,
}

impl Rigger<'_> {
    fn factor(&self, lev: Lev) -> f64 {
        let lv = self.cat.levels();
        if self.spatial { lev.factor(lv) } else { lv.floor }
    }

    /// The shape and its transform, or `None` for unknown and disabled shapes.
    /// Solid models already sit at their heights.
    fn place(&self, name: &str, v: &Transmatrix, fac: f64) -> Option<(ShapeId, Transmatrix, Ppr)> {
        let sh = self.cat.get(name)?;
        let id = self.cat.id(name)?;
        let p = self.cat.params();
        let t = if p.solid && sh.triangles { *v } else { p.mscale(self.cat.geom(), v, fac) };
        Some((id, t, sh.prio))
    }

    fn put_at(&self, out: &mut impl DrawSink, name: &str, v: &Transmatrix, fac: f64, col: u32) -> bool {
        match self.place(name, v, fac) {
            Some((shape, transform, prio)) => {
                out.push(DrawRecord::Poly { shape, transform, color: col, prio });
                true
            }
            None => false,
        }
    }

    fn put(&self, out: &mut impl DrawSink, name: &str, v: &Transmatrix, lev: Lev, col: u32) -> bool {
        self.put_at(out, name, v, self.factor(lev), col)
    }

    fn tinted(&self, tint: Tint, body: u32, alpha: u8) -> u32 {
        let rgb = match tint {
            Tint::Own => body,
            Tint::Darker(n) => crate::color::darkened_by(body, n),
            Tint::Fixed(c) => c,
        };
        darkena(rgb, self.fd, alpha)
    }

    /// Floor shadow of `name` under a monster in the flat spatial display.
    fn shadow(&self, out: &mut impl DrawSink, name: &str, v: &Transmatrix) {
        if !self.spatial || self.cat.params().solid {
            return;
        }
        if let Some((shape, transform, _)) = self.place(name, v, self.cat.levels().floor) {
            out.push(DrawRecord::Poly { shape, transform, color: SHADOW_ALPHA, prio: Ppr::MONSTER_SHADOW });
        }
    }

    fn glyph(&self, out: &mut impl DrawSink, v: &Transmatrix, glyph: char, col: u32) {
        let at = self.cat.params().mscale_point(self.cat.geom(), *v * C0, self.factor(Lev::Body));
        out.push(DrawRecord::Glyph { at, glyph, color: darkena(col, self.fd, 0xFF), size: self.cat.scalefactor(), prio: Ppr::MONSTER_BODY });
    }

    /// Legs of a humanoid. Returns the sway applied to the upper body.
    fn humanoid_legs(&self, out: &mut impl DrawSink, v: &Transmatrix, foot: &str, col: u32, footphase: f64) -> Transmatrix {
        let sf = self.cat.scalefactor();
        let g = self.cat.geom();
        let lv = self.cat.levels();
        let fp = footphase / sf;
        let rightfoot = footfun(fp / 0.4 / 2.5) / 4.0 * 2.5 * sf;
        let m = Transmatrix::MIRROR;

        if self.cat.params().solid {
            let hh = self.cat.params().human_height();
            let swing = rightfoot / (hh * 0.4).max(1e-6);
            let groin = g.zpush(lv.groin);
            let ungroin = g.zpush(-lv.groin);
            self.put(out, foot, &(*v * groin * Transmatrix::cspin(0, 2, swing) * ungroin), Lev::Floor, col);
            self.put(out, foot, &(*v * m * groin * Transmatrix::cspin(2, 0, swing) * ungroin), Lev::Floor, col);
            return Transmatrix::spin(-rightfoot);
        }

        let mut legs = vec![(lv.leg, 0.5)];
        if self.detail >= 2 {
            legs.push((lv.leg1, 0.75));
            legs.push((lv.leg3, 0.25));
        }
        if self.spatial {
            for (fac, k) in legs {
                self.put_at(out, "HumanLeg", &(*v * g.xpush(rightfoot * k)), fac, col);
                self.put_at(out, "HumanLeg", &(*v * m * g.xpush(-rightfoot * k)), fac, col);
            }
        }
        self.put(out, foot, &(*v * g.xpush(rightfoot)), Lev::Floor, col);
        self.put(out, foot, &(*v * m * g.xpush(-rightfoot)), Lev::Floor, col);
        Transmatrix::spin(-rightfoot)
    }

    pub fn animal_legs(&self, out: &mut impl DrawSink, v: &Transmatrix, legs: &AnimalLegs, col: u32, footphase: f64) {
        let sf = self.cat.scalefactor();
        let g = self.cat.geom();
        let lv = self.cat.levels();
        let fp = footphase / sf * legs.cadence;
        let (mut rightfoot, mut leftfoot) = if fp == 0.0 {
            (0.0, 0.0)
        } else {
            (footfun(fp / 0.4 / 2.0) / 2.0, footfun(fp / 0.4 / 2.0 - legs.lag) / 2.0)
        };
        rightfoot *= sf / legs.cadence;
        leftfoot *= sf / legs.cadence;
        let m = Transmatrix::MIRROR;
        let feet = [
            (legs.shapes[0], lv.aleg0, rightfoot, leftfoot),
            (legs.shapes[1], lv.aleg0, -rightfoot, -leftfoot),
            (legs.shapes[2], lv.aleg, rightfoot / 2.0, leftfoot / 2.0),
            (legs.shapes[3], lv.aleg, -rightfoot / 2.0, -leftfoot / 2.0),
        ];
        for (shape, lev, r, l) in feet {
            let Some(name) = shape else { continue };
            let fac = if self.spatial { lev } else { lv.floor };
            self.put_at(out, name, &(*v * g.xpush(r)), fac, col);
            self.put_at(out, name, &(*v * m * g.xpush(l)), fac, col);
        }
    }

    /// Bird-level transform bobbing with time, distinct per `phase`.
    fn bob(&self, phase: f64) -> f64 {
        let p = self.cat.params();
        let g = self.cat.geom();
        let lev = p.factor_to_lev(g, self.cat.levels().bird);
        let s = (TAU * (self.ticks % 1000) as f64 / 1000.0 + phase).sin();
        p.lev_to_factor(g, lev + 0.05 * s)
    }

    /// Draws a table-driven monster facing along `v`'s x axis. Returns
    /// `false` when nothing could be drawn but the glyph.
    pub fn draw_rig(&self, out: &mut impl DrawSink, rig: &Rig, v: &Transmatrix, col: u32, footphase: f64, phase: f64) -> bool {
        let Some(first) = rig.parts.first() else { return false };
        if self.cat.get(first.shape).is_none() {
            self.glyph(out, v, rig.glyph, col);
            return false;
        }
        let mut body = *v;
        let mut alpha = 0xFF;
        let mut fixed_fac = None;
        match rig.gait {
            Gait::Still => self.shadow(out, first.shape, v),
            Gait::Humanoid { foot } => {
                self.shadow(out, first.shape, v);
                body = *v * self.humanoid_legs(out, v, foot, col, footphase);
            }
            Gait::Animal(ref legs) => {
                self.shadow(out, first.shape, v);
                self.animal_legs(out, v, legs, col, footphase);
            }
            Gait::Flying => {
                self.shadow(out, first.shape, v);
                let n = self.cat.bird_frame_count(first.shape);
                if n > 0 {
                    let i = (self.ticks / 60) as usize % n;
                    if let Some(shape) = self.cat.bird_frame_id(first.shape, i) {
                        out.push(DrawRecord::Poly { shape, transform: *v, color: self.tinted(first.tint, col, 0xFF), prio: Ppr::MONSTER_BODY });
                        for p in &rig.parts[1..] {
                            self.put(out, p.shape, v, Lev::Floor, self.tinted(p.tint, col, 0xFF));
                        }
                        return true;
                    }
                }
                fixed_fac = Some(if self.spatial { self.bob(phase) } else { self.cat.levels().floor });
            }
            Gait::Floating => {
                alpha = 0x80;
                fixed_fac = Some(self.factor(Lev::Ghost));
            }
        }
        for p in rig.parts {
            let color = self.tinted(p.tint, col, alpha);
            match fixed_fac {
                Some(fac) => self.put_at(out, p.shape, &body, fac, color),
                None => self.put(out, p.shape, &body, p.lev, color),
            };
        }
        true
    }

    /// One segment of a worm, dragon or tentacle. `v` faces away from the tail.
    pub fn draw_segment(&self, out: &mut impl DrawSink, m: Monster, kind: SegmentKind, v: &Transmatrix, col: u32) {
        let c = darkena(col, self.fd, 0xFF);
        let eyes = darkena(0x00_0000, 0, 0xFF);
        let drawn = match (m, kind) {
            (Monster::Worm | Monster::WormTail, SegmentKind::Head) => {
                self.put(out, "WormHead", v, Lev::Floor, c) && self.put(out, "WormEyes", v, Lev::Floor, eyes)
            }
            (Monster::Worm | Monster::WormTail, SegmentKind::Middle) => self.put(out, "WormSegment", v, Lev::Floor, c),
            (Monster::Worm | Monster::WormTail, SegmentKind::End) => self.put(out, "WormTail", v, Lev::Floor, c),
            (Monster::Dragon | Monster::DragonTail, SegmentKind::Head) => {
                self.put(out, "DragonWings", v, Lev::ABody, darkena(gradient(col, 0, 0.0, 0.3, 1.0), self.fd, 0xFF));
                self.put(out, "DragonHead", v, Lev::AHead, c);
                self.put(out, "DragonEyes", v, Lev::AHead, eyes)
            }
            (Monster::Dragon | Monster::DragonTail, SegmentKind::Middle) => {
                self.put(out, "DragonLegs", v, Lev::ALeg, c);
                self.put(out, "DragonSegment", v, Lev::ABody, c)
            }
            (Monster::Dragon | Monster::DragonTail, SegmentKind::End) => self.put(out, "DragonTail", v, Lev::ABody, c),
            (_, SegmentKind::Head) => self.put(out, "TentHead", v, Lev::Floor, c),
            _ => self.put(out, "Tentacle", v, Lev::Floor, c),
        };
        if !drawn {
            self.glyph(out, v, monster_glyph(m), col);
        }
    }

    pub fn draw_kraken(&self, out: &mut impl DrawSink, v: &Transmatrix, col: u32) {
        let c = darkena(col, self.fd, 0xFF);
        if !self.put(out, "KrakenHead", v, Lev::Floor, c) {
            self.glyph(out, v, monster_glyph(Monster::Kraken), col);
            return;
        }
        let m = *v * Transmatrix::MIRROR;
        for w in [v, &m] {
            self.put(out, "KrakenEye", w, Lev::Floor, darkena(0xFF_FFFF, self.fd, 0xFF));
            self.put(out, "KrakenEye2", w, Lev::Floor, darkena(0x00_0000, 0, 0xFF));
        }
    }

    /// A mimic is the player's mirror image in its own color.
    pub fn draw_mimic(&self, out: &mut impl DrawSink, v: &Transmatrix, col: u32, footphase: f64) -> bool {
        self.draw_rig(out, &PLAYER, &(*v * Transmatrix::MIRROR), col, footphase, 0.0)
    }

    pub fn draw_item(&self, out: &mut impl DrawSink, item: Item, v: &Transmatrix, col: u32) -> bool {
        let spin = spin_tick(self.ticks, 1500, 0.0);
        let (name, lev, prio) = match item {
            Item::None => return false,
            Item::Gem => ("Gem", Lev::ABody, Ppr::ITEM),
            Item::Key => ("Key", Lev::ABody, Ppr::ITEM),
            Item::Orb => ("Disk", Lev::ABody, Ppr::ITEM),
            Item::Star => ("Star", Lev::ABody, Ppr::ITEM),
            Item::Snowball => ("Snowball", Lev::Floor, Ppr::ITEM),
            Item::Heptamarker => ("HeptaMarker", Lev::Floor, Ppr::HEPTAMARK),
        };
        let t = if item == Item::Heptamarker { *v } else { *v * spin };
        match self.place(name, &t, self.factor(lev)) {
            Some((shape, transform, _)) => {
                out.push(DrawRecord::Poly { shape, transform, color: darkena(col, self.fd, 0xFF), prio });
                true
            }
            None => {
                let at = *v * C0;
                out.push(DrawRecord::Glyph { at, glyph: item_glyph(item), color: darkena(col, self.fd, 0xFF), size: self.cat.scalefactor(), prio });
                false
            }
        }
    }

    pub fn draw_boat(&self, out: &mut impl DrawSink, v: &Transmatrix) {
        self.put(out, "BoatOuter", v, Lev::Boat, darkena(0xC0_6000, self.fd, 0xFF));
        self.put(out, "BoatInner", v, Lev::Boat2, darkena(0x80_4000, self.fd, 0xFF));
    }

    /// Stars circling the head of a stunned monster.
    pub fn stun_stars(&self, out: &mut impl DrawSink, v: &Transmatrix, stuntime: u8) {
        let Some(id) = self.cat.id("Star") else { return };
        let g = self.cat.geom();
        let r = self.cat.scalefactor() * 0.1;
        let n = stuntime.min(3) as usize;
        for i in 0..n {
            let a = TAU * i as f64 / n as f64;
            let t = *v * spin_tick(self.ticks, 1000, a / TAU) * g.xpush(r) * Transmatrix::diag(0.3, 0.3, 0.3, 1.0);
            let transform = self.cat.params().mscale(g, &t, self.factor(Lev::Head));
            out.push(DrawRecord::Poly { shape: id, transform, color: 0xFF_FF00FF, prio: Ppr::STUNSTARS });
        }
    }
}

/// 0xRRGGBB of an item.
pub fn item_color(item: Item) -> u32 {
    match item {
        Item::None => 0,
        Item::Gem => 0x40_80FF,
        Item::Key => 0xFF_D500,
        Item::Orb => 0xFF_40FF,
        Item::Star => 0xFF_FF80,
        Item::Snowball => 0xE0_E0FF,
        Item::Heptamarker => 0x80_8080,
    }
}

pub fn item_glyph(item: Item) -> char {
    match item {
        Item::None => ' ',
        Item::Gem => '$',
        Item::Key => '!',
        Item::Orb => 'o',
        Item::Star => '*',
        Item::Snowball => 'o',
        Item::Heptamarker => '.',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdraw_geom::{Geometry, RegularTiling};
    use hyperdraw_shapes::{ModelParams, SilhouetteLibrary};

    fn catalog(solid: bool) -> ShapeCatalog {
        let params = ModelParams { solid, ..ModelParams::default() };
        ShapeCatalog::build(Geometry::Hyperbolic, RegularTiling::new(7, 3), params, &SilhouetteLibrary::builtin(), &[7])
    }

    fn rigger(cat: &ShapeCatalog) -> Rigger<'_> {
        Rigger { cat, spatial: true, detail: 2, ticks: 0, fd: 0 }
    }

    #[test]
    fn footfun_is_a_triangle_wave() {
        assert_eq!(footfun(0.0), 0.0);
        assert!((footfun(0.25) - 0.25).abs() < 1e-12);
        assert!((footfun(0.5) - 0.0).abs() < 1e-12);
        assert!((footfun(0.75) + 0.25).abs() < 1e-12);
        assert!((footfun(1.1) - footfun(0.1)).abs() < 1e-12);
    }

    #[test]
    fn table_covers_every_plain_species() {
        for m in [Monster::Wolf, Monster::Knight, Monster::Eagle, Monster::Ghost, Monster::Bug] {
            let r = rig_for(m).unwrap();
            assert!(!r.parts.is_empty());
        }
        assert!(rig_for(Monster::Worm).is_none());
        assert_eq!(monster_glyph(Monster::Dragon), 'D');
    }

    #[test]
    fn every_rig_part_is_a_known_shape() {
        let cat = catalog(false);
        for m in [
            Monster::Player,
            Monster::Wolf,
            Monster::Dog,
            Monster::Cat,
            Monster::Familiar,
            Monster::Skeleton,
            Monster::Knight,
            Monster::Princess,
            Monster::Rat,
            Monster::Bull,
            Monster::Reptile,
            Monster::Bug,
            Monster::Golem,
        ] {
            let r = rig_for(m).unwrap();
            for p in r.parts {
                assert!(cat.id(p.shape).is_some(), "{:?}: {}", m, p.shape);
            }
        }
    }

    #[test]
    fn standing_wolf_has_all_feet_together() {
        let cat = catalog(false);
        let rg = rigger(&cat);
        let mut out: Vec<DrawRecord> = Vec::new();
        rg.animal_legs(&mut out, &Transmatrix::IDENTITY, &WOLF_LEGS, 0xFF_FFFF, 0.0);
        assert_eq!(out.len(), 8);
        let DrawRecord::Poly { transform: a, .. } = &out[0] else { panic!() };
        let DrawRecord::Poly { transform: b, .. } = &out[2] else { panic!() };
        assert!(a.max_diff(b) < 1e-12);
    }

    #[test]
    fn humanoid_is_shadowed_and_layered() {
        let cat = catalog(false);
        let rg = rigger(&cat);
        let mut out: Vec<DrawRecord> = Vec::new();
        assert!(rg.draw_rig(&mut out, &PLAYER, &Transmatrix::IDENTITY, 0xFF_FFFF, 0.3, 0.0));
        assert_eq!(out[0].prio(), Ppr::MONSTER_SHADOW);
        let body = cat.id("PBody").unwrap();
        assert!(out.iter().any(|r| matches!(r, DrawRecord::Poly { shape, .. } if *shape == body)));
    }

    #[test]
    fn missing_shape_falls_back_to_glyph() {
        let cat = catalog(false);
        let rg = rigger(&cat);
        let rig = Rig { color: 0xFF, glyph: 'Z', parts: &[part!("NoSuchShape", Body, Tint::Own)], gait: Gait::Still };
        let mut out: Vec<DrawRecord> = Vec::new();
        assert!(!rg.draw_rig(&mut out, &rig, &Transmatrix::IDENTITY, 0xFF, 0.0, 0.0));
        assert!(matches!(out[..], [DrawRecord::Glyph { glyph: 'Z', .. }]));
    }

    #[test]
    fn worm_segments_pick_their_shapes() {
        let cat = catalog(false);
        let rg = rigger(&cat);
        let mut out: Vec<DrawRecord> = Vec::new();
        rg.draw_segment(&mut out, Monster::WormTail, SegmentKind::End, &Transmatrix::IDENTITY, 0xFF);
        let tail = cat.id("WormTail").unwrap();
        assert!(matches!(out[..], [DrawRecord::Poly { shape, .. }] if shape == tail));
    }

    #[test]
    fn items_spin_at_their_level() {
        let cat = catalog(false);
        let rg = rigger(&cat);
        let mut out: Vec<DrawRecord> = Vec::new();
        assert!(rg.draw_item(&mut out, Item::Gem, &Transmatrix::IDENTITY, item_color(Item::Gem)));
        assert!(!rg.draw_item(&mut out, Item::None, &Transmatrix::IDENTITY, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].prio(), Ppr::ITEM);
    }
}
