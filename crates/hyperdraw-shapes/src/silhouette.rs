//! Named 2D source outlines the models are built from.
//!
//! A built-in procedural set covers every name the model driver and the
//! renderer look up. Any outline can be replaced (or a new one added) from
//! `[[silhouette]]` entries of a TOML file.

use crate::ornaments::ORNAMENTS;
use crate::ppr::Ppr;
use hashbrown::HashMap;
use serde::Deserialize;
use std::error::Error;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// An outline in silhouette units (multiples of `S`), without a closing point.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Silhouette {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub prio: Option<Ppr>,
}

impl Silhouette {
    pub fn prio(&self) -> Ppr {
        self.prio.unwrap_or(Ppr::MONSTER_BODY)
    }
}

/// Procedural outline recipes.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Gen {
    /// Center, radii, point count. Starts on the +x end and runs through `y > 0`.
    Ellipse([f64; 2], [f64; 2], usize),
    /// Spikes, outer radius, inner radius.
    Star(usize, f64, f64),
    /// Petals, mean radius, petal depth.
    Flower(usize, f64, f64),
    Poly(&'static [[f64; 2]]),
    /// Registered with no points; filled in by a builder.
    Empty,
}

impl Gen {
    pub(crate) fn points(self) -> Vec<[f64; 2]> {
        match self {
            Gen::Ellipse([cx, cy], [rx, ry], n) => (0..n)
                .map(|i| {
                    let a = 2.0 * PI * i as f64 / n as f64;
                    [cx + rx * a.cos(), cy + ry * a.sin()]
                })
                .collect(),
            Gen::Star(k, ro, ri) => (0..2 * k)
                .map(|i| {
                    let a = PI * i as f64 / k as f64;
                    let r = if i % 2 == 0 { ro } else { ri };
                    [r * a.cos(), r * a.sin()]
                })
                .collect(),
            Gen::Flower(k, r, d) => {
                let n = 12 * k;
                (0..n)
                    .map(|i| {
                        let a = 2.0 * PI * i as f64 / n as f64;
                        let rr = r + d * (k as f64 * a).cos();
                        [rr * a.cos(), rr * a.sin()]
                    })
                    .collect()
            }
            Gen::Poly(p) => p.to_vec(),
            Gen::Empty => Vec::new(),
        }
    }
}

pub(crate) type Builtin = (&'static str, Gen, Ppr);

use Gen::{Ellipse as E, Empty};

const BODY: Ppr = Ppr::MONSTER_BODY;

/// Creature outlines. Humanoid bodies must stay wide enough for the arm and
/// hand extraction (`|y| > .14` and `x + y > .13`).
pub(crate) const CREATURES: &[Builtin] = &[
    // humanoids
    ("PBody", E([0.0, 0.0], [0.10, 0.20], 40), BODY),
    ("Yeti", E([0.0, 0.0], [0.12, 0.24], 40), BODY),
    ("FemaleBody", E([0.0, 0.0], [0.09, 0.19], 40), BODY),
    ("RaiderBody", E([0.0, 0.0], [0.10, 0.20], 40), BODY),
    ("SkeletonBody", E([0.0, 0.0], [0.08, 0.19], 40), BODY),
    ("FatBody", E([0.0, 0.0], [0.13, 0.22], 40), BODY),
    ("WaterElemental", E([0.0, 0.0], [0.11, 0.21], 40), BODY),
    ("JiangShi", E([0.0, 0.0], [0.10, 0.20], 40), BODY),
    // humanoid parts
    ("PBodyOnly", E([0.0, 0.0], [0.08, 0.12], 28), BODY),
    ("PBodyArm", E([-0.05, 0.17], [0.04, 0.03], 12), BODY),
    ("PBodyHand", E([0.03, 0.17], [0.02, 0.02], 8), BODY),
    ("HumanGroin", E([0.0, 0.0], [0.06, 0.10], 16), Ppr::MONSTER_GROIN),
    ("HumanNeck", E([0.0, 0.0], [0.03, 0.04], 12), Ppr::MONSTER_NECK),
    ("HumanLeg", E([0.0, 0.0], [0.03, 0.03], 12), Ppr::MONSTER_LEG),
    ("HumanFoot", E([0.03, 0.0], [0.06, 0.03], 16), Ppr::MONSTER_FOOT),
    ("YetiFoot", E([0.03, 0.0], [0.07, 0.04], 16), Ppr::MONSTER_FOOT),
    ("SkeletalFoot", E([0.03, 0.0], [0.05, 0.02], 12), Ppr::MONSTER_FOOT),
    ("PFace", E([0.04, 0.0], [0.02, 0.04], 12), Ppr::MONSTER_FACE),
    ("PHeadOnly", Empty, Ppr::MONSTER_HEAD),
    // heads and hats
    ("PHead", E([0.0, 0.0], [0.07, 0.06], 24), Ppr::MONSTER_HEAD),
    ("FemaleHair", E([-0.02, 0.0], [0.09, 0.075], 24), Ppr::MONSTER_HAIR),
    ("Skull", E([0.0, 0.0], [0.065, 0.055], 24), Ppr::MONSTER_HEAD),
    ("Golemhead", E([0.0, 0.0], [0.07, 0.07], 16), Ppr::MONSTER_HEAD),
    ("RatHead", E([0.02, 0.0], [0.08, 0.05], 24), Ppr::MONSTER_HEAD),
    ("Demon", Gen::Star(6, 0.085, 0.06), Ppr::MONSTER_HEAD),
    ("GoatHead", E([0.01, 0.0], [0.08, 0.06], 24), Ppr::MONSTER_HEAD),
    ("Turban1", E([-0.01, 0.0], [0.075, 0.07], 24), Ppr::MONSTER_HAT0),
    ("VikingHelmet", E([0.0, 0.0], [0.075, 0.065], 24), Ppr::MONSTER_HAT0),
    ("WestHat1", E([0.0, 0.0], [0.1, 0.09], 24), Ppr::MONSTER_HAT0),
    ("PirateHood", E([-0.01, 0.0], [0.08, 0.07], 24), Ppr::MONSTER_HAT0),
    // armors and cloaks
    ("KnightArmor", E([0.0, 0.0], [0.08, 0.13], 24), Ppr::MONSTER_ARMOR0),
    ("KnightCloak", E([-0.03, 0.0], [0.10, 0.16], 24), Ppr::MONSTER_CLOAK),
    ("PrinceDress", E([0.0, 0.0], [0.09, 0.14], 24), Ppr::MONSTER_ARMOR0),
    ("PrincessDress", E([0.0, 0.0], [0.11, 0.15], 24), Ppr::MONSTER_ARMOR0),
    ("Armor", E([0.0, 0.0], [0.075, 0.065], 24), Ppr::MONSTER_HAT0),
    ("Hood", E([-0.01, 0.0], [0.085, 0.075], 24), Ppr::MONSTER_HOODCLOAK1),
    ("WightCloak", E([-0.03, 0.0], [0.10, 0.16], 24), Ppr::MONSTER_CLOAK),
    ("RaiderArmor", E([0.0, 0.0], [0.07, 0.12], 24), Ppr::MONSTER_ARMOR0),
    ("Suspenders", E([0.0, 0.0], [0.06, 0.11], 20), Ppr::MONSTER_ARMOR1),
    ("FemaleDress", E([0.0, 0.0], [0.10, 0.14], 24), Ppr::MONSTER_ARMOR0),
    ("RatCape2", E([-0.04, 0.0], [0.09, 0.13], 24), Ppr::MONSTER_CLOAK),
    // animal legs and paws
    ("WolfFrontLeg", E([0.0, 0.0], [0.025, 0.025], 12), Ppr::MONSTER_LEG),
    ("WolfRearLeg", E([0.0, 0.0], [0.025, 0.025], 12), Ppr::MONSTER_LEG),
    ("WolfFrontPaw", E([0.02, 0.0], [0.04, 0.025], 12), Ppr::MONSTER_FOOT),
    ("WolfRearPaw", E([0.02, 0.0], [0.04, 0.025], 12), Ppr::MONSTER_FOOT),
    ("DogFrontLeg", E([0.0, 0.0], [0.022, 0.022], 12), Ppr::MONSTER_LEG),
    ("DogRearLeg", E([0.0, 0.0], [0.022, 0.022], 12), Ppr::MONSTER_LEG),
    ("DogFrontPaw", E([0.02, 0.0], [0.035, 0.022], 12), Ppr::MONSTER_FOOT),
    ("DogRearPaw", E([0.02, 0.0], [0.035, 0.022], 12), Ppr::MONSTER_FOOT),
    ("ReptileFrontLeg", E([0.0, 0.0], [0.02, 0.02], 12), Ppr::MONSTER_LEG),
    ("ReptileRearLeg", E([0.0, 0.0], [0.02, 0.02], 12), Ppr::MONSTER_LEG),
    ("ReptileFrontFoot", E([0.02, 0.0], [0.035, 0.03], 12), Ppr::MONSTER_FOOT),
    ("ReptileRearFoot", E([0.02, 0.0], [0.035, 0.03], 12), Ppr::MONSTER_FOOT),
    ("BullFrontHoof", E([0.0, 0.0], [0.03, 0.03], 12), Ppr::MONSTER_FOOT),
    ("BullRearHoof", E([0.0, 0.0], [0.03, 0.03], 12), Ppr::MONSTER_FOOT),
    // animal bodies and heads (revolution profiles are symmetric about y = 0)
    ("ReptileBody", E([0.0, 0.0], [0.16, 0.06], 24), BODY),
    ("TrylobiteBody", E([0.0, 0.0], [0.12, 0.08], 24), BODY),
    ("WolfBody", E([0.0, 0.0], [0.20, 0.06], 24), BODY),
    ("WolfHead", E([0.18, 0.0], [0.07, 0.05], 24), Ppr::MONSTER_HEAD),
    ("FamiliarHead", E([0.16, 0.0], [0.06, 0.045], 24), Ppr::MONSTER_HEAD),
    ("DogTorso", E([0.0, 0.0], [0.17, 0.055], 24), BODY),
    ("DogBody", E([0.0, 0.0], [0.17, 0.055], 24), BODY),
    ("DogHead", E([0.16, 0.0], [0.065, 0.045], 24), Ppr::MONSTER_HEAD),
    ("CatBody", E([0.0, 0.0], [0.15, 0.05], 24), BODY),
    ("CatHead", E([0.14, 0.0], [0.055, 0.06], 24), Ppr::MONSTER_HEAD),
    ("ReptileHead", E([0.17, 0.0], [0.06, 0.04], 24), Ppr::MONSTER_HEAD),
    ("BullBody", E([0.0, 0.0], [0.2, 0.09], 24), BODY),
    ("BullHead", E([0.2, 0.0], [0.07, 0.06], 24), Ppr::MONSTER_HEAD),
    ("BullHorn", E([0.22, 0.0], [0.02, 0.1], 12), Ppr::MONSTER_HAT0),
    ("TrylobiteHead", E([0.14, 0.0], [0.05, 0.07], 24), Ppr::MONSTER_HEAD),
    ("Shark", E([0.0, 0.0], [0.22, 0.07], 24), BODY),
    ("TinyShark", E([0.0, 0.0], [0.1, 0.035], 16), BODY),
    ("Ghost", E([0.0, 0.0], [0.12, 0.1], 24), BODY),
    ("MiniGhost", E([0.0, 0.0], [0.06, 0.05], 16), BODY),
    ("Eagle", E([0.0, 0.0], [0.08, 0.25], 32), BODY),
    ("Hawk", E([0.0, 0.0], [0.08, 0.22], 32), BODY),
    ("TinyBird", E([0.0, 0.0], [0.04, 0.12], 24), BODY),
    ("GargoyleWings", E([0.0, 0.0], [0.07, 0.24], 32), BODY),
    ("GargoyleBody", E([0.0, 0.0], [0.1, 0.07], 24), BODY),
    ("GadflyWing", E([0.0, 0.0], [0.04, 0.14], 24), BODY),
    ("GadflyBody", E([0.0, 0.0], [0.08, 0.03], 16), BODY),
    ("BatWings", E([0.0, 0.0], [0.06, 0.2], 32), BODY),
    ("BatBody", E([0.0, 0.0], [0.06, 0.04], 16), BODY),
    ("ButterflyBody", E([0.0, 0.0], [0.06, 0.015], 16), BODY),
    ("BugLeg", E([0.0, 0.0], [0.1, 0.015], 16), Ppr::MONSTER_LEG),
    ("BugAntenna", E([0.12, 0.0], [0.05, 0.008], 12), Ppr::MONSTER_HAT0),
    ("BugArmor", E([0.0, 0.0], [0.12, 0.07], 24), Ppr::MONSTER_ARMOR0),
    ("FoxTail1", E([-0.18, 0.0], [0.08, 0.03], 16), Ppr::MONSTER_BODY),
    ("FoxTail2", E([-0.18, 0.0], [0.06, 0.02], 16), Ppr::MONSTER_BODY),
    ("RatTail", E([-0.14, 0.0], [0.1, 0.01], 12), Ppr::MONSTER_BODY),
    // segmented creatures
    ("WormHead", E([0.0, 0.0], [0.1, 0.08], 24), BODY),
    ("WormSegment", E([0.0, 0.0], [0.1, 0.08], 24), BODY),
    ("SmallWormSegment", E([0.0, 0.0], [0.07, 0.055], 24), BODY),
    ("WormTail", E([0.0, 0.0], [0.1, 0.05], 24), BODY),
    ("SmallWormTail", E([0.0, 0.0], [0.07, 0.035], 24), BODY),
    ("TentHead", E([0.0, 0.0], [0.1, 0.07], 24), BODY),
    ("DragonSegment", E([0.0, 0.0], [0.12, 0.08], 24), BODY),
    ("DragonHead", E([0.0, 0.0], [0.11, 0.07], 24), Ppr::MONSTER_HEAD),
    ("DragonTail", E([0.0, 0.0], [0.12, 0.05], 24), BODY),
    ("DragonLegs", E([0.0, 0.0], [0.05, 0.12], 24), Ppr::MONSTER_LEG),
    ("DragonWings", E([0.0, 0.0], [0.06, 0.22], 32), Ppr::MONSTER_BODY),
    ("DragonNostril", E([0.1, 0.02], [0.01, 0.01], 8), Ppr::MONSTER_EYE0),
    ("KrakenHead", E([0.0, 0.0], [0.14, 0.12], 24), BODY),
    ("SeaTentacle", E([0.0, 0.0], [0.2, 0.03], 24), Ppr::TENTACLE1),
    ("Tentacle", E([0.0, 0.0], [0.2, 0.04], 24), Ppr::TENTACLE1),
    // eyes (the y > 0 half is the seat of a mirrored pair)
    ("SlimeEyes", E([0.05, 0.04], [0.015, 0.015], 8), Ppr::MONSTER_EYE0),
    ("GhostEyes", E([0.06, 0.035], [0.015, 0.015], 8), Ppr::MONSTER_EYE0),
    ("MiniEyes", E([0.03, 0.02], [0.008, 0.008], 8), Ppr::MONSTER_EYE0),
    ("WormEyes", E([0.06, 0.035], [0.012, 0.012], 8), Ppr::MONSTER_EYE0),
    ("DragonEyes", E([0.06, 0.035], [0.012, 0.012], 8), Ppr::MONSTER_EYE0),
    ("KrakenEye", E([0.08, 0.0], [0.03, 0.03], 12), Ppr::MONSTER_EYE0),
    ("KrakenEye2", E([0.09, 0.0], [0.012, 0.012], 8), Ppr::MONSTER_EYE1),
    ("Wolf1", E([0.2, 0.025], [0.01, 0.01], 8), Ppr::MONSTER_EYE0),
    ("Wolf2", E([0.2, -0.025], [0.01, 0.01], 8), Ppr::MONSTER_EYE0),
    ("Wolf3", E([0.22, 0.0], [0.01, 0.01], 8), Ppr::MONSTER_EYE0),
    ("WolfEyes", E([0.21, 0.02], [0.012, 0.012], 8), Ppr::MONSTER_EYE0),
    ("FamiliarEye", E([0.19, 0.02], [0.01, 0.01], 8), Ppr::MONSTER_EYE0),
    ("ReptileEye", E([0.19, 0.02], [0.01, 0.01], 8), Ppr::MONSTER_EYE0),
    ("GadflyEye", E([0.07, 0.01], [0.008, 0.008], 8), Ppr::MONSTER_EYE0),
    ("SkullEyes", E([0.04, 0.025], [0.012, 0.012], 8), Ppr::MONSTER_EYE0),
    ("Eyes", E([0.05, 0.03], [0.012, 0.012], 8), Ppr::MONSTER_EYE0),
    ("Slime", E([0.0, 0.0], [0.12, 0.12], 24), BODY),
    // weapons
    ("PSword", E([0.1, -0.12], [0.12, 0.012], 8), Ppr::MONSTER_WPN),
    ("MagicSword", E([0.15, 0.0], [0.15, 0.015], 8), Ppr::MAGICSWORD),
];

/// The outline set the models are built from, in a stable order.
#[derive(Clone, Debug, Default)]
pub struct SilhouetteLibrary {
    entries: Vec<Silhouette>,
    by_name: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct SilhouetteFile {
    #[serde(default)]
    silhouette: Vec<Silhouette>,
}

impl SilhouetteLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The procedural creature and ornament outlines.
    pub fn builtin() -> Self {
        let mut lib = Self::new();
        for &(name, recipe, prio) in CREATURES.iter().chain(ORNAMENTS.iter()) {
            lib.insert(Silhouette { name: name.to_string(), points: recipe.points(), prio: Some(prio) });
        }
        lib
    }

    /// Adds an outline, replacing any previous one of the same name in place.
    /// A replacement without a priority keeps the old one.
    pub fn insert(&mut self, mut s: Silhouette) {
        if let Some(&i) = self.by_name.get(&s.name) {
            if s.prio.is_none() {
                s.prio = self.entries[i].prio;
            }
            self.entries[i] = s;
        } else {
            self.by_name.insert(s.name.clone(), self.entries.len());
            self.entries.push(s);
        }
    }

    /// Built-in outlines overridden by the `[[silhouette]]` entries of `toml_str`.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let file: SilhouetteFile = toml::from_str(toml_str)?;
        let mut lib = Self::builtin();
        let n = file.silhouette.len();
        for s in file.silhouette {
            lib.insert(s);
        }
        log::debug!(target: "shapes", "silhouette overrides={} total={}", n, lib.len());
        Ok(lib)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn get(&self, name: &str) -> Option<&Silhouette> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Silhouette> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let lib = SilhouetteLibrary::builtin();
        assert_eq!(lib.len(), CREATURES.len() + ORNAMENTS.len());
    }

    #[test]
    fn humanoid_parts_are_long_enough() {
        let lib = SilhouetteLibrary::builtin();
        assert!(lib.get("PBodyOnly").unwrap().points.len() >= 27);
        assert!(lib.get("PBodyArm").unwrap().points.len() >= 9);
        assert!(!lib.get("PBodyHand").unwrap().points.is_empty());
    }

    #[test]
    fn toml_override_replaces_points_and_keeps_prio() {
        let src = r#"
            [[silhouette]]
            name = "PHead"
            points = [[0.05, 0.0], [0.0, 0.05], [-0.05, 0.0], [0.0, -0.05]]

            [[silhouette]]
            name = "Custom"
            points = [[0.1, 0.0], [0.0, 0.1], [-0.1, 0.0]]
            prio = 58
        "#;
        let lib = SilhouetteLibrary::from_toml_str(src).unwrap();
        let head = lib.get("PHead").unwrap();
        assert_eq!(head.points.len(), 4);
        assert_eq!(head.prio(), Ppr::MONSTER_HEAD);
        assert_eq!(lib.get("Custom").unwrap().prio(), Ppr::ITEM);
        assert_eq!(lib.len(), SilhouetteLibrary::builtin().len() + 1);
    }

    #[test]
    fn ellipse_starts_on_positive_x() {
        let p = Gen::Ellipse([0.0, 0.0], [0.2, 0.1], 8).points();
        assert!((p[0][0] - 0.2).abs() < 1e-12 && p[0][1].abs() < 1e-12);
        assert!(p[1][1] > 0.0);
    }
}
