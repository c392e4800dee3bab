//! Draw priorities and side-panel bands.
//!
//! Priorities are painted in increasing order; a record queued at a lower
//! priority is hidden by anything queued above it.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Ppr(pub i32);

impl Default for Ppr {
    fn default() -> Self {
        Ppr::DEFAULT
    }
}

impl Ppr {
    pub const ZERO: Ppr = Ppr(0);
    pub const EUCLIDEAN_SKY: Ppr = Ppr(1);
    pub const OUTCIRCLE: Ppr = Ppr(2);
    pub const SKY: Ppr = Ppr(3);
    pub const MOVESTAR: Ppr = Ppr(4);
    pub const MINUSINF: Ppr = Ppr(5);
    pub const BELOWBOTTOMM: Ppr = Ppr(6);
    pub const BELOWBOTTOM: Ppr = Ppr(7);
    pub const BELOWBOTTOMP: Ppr = Ppr(8);
    pub const BELOWBOTTOM_FALLANIM: Ppr = Ppr(9);
    pub const LAKEBOTTOM: Ppr = Ppr(10);
    pub const HELLSPIKE: Ppr = Ppr(11);
    pub const INLAKEWALLM: Ppr = Ppr(12);
    pub const INLAKEWALL: Ppr = Ppr(13);
    pub const INLAKEWALLP: Ppr = Ppr(14);
    pub const INLAKEWALL_FALLANIM: Ppr = Ppr(15);
    pub const SUBLAKELEV: Ppr = Ppr(16);
    pub const LAKELEV: Ppr = Ppr(17);
    pub const BOATLEV: Ppr = Ppr(18);
    pub const BOATLEV2: Ppr = Ppr(19);
    pub const BOATLEV3: Ppr = Ppr(20);
    pub const LAKEWALLM: Ppr = Ppr(21);
    pub const LAKEWALL: Ppr = Ppr(22);
    pub const LAKEWALLP: Ppr = Ppr(23);
    pub const LAKEWALL_FALLANIM: Ppr = Ppr(24);
    pub const FLOOR_TOWER: Ppr = Ppr(25);
    pub const FLOOR: Ppr = Ppr(26);
    pub const FLOOR_DRAGON: Ppr = Ppr(27);
    pub const FLOORA: Ppr = Ppr(28);
    pub const FLOORB: Ppr = Ppr(29);
    pub const FLOORC: Ppr = Ppr(30);
    pub const FLOORD: Ppr = Ppr(31);
    pub const LIZEYE: Ppr = Ppr(32);
    pub const BFLOOR: Ppr = Ppr(33);
    pub const GFLOORA: Ppr = Ppr(34);
    pub const GFLOORB: Ppr = Ppr(35);
    pub const GFLOORC: Ppr = Ppr(36);
    pub const WALLSHADOW: Ppr = Ppr(37);
    pub const STRUCT0: Ppr = Ppr(38);
    pub const STRUCT1: Ppr = Ppr(39);
    pub const STRUCT2: Ppr = Ppr(40);
    pub const STRUCT3: Ppr = Ppr(41);
    pub const THORNS: Ppr = Ppr(42);
    pub const WALL: Ppr = Ppr(43);
    // Snake-level bands: m/s/p/(top) for level 1, then 2 and 3, four apart.
    pub const REDWALLM: Ppr = Ppr(44);
    pub const REDWALLS: Ppr = Ppr(45);
    pub const REDWALLP: Ppr = Ppr(46);
    pub const REDWALL: Ppr = Ppr(47);
    pub const REDWALLM2: Ppr = Ppr(48);
    pub const REDWALLS2: Ppr = Ppr(49);
    pub const REDWALLP2: Ppr = Ppr(50);
    pub const REDWALLT2: Ppr = Ppr(51);
    pub const REDWALLM3: Ppr = Ppr(52);
    pub const REDWALLS3: Ppr = Ppr(53);
    pub const REDWALLP3: Ppr = Ppr(54);
    pub const REDWALLT3: Ppr = Ppr(55);
    pub const HEPTAMARK: Ppr = Ppr(56);
    pub const ITEM_BELOW: Ppr = Ppr(57);
    pub const ITEM: Ppr = Ppr(58);
    pub const ITEMA: Ppr = Ppr(59);
    pub const ITEMB: Ppr = Ppr(60);
    pub const BIGSTATUE: Ppr = Ppr(61);
    pub const WALL3M: Ppr = Ppr(62);
    pub const WALL3S: Ppr = Ppr(63);
    pub const WALL3P: Ppr = Ppr(64);
    pub const WALL3: Ppr = Ppr(65);
    pub const WALL3A: Ppr = Ppr(66);
    pub const HIDDEN: Ppr = Ppr(67);
    pub const GIANTSHADOW: Ppr = Ppr(68);
    pub const TENTACLE0: Ppr = Ppr(69);
    pub const TENTACLE1: Ppr = Ppr(70);
    pub const ONTENTACLE: Ppr = Ppr(71);
    pub const ONTENTACLE_EYES: Ppr = Ppr(72);
    pub const FOOTSHADOW: Ppr = Ppr(73);
    pub const DEFAULT: Ppr = Ppr(74);
    pub const MONSTER_SHADOW: Ppr = Ppr(75);
    pub const MONSTER_FOOT: Ppr = Ppr(76);
    pub const MONSTER_LEG: Ppr = Ppr(77);
    pub const MONSTER_GROIN: Ppr = Ppr(78);
    pub const MONSTER_SUBWPN: Ppr = Ppr(79);
    pub const MONSTER_WPN: Ppr = Ppr(80);
    pub const MONSTER_BODY: Ppr = Ppr(81);
    pub const MONSTER_ARMOR0: Ppr = Ppr(82);
    pub const MONSTER_ARMOR1: Ppr = Ppr(83);
    pub const MONSTER_CLOAK: Ppr = Ppr(84);
    pub const MONSTER_NECK: Ppr = Ppr(85);
    pub const MONSTER_HEAD: Ppr = Ppr(86);
    pub const MONSTER_FACE: Ppr = Ppr(87);
    pub const MONSTER_EYE0: Ppr = Ppr(88);
    pub const MONSTER_EYE1: Ppr = Ppr(89);
    pub const MONSTER_HAIR: Ppr = Ppr(90);
    pub const MONSTER_HAT0: Ppr = Ppr(91);
    pub const MONSTER_HAT1: Ppr = Ppr(92);
    pub const MONSTER_HOODCLOAK1: Ppr = Ppr(93);
    pub const MONSTER_HOODCLOAK2: Ppr = Ppr(94);
    pub const STUNSTARS: Ppr = Ppr(95);
    pub const CARRIED: Ppr = Ppr(96);
    pub const CARRIEDA: Ppr = Ppr(97);
    pub const CARRIEDB: Ppr = Ppr(98);
    pub const PARTICLE: Ppr = Ppr(99);
    pub const SWORDMARK: Ppr = Ppr(100);
    pub const MAGICSWORD: Ppr = Ppr(101);
    pub const MISSILE: Ppr = Ppr(102);
    pub const MINEMARK: Ppr = Ppr(103);
    pub const ARROW: Ppr = Ppr(104);
    pub const MOBILE_ARROW: Ppr = Ppr(105);
    pub const LINE: Ppr = Ppr(106);
    pub const TRANSPARENT_LAKE: Ppr = Ppr(107);
    pub const TRANSPARENT_SHADOW: Ppr = Ppr(108);
    pub const TRANSPARENT_WALL: Ppr = Ppr(109);
    pub const SUPERLINE: Ppr = Ppr(110);
    pub const TEXT: Ppr = Ppr(111);
    pub const CIRCLE: Ppr = Ppr(112);
    pub const MAX: Ppr = Ppr(113);

    /// The priority `k` steps above (or below, for negative `k`) this one.
    #[inline]
    pub const fn offset(self, k: i32) -> Ppr {
        Ppr(self.0 + k)
    }
}

/// Number of side-panel bands per floor shape.
pub const SIDEPARS: usize = 11;

/// Vertical band a side panel spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SidePar {
    /// Snake level `s` to `s + 1`, for `s` in `0..3`.
    Slev(u8),
    /// Top snake level up to the wall top.
    Wts3,
    Wall,
    Lake,
    /// Lake surface down to the lake bottom.
    Ltob,
    /// Lake bottom down to infinity.
    Btoi,
    Sky,
    High,
    High2,
}

impl SidePar {
    pub const ALL: [SidePar; SIDEPARS] = [
        SidePar::Slev(0),
        SidePar::Slev(1),
        SidePar::Slev(2),
        SidePar::Wts3,
        SidePar::Wall,
        SidePar::Lake,
        SidePar::Ltob,
        SidePar::Btoi,
        SidePar::Sky,
        SidePar::High,
        SidePar::High2,
    ];

    pub const fn index(self) -> usize {
        match self {
            SidePar::Slev(s) => {
                if s < 3 {
                    s as usize
                } else {
                    2
                }
            }
            SidePar::Wts3 => 3,
            SidePar::Wall => 4,
            SidePar::Lake => 5,
            SidePar::Ltob => 6,
            SidePar::Btoi => 7,
            SidePar::Sky => 8,
            SidePar::High => 9,
            SidePar::High2 => 10,
        }
    }

    /// Bands below the floor hang downwards from it.
    pub const fn is_below_floor(self) -> bool {
        matches!(self, SidePar::Lake | SidePar::Ltob | SidePar::Btoi)
    }
}
