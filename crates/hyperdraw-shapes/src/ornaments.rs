//! Outlines of items, markers and floor decorations.

use crate::ppr::Ppr;
use crate::silhouette::{Builtin, Gen};

use Gen::{Ellipse as E, Flower, Poly, Star};

const HALF_FLOOR: &[[f64; 2]] = &[
    [0.0, -0.28],
    [0.14, -0.24],
    [0.24, -0.14],
    [0.28, 0.0],
    [0.24, 0.14],
    [0.14, 0.24],
    [0.0, 0.28],
];

const HALF_MIRROR: &[[f64; 2]] = &[[-0.005, -0.28], [0.005, -0.28], [0.005, 0.28], [-0.005, 0.28]];

const MIRROR: &[[f64; 2]] = &[[-0.01, -0.2], [0.01, -0.2], [0.01, 0.2], [-0.01, 0.2]];

const WIND_ARROW: &[[f64; 2]] = &[
    [0.12, 0.0],
    [0.02, 0.07],
    [0.02, 0.025],
    [-0.12, 0.025],
    [-0.12, -0.025],
    [0.02, -0.025],
    [0.02, -0.07],
];

const KEY: &[[f64; 2]] = &[
    [0.08, 0.02],
    [-0.02, 0.02],
    [-0.02, 0.05],
    [-0.08, 0.05],
    [-0.08, -0.05],
    [-0.02, -0.05],
    [-0.02, -0.02],
    [0.04, -0.02],
    [0.04, -0.04],
    [0.06, -0.04],
    [0.06, -0.02],
    [0.08, -0.02],
];

const TRIANGLE: &[[f64; 2]] = &[[0.08, 0.0], [-0.04, 0.07], [-0.04, -0.07]];

const CROSS: &[[f64; 2]] = &[
    [0.02, 0.02],
    [0.02, 0.08],
    [-0.02, 0.08],
    [-0.02, 0.02],
    [-0.08, 0.02],
    [-0.08, -0.02],
    [-0.02, -0.02],
    [-0.02, -0.08],
    [0.02, -0.08],
    [0.02, -0.02],
    [0.08, -0.02],
    [0.08, 0.02],
];

pub(crate) const ORNAMENTS: &[Builtin] = &[
    ("Disk", E([0.0, 0.0], [0.1, 0.1], 24), Ppr::ITEM),
    ("Star", Star(5, 0.12, 0.05), Ppr::ITEM),
    ("GiantStar", Star(6, 0.3, 0.18), Ppr::WALL3A),
    ("Ring", E([0.0, 0.0], [0.12, 0.12], 24), Ppr::ITEM),
    ("HeptaMarker", E([0.0, 0.0], [0.06, 0.06], 7), Ppr::HEPTAMARK),
    ("Snowball", E([0.0, 0.0], [0.04, 0.04], 12), Ppr::ITEM),
    ("Gem", Star(4, 0.09, 0.06), Ppr::ITEM),
    ("Key", Poly(KEY), Ppr::ITEM),
    ("Triangle", Poly(TRIANGLE), Ppr::ITEM),
    ("Cross", Poly(CROSS), Ppr::ITEM),
    ("Particle", Star(4, 0.02, 0.008), Ppr::PARTICLE),
    ("Mirror", Poly(MIRROR), Ppr::WALL),
    ("HalfFloor0", Poly(HALF_FLOOR), Ppr::FLOOR),
    ("HalfFloor1", Poly(HALF_FLOOR), Ppr::FLOOR),
    ("HalfFloor2", Poly(HALF_FLOOR), Ppr::FLOOR),
    ("HalfMirror0", Poly(HALF_MIRROR), Ppr::WALL),
    ("HalfMirror1", Poly(HALF_MIRROR), Ppr::WALL),
    ("HalfMirror2", Poly(HALF_MIRROR), Ppr::WALL),
    ("Thorns", Star(12, 0.22, 0.12), Ppr::THORNS),
    ("Rose", Flower(5, 0.1, 0.03), Ppr::THORNS),
    ("Fan", Flower(3, 0.14, 0.1), Ppr::WALL),
    ("MineMark0", E([0.0, 0.0], [0.08, 0.08], 12), Ppr::MINEMARK),
    ("MineMark1", Star(8, 0.1, 0.05), Ppr::MINEMARK),
    ("BigCarpet1", Star(8, 0.3, 0.24), Ppr::GFLOORA),
    ("BigCarpet2", Star(8, 0.24, 0.18), Ppr::GFLOORB),
    ("BigCarpet3", Star(8, 0.18, 0.12), Ppr::GFLOORC),
    ("BoatOuter", E([0.0, 0.0], [0.25, 0.12], 24), Ppr::BOATLEV),
    ("BoatInner", E([0.0, 0.0], [0.2, 0.08], 24), Ppr::BOATLEV2),
    ("Statue", E([0.0, 0.0], [0.12, 0.06], 24), Ppr::BIGSTATUE),
    ("Barrel", E([0.0, 0.0], [0.1, 0.1], 16), Ppr::WALL3),
    ("WindArrow", Poly(WIND_ARROW), Ppr::ITEM),
];
