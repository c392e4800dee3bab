//! Model parameters (the `[models]` table) and the level table derived from them.
//!
//! A *level* is a height above the floor measured in absolute units. A
//! *factor* is what the display actually applies: in the flat (2.5D) display
//! it scales a point's spatial coordinates, in the solid display it is the
//! z-offset passed to `zshift`.

use crate::ppr::SidePar;
use hyperdraw_geom::{Geometry, Hyperpoint, Transmatrix};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct ModelParams {
    /// Overrides the scale factor derived from the tiling.
    #[serde(default)]
    pub scale_factor: Option<f64>,
    #[serde(default = "default_height_width")]
    pub height_width: f64,
    /// Distance from the camera to the floor plane.
    #[serde(default = "default_depth")]
    pub depth: f64,
    #[serde(default = "default_camera")]
    pub camera: f64,
    #[serde(default = "default_wall_height")]
    pub wall_height: f64,
    #[serde(default = "default_human_wall_ratio")]
    pub human_wall_ratio: f64,
    #[serde(default = "default_rock_wall_ratio")]
    pub rock_wall_ratio: f64,
    #[serde(default = "default_lake_top")]
    pub lake_top: f64,
    #[serde(default = "default_lake_bottom")]
    pub lake_bottom: f64,
    /// Solid 3D display instead of the flat 2.5D one.
    #[serde(default)]
    pub solid: bool,
    /// The world itself is three-dimensional (models are not stood on a floor).
    #[serde(default)]
    pub world_3d: bool,
}

fn default_height_width() -> f64 {
    1.5
}
fn default_depth() -> f64 {
    1.0
}
fn default_camera() -> f64 {
    1.0
}
fn default_wall_height() -> f64 {
    0.3
}
fn default_human_wall_ratio() -> f64 {
    0.7
}
fn default_rock_wall_ratio() -> f64 {
    0.9
}
fn default_lake_top() -> f64 {
    0.25
}
fn default_lake_bottom() -> f64 {
    0.9
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            scale_factor: None,
            height_width: default_height_width(),
            depth: default_depth(),
            camera: default_camera(),
            wall_height: default_wall_height(),
            human_wall_ratio: default_human_wall_ratio(),
            rock_wall_ratio: default_rock_wall_ratio(),
            lake_top: default_lake_top(),
            lake_bottom: default_lake_bottom(),
            solid: false,
            world_3d: false,
        }
    }
}

#[derive(Deserialize)]
struct ModelsFile {
    #[serde(default)]
    models: ModelParams,
}

impl ModelParams {
    /// Reads the `[models]` table of a config file; a missing table yields defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let file: ModelsFile = toml::from_str(toml_str)?;
        Ok(file.models)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    #[inline]
    pub fn human_height(&self) -> f64 {
        self.human_wall_ratio * self.wall_height
    }

    /// `-1` when the vertical axis of models points away from the camera.
    #[inline]
    pub fn rev_z(&self) -> f64 {
        if self.world_3d { 1.0 } else { -1.0 }
    }

    pub fn lev_to_factor(&self, g: Geometry, lev: f64) -> f64 {
        if self.solid {
            self.depth - lev
        } else {
            g.tan_auto(self.depth) / g.tan_auto(self.depth - lev)
        }
    }

    pub fn factor_to_lev(&self, g: Geometry, fac: f64) -> f64 {
        if self.solid {
            self.depth - fac
        } else {
            self.depth - g.atan_auto(g.tan_auto(self.depth) / fac)
        }
    }

    /// Apparent scale of lengths drawn at level `lev` in the flat display.
    pub fn scale_at_lev(&self, g: Geometry, lev: f64) -> f64 {
        match g {
            Geometry::Hyperbolic => (self.depth - lev).cosh(),
            _ => 1.0,
        }
    }

    /// Moves a point to the level with the given factor.
    pub fn mscale_point(&self, g: Geometry, h: Hyperpoint, fac: f64) -> Hyperpoint {
        if self.solid {
            g.zshift(h, fac)
        } else {
            Hyperpoint::new(h[0] * fac, h[1] * fac, h[2] * fac, h[3])
        }
    }

    /// Transform drawing a cell-local shape at the level with the given factor.
    pub fn mscale(&self, g: Geometry, v: &Transmatrix, fac: f64) -> Transmatrix {
        if self.solid {
            *v * g.zpush(fac)
        } else {
            let mut r = *v;
            for i in 0..3 {
                for j in 0..4 {
                    r[i][j] *= fac;
                }
            }
            r
        }
    }
}

/// Derived level factors; see the module docs for level vs. factor.
#[derive(Clone, Debug, PartialEq)]
pub struct Levels {
    pub human_height: f64,
    pub floor: f64,
    pub wall: f64,
    pub lake: f64,
    pub bottom: f64,
    pub infdeep: f64,
    pub slev: [f64; 4],
    pub high: f64,
    pub high2: f64,
    pub sky: f64,
    pub leg0: f64,
    pub leg1: f64,
    pub leg: f64,
    pub leg2: f64,
    pub leg3: f64,
    pub groin: f64,
    pub groin1: f64,
    pub ghost: f64,
    pub body: f64,
    pub body1: f64,
    pub body2: f64,
    pub body3: f64,
    pub neck1: f64,
    pub neck2: f64,
    pub neck3: f64,
    pub head: f64,
    pub head1: f64,
    pub head2: f64,
    pub head3: f64,
    pub aleg0: f64,
    pub aleg: f64,
    pub abody: f64,
    pub ahead: f64,
    pub bird: f64,
    pub flateye: f64,
    pub hellspike: f64,
    pub boatlev: f64,
    pub boatlev2: f64,
    pub boatlev3: f64,
}

// How far below the lake bottom "infinitely deep" reaches in the solid display.
const INFDEEP_SOLID_DROP: f64 = 5.0;

impl Levels {
    pub fn new(p: &ModelParams, g: Geometry) -> Self {
        let wh = p.wall_height;
        let hh = p.human_height();
        let f = |lev: f64| p.lev_to_factor(g, lev);
        let human = |z: f64| f(hh * z);
        let infdeep = if p.solid {
            f(-wh * p.lake_bottom - INFDEEP_SOLID_DROP)
        } else if g == Geometry::Hyperbolic {
            0.0
        } else {
            0.01
        };
        Levels {
            human_height: hh,
            floor: f(0.0),
            wall: f(wh),
            lake: f(-wh * p.lake_top),
            bottom: f(-wh * p.lake_bottom),
            infdeep,
            slev: std::array::from_fn(|s| f(p.rock_wall_ratio * wh * s as f64 / 3.0)),
            high: f(wh * 2.0),
            high2: f(wh * 3.0),
            sky: f(wh * 5.0),
            leg0: human(0.0),
            leg1: human(0.1),
            leg: human(0.2),
            leg2: human(0.3),
            leg3: human(0.35),
            groin: human(0.4),
            groin1: human(0.5),
            ghost: human(0.6),
            body: human(0.6),
            body1: human(0.7),
            body2: human(0.8),
            body3: human(0.9),
            neck1: human(0.8),
            neck2: human(0.85),
            neck3: human(0.9),
            head: human(0.925),
            head1: human(0.95),
            head2: human(0.975),
            head3: human(1.0),
            aleg0: human(0.0),
            aleg: human(0.1),
            abody: human(0.25),
            ahead: human(0.35),
            bird: f(wh * 0.55),
            flateye: human(0.15),
            hellspike: f(-wh * 0.1),
            boatlev: human(0.1),
            boatlev2: human(0.075),
            boatlev3: human(0.05),
        }
    }

    /// The `(low, high)` factors a side panel of the given band spans.
    pub fn band(&self, sp: SidePar) -> (f64, f64) {
        match sp {
            SidePar::Slev(s) => {
                let s = (s as usize).min(2);
                (self.slev[s], self.slev[s + 1])
            }
            SidePar::Wts3 => (self.slev[3], self.wall),
            SidePar::Wall => (self.floor, self.wall),
            SidePar::Lake => (self.lake, self.floor),
            SidePar::Ltob => (self.bottom, self.lake),
            SidePar::Btoi => (self.infdeep, self.bottom),
            SidePar::Sky => (self.high2, self.sky),
            SidePar::High => (self.wall, self.high),
            SidePar::High2 => (self.high, self.high2),
        }
    }

    /// Factor of the cap a band's level copy is drawn at: the end of the band
    /// farther from the floor.
    pub fn cap(&self, sp: SidePar) -> f64 {
        let (lo, hi) = self.band(sp);
        if sp.is_below_floor() { lo } else { hi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_factor_round_trips() {
        let p = ModelParams::default();
        for g in [Geometry::Hyperbolic, Geometry::Euclidean, Geometry::Spherical] {
            for lev in [-0.27, 0.0, 0.1, 0.3] {
                let back = p.factor_to_lev(g, p.lev_to_factor(g, lev));
                assert!((back - lev).abs() < 1e-9, "{g:?} {lev}");
            }
        }
    }

    #[test]
    fn flat_floor_is_unit_and_walls_grow() {
        let p = ModelParams::default();
        let lv = Levels::new(&p, Geometry::Hyperbolic);
        assert!((lv.floor - 1.0).abs() < 1e-12);
        assert!(lv.wall > lv.floor);
        assert!(lv.lake < lv.floor);
        assert!(lv.bottom < lv.lake);
    }

    #[test]
    fn solid_levels_shrink_upwards() {
        let p = ModelParams { solid: true, ..ModelParams::default() };
        let lv = Levels::new(&p, Geometry::Hyperbolic);
        assert!((lv.floor - p.depth).abs() < 1e-12);
        assert!(lv.wall < lv.floor);
        assert!(lv.bottom > lv.lake);
    }

    #[test]
    fn models_table_is_optional() {
        let p = ModelParams::from_toml_str("[render]\ngrid = true\n").unwrap();
        assert_eq!(p.wall_height, 0.3);
        let p = ModelParams::from_toml_str("[models]\nwall_height = 0.5\nsolid = true\n").unwrap();
        assert!(p.solid);
        assert_eq!(p.wall_height, 0.5);
    }
}
