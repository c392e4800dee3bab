//! The `[render]` table. Read once and handed to every frame unchanged.

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct RenderConfig {
    /// Walls, lakes and chasms are drawn at their own heights.
    #[serde(default = "default_true")]
    pub wall_spatial: bool,
    /// Monsters and items are lifted to their body levels.
    #[serde(default = "default_true")]
    pub monster_spatial: bool,
    /// Layered walls instead of side panels in the flat display.
    #[serde(default)]
    pub escher: bool,
    /// Cells closer than this get full detail.
    #[serde(default = "default_highdetail")]
    pub highdetail: f64,
    /// Cells closer than this get medium detail; farther ones the least.
    #[serde(default = "default_middetail")]
    pub middetail: f64,
    #[serde(default = "default_aura_str")]
    pub aura_str: i32,
    /// Half-width of the moving window smoothing the aura.
    #[serde(default = "default_aura_smoothen")]
    pub aura_smoothen: usize,
    /// Log of the animation speed; 5 and above disables animations.
    #[serde(default = "default_mspeed")]
    pub mspeed: f64,
    #[serde(default)]
    pub grid: bool,
    #[serde(default = "default_true")]
    pub particles: bool,
    #[serde(default = "default_particle_seed")]
    pub particle_seed: u64,
    /// Radar range in the Euclidean display.
    #[serde(default = "default_radar_range")]
    pub radar_range: f64,
    /// Camera height above the floor, in absolute units.
    #[serde(default = "default_camera_height")]
    pub camera_height: f64,
    /// Tangent of half the field of view; 0 disables frustum clipping.
    #[serde(default)]
    pub tan_fov: f64,
    /// Cells holding an item pulse.
    #[serde(default)]
    pub peace: bool,
    /// Mouse position in model coordinates, if tracked.
    #[serde(default)]
    pub mouse: Option<[f64; 2]>,
    /// Floor styles are picked per cell at random instead of per land.
    #[serde(default)]
    pub random_pattern: bool,
    /// Catalog shape drawn instead of the floor outline, when present.
    #[serde(default)]
    pub user_floor: Option<String>,
    #[serde(default)]
    pub darkness: DarknessTables,
}

fn default_true() -> bool {
    true
}
fn default_highdetail() -> f64 {
    3.0
}
fn default_middetail() -> f64 {
    5.0
}
fn default_aura_str() -> i32 {
    128
}
fn default_aura_smoothen() -> usize {
    5
}
fn default_mspeed() -> f64 {
    0.5
}
fn default_particle_seed() -> u64 {
    0x5EED
}
fn default_radar_range() -> f64 {
    10.0
}
fn default_camera_height() -> f64 {
    1.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wall_spatial: true,
            monster_spatial: true,
            escher: false,
            highdetail: default_highdetail(),
            middetail: default_middetail(),
            aura_str: default_aura_str(),
            aura_smoothen: default_aura_smoothen(),
            mspeed: default_mspeed(),
            grid: false,
            particles: true,
            particle_seed: default_particle_seed(),
            radar_range: default_radar_range(),
            camera_height: default_camera_height(),
            tan_fov: 0.0,
            peace: false,
            mouse: None,
            random_pattern: false,
            user_floor: None,
            darkness: DarknessTables::default(),
        }
    }
}

/// Per-direction darkening of wall side panels, per tiling family.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DarknessTables {
    /// Degree-6 tilings in the flat and hyperbolic plane.
    #[serde(default = "default_hex")]
    pub hex: Vec<u32>,
    /// Spherical tilings and degree-12 hyperbolic ones.
    #[serde(default = "default_twelve")]
    pub twelve: Vec<u32>,
}

fn default_hex() -> Vec<u32> {
    vec![0, 4, 6, 0, 4, 6]
}
fn default_twelve() -> Vec<u32> {
    vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5]
}

impl Default for DarknessTables {
    fn default() -> Self {
        Self { hex: default_hex(), twelve: default_twelve() }
    }
}

#[derive(Deserialize)]
struct RenderFile {
    #[serde(default)]
    render: RenderConfig,
}

impl RenderConfig {
    /// Reads the `[render]` table of a config file; a missing table yields defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let file: RenderFile = toml::from_str(toml_str)?;
        let mut cfg = file.render;
        if cfg.middetail < cfg.highdetail {
            log::warn!(
                target: "render",
                "middetail {} below highdetail {}; using highdetail",
                cfg.middetail,
                cfg.highdetail
            );
            cfg.middetail = cfg.highdetail;
        }
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    #[inline]
    pub fn animations_enabled(&self) -> bool {
        self.mspeed < 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_table() {
        let cfg = RenderConfig::from_toml_str("[models]\nsolid = true\n").unwrap();
        assert!(cfg.wall_spatial);
        assert_eq!(cfg.aura_smoothen, 5);
        assert_eq!(cfg.darkness, DarknessTables::default());
    }

    #[test]
    fn darkness_override_and_detail_fix() {
        let s = "[render]\nhighdetail = 4.0\nmiddetail = 2.0\n[render.darkness]\nhex = [1, 2, 3, 1, 2, 3]\n";
        let cfg = RenderConfig::from_toml_str(s).unwrap();
        assert_eq!(cfg.darkness.hex, vec![1, 2, 3, 1, 2, 3]);
        assert_eq!(cfg.darkness.twelve.len(), 12);
        assert_eq!(cfg.middetail, 4.0);
    }

    #[test]
    fn bad_type_is_an_error() {
        assert!(RenderConfig::from_toml_str("[render]\nmspeed = \"fast\"\n").is_err());
    }
}
