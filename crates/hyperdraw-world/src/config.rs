//! The `[world]` table: map size, tiling and land generation.

use crate::cell::Land;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct MapConfig {
    /// Polygon sides of the tiling.
    #[serde(default = "default_p")]
    pub p: u32,
    /// Polygons around each vertex.
    #[serde(default = "default_q")]
    pub q: u32,
    /// Steps from the origin cell included in the map.
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_noise_frequency")]
    pub noise_frequency: f32,
    /// Noise above this becomes a stone wall.
    #[serde(default = "default_wall_threshold")]
    pub wall_threshold: f32,
    /// Noise below this becomes a lake.
    #[serde(default = "default_water_threshold")]
    pub water_threshold: f32,
    /// Noise below this becomes a chasm.
    #[serde(default = "default_chasm_threshold")]
    pub chasm_threshold: f32,
    #[serde(default = "default_lands")]
    pub lands: Vec<Land>,
}

fn default_p() -> u32 {
    7
}
fn default_q() -> u32 {
    3
}
fn default_radius() -> u32 {
    3
}
fn default_seed() -> i32 {
    1337
}
fn default_noise_frequency() -> f32 {
    0.9
}
fn default_wall_threshold() -> f32 {
    0.55
}
fn default_water_threshold() -> f32 {
    -0.55
}
fn default_chasm_threshold() -> f32 {
    -0.8
}
fn default_lands() -> Vec<Land> {
    vec![Land::Crossroads, Land::Desert, Land::Icy, Land::Caves, Land::Jungle]
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            p: default_p(),
            q: default_q(),
            radius: default_radius(),
            seed: default_seed(),
            noise_frequency: default_noise_frequency(),
            wall_threshold: default_wall_threshold(),
            water_threshold: default_water_threshold(),
            chasm_threshold: default_chasm_threshold(),
            lands: default_lands(),
        }
    }
}

#[derive(Deserialize)]
struct WorldFile {
    #[serde(default)]
    world: MapConfig,
}

impl MapConfig {
    /// Reads the `[world]` table; other tables are ignored.
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let f: WorldFile = toml::from_str(s)?;
        Ok(f.world)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_table() {
        let c = MapConfig::from_toml_str("").unwrap();
        assert_eq!((c.p, c.q, c.radius), (7, 3, 3));
        assert_eq!(c.lands.len(), 5);
    }

    #[test]
    fn lands_parse_lowercase() {
        let c = MapConfig::from_toml_str("[world]\nradius = 2\nlands = [\"hell\", \"rose\"]\n").unwrap();
        assert_eq!(c.radius, 2);
        assert_eq!(c.lands, vec![Land::Hell, Land::Rose]);
    }
}
