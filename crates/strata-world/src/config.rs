use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::buckets::ColumnExtent;
use crate::error::WorldGenError;

// --- worldgen.toml ---

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub column: Column,
    #[serde(default)]
    pub fill: Fill,
    #[serde(default)]
    pub noise: Noise,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            column: Column::default(),
            fill: Fill::default(),
            noise: Noise::default(),
        }
    }
}

fn default_seed() -> i32 {
    1337
}

#[derive(Clone, Debug, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub base_y: i32,
    #[serde(default = "default_sections")]
    pub sections: usize,
}
fn default_sections() -> usize {
    8
}
impl Default for Column {
    fn default() -> Self {
        Self {
            base_y: 0,
            sections: default_sections(),
        }
    }
}

// Block names the raw fill writes before any biome rule runs
#[derive(Clone, Debug, Deserialize)]
pub struct Fill {
    #[serde(default = "default_stone")]
    pub stone: String,
    #[serde(default = "default_soil")]
    pub soil: String,
    #[serde(default = "default_water")]
    pub water: String,
}
fn default_stone() -> String {
    "stone".into()
}
fn default_soil() -> String {
    "dirt".into()
}
fn default_water() -> String {
    "water".into()
}
impl Default for Fill {
    fn default() -> Self {
        Self {
            stone: default_stone(),
            soil: default_soil(),
            water: default_water(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_height_freq")]
    pub height_frequency: f32,
    #[serde(default = "default_depth_freq")]
    pub depth_frequency: f32,
}
fn default_height_freq() -> f32 {
    0.01
}
fn default_depth_freq() -> f32 {
    0.05
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            height_frequency: default_height_freq(),
            depth_frequency: default_depth_freq(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub seed: i32,
    pub extent: ColumnExtent,
    pub fill_stone: String,
    pub fill_soil: String,
    pub fill_water: String,
    pub height_frequency: f32,
    pub depth_frequency: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        let cfg = WorldGenConfig::default();
        Self::snapshot(&cfg, ColumnExtent::new(cfg.column.base_y, cfg.column.sections))
    }
}

impl WorldGenParams {
    /// Fails when the configured column cannot be addressed with `i32` world Y.
    pub fn from_config(cfg: &WorldGenConfig) -> Result<Self, WorldGenError> {
        let extent = ColumnExtent::try_new(cfg.column.base_y, cfg.column.sections)?;
        Ok(Self::snapshot(cfg, extent))
    }

    fn snapshot(cfg: &WorldGenConfig, extent: ColumnExtent) -> Self {
        Self {
            seed: cfg.seed,
            extent,
            fill_stone: cfg.fill.stone.clone(),
            fill_soil: cfg.fill.soil.clone(),
            fill_water: cfg.fill.water.clone(),
            height_frequency: cfg.noise.height_frequency,
            depth_frequency: cfg.noise.depth_frequency,
        }
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(WorldGenParams::from_config(&cfg)?)
}

// --- biomes.toml ---

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BiomesConfig {
    #[serde(default)]
    pub biomes: Vec<BiomeDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BiomeDef {
    pub id: u16,
    pub name: String,
    #[serde(default = "default_stone_min_y")]
    pub stone_min_y: i32,
    #[serde(default = "default_stone_max_y")]
    pub stone_max_y: i32,
    #[serde(default = "default_stone_depth")]
    pub stone_depth_min: i32,
    #[serde(default = "default_stone_depth")]
    pub stone_depth_max: i32,
    #[serde(default = "default_soil_min_y")]
    pub soil_min_y: i32,
    #[serde(default = "default_soil_max_y")]
    pub soil_max_y: i32,
    #[serde(default = "default_soil_depth_min")]
    pub soil_depth_min: i32,
    #[serde(default = "default_soil_depth_max")]
    pub soil_depth_max: i32,
    #[serde(default = "default_water_level")]
    pub water_level: i32,
    #[serde(default)]
    pub microbiomes: Vec<MicrobiomeDef>,
    #[serde(default)]
    pub simple_replacements: Vec<ReplacementDef>,
}
fn default_stone_min_y() -> i32 {
    32
}
fn default_stone_max_y() -> i32 {
    64
}
fn default_stone_depth() -> i32 {
    4096
}
fn default_soil_min_y() -> i32 {
    i32::MIN
}
fn default_soil_max_y() -> i32 {
    i32::MAX
}
fn default_soil_depth_min() -> i32 {
    2
}
fn default_soil_depth_max() -> i32 {
    4
}
fn default_water_level() -> i32 {
    40
}

#[derive(Clone, Debug, Deserialize)]
pub struct MicrobiomeDef {
    pub id: u16,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ReplacementDef {
    #[serde(default)]
    pub blocks_to_replace: Vec<String>,
    #[serde(default)]
    pub base_blocks_to_replace: Vec<String>,
    pub replace_with: String,
    // Lower values are tried first
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub microbiome: Option<u16>,
    #[serde(default)]
    pub min_y: Option<i32>,
    #[serde(default)]
    pub max_y: Option<i32>,
}
