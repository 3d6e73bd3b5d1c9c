//! Raw terrain fill: stone, soil and water placed from a biome's strata.
//!
//! Per column the filler samples two noise fields. The first picks the stone
//! top inside `stone_min_y..=stone_max_y`; the second picks stone and soil
//! thickness inside their depth ranges. Soil sits on the stone only when the
//! ground surface falls inside `soil_min_y..=soil_max_y`. Water fills the air
//! above the ground up to `water_level`.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use strata_blocks::{AIR, BlockId, BlockRegistry};
use strata_chunk::{ChunkSection, SECTION_SIZE};

use crate::biome::Strata;
use crate::buckets::ColumnExtent;
use crate::config::WorldGenParams;
use crate::error::WorldGenError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillBlocks {
    pub stone: BlockId,
    pub soil: BlockId,
    pub water: BlockId,
}

/// Layer boundaries of one column, world Y inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    pub stone_bottom: i32,
    pub stone_top: i32,
    pub soil_top: i32,
    pub water_top: i32,
}

impl ColumnProfile {
    #[inline]
    pub fn block_at(&self, y: i32, blocks: &FillBlocks) -> BlockId {
        if y < self.stone_bottom {
            AIR
        } else if y <= self.stone_top {
            blocks.stone
        } else if y <= self.soil_top {
            blocks.soil
        } else if y <= self.water_top {
            blocks.water
        } else {
            AIR
        }
    }
}

pub struct StrataFiller {
    height: FastNoiseLite,
    depth: FastNoiseLite,
    blocks: FillBlocks,
    extent: ColumnExtent,
}

impl StrataFiller {
    pub fn new(params: &WorldGenParams, reg: &BlockRegistry) -> Result<Self, WorldGenError> {
        let resolve = |name: &str| {
            reg.id_by_name(name)
                .ok_or_else(|| WorldGenError::UnknownFillBlock(name.to_string()))
        };
        let blocks = FillBlocks {
            stone: resolve(&params.fill_stone)?,
            soil: resolve(&params.fill_soil)?,
            water: resolve(&params.fill_water)?,
        };
        let mut height = FastNoiseLite::with_seed(params.seed);
        height.set_noise_type(Some(NoiseType::OpenSimplex2));
        height.set_frequency(Some(params.height_frequency));
        let mut depth = FastNoiseLite::with_seed(params.seed ^ 52_711);
        depth.set_noise_type(Some(NoiseType::OpenSimplex2));
        depth.set_frequency(Some(params.depth_frequency));
        Ok(Self {
            height,
            depth,
            blocks,
            extent: params.extent,
        })
    }

    #[inline]
    pub fn blocks(&self) -> FillBlocks {
        self.blocks
    }

    #[inline]
    pub fn extent(&self) -> ColumnExtent {
        self.extent
    }

    /// Layer boundaries at world column `(wx, wz)`. Coordinates are `i64`
    /// so every chunk column of an `i32` chunk grid is addressable.
    pub fn column(&self, strata: &Strata, wx: i64, wz: i64) -> ColumnProfile {
        let (x, z) = (wx as f32, wz as f32);
        let h = unit(self.height.get_noise_2d(x, z));
        let d_stone = unit(self.depth.get_noise_2d(x, z));
        let d_soil = unit(self.depth.get_noise_2d(x + 1024.5, z - 733.25));

        let stone_top = lerp_i(strata.stone_min_y, strata.stone_max_y, h);
        let stone_depth = lerp_i(strata.stone_depth_min, strata.stone_depth_max, d_stone).max(0);
        let stone_bottom = stone_top.saturating_sub(stone_depth).saturating_add(1);

        let surface = stone_top.saturating_add(1);
        let soil_top = if (strata.soil_min_y..=strata.soil_max_y).contains(&surface) {
            let soil_depth = lerp_i(strata.soil_depth_min, strata.soil_depth_max, d_soil).max(0);
            stone_top.saturating_add(soil_depth).min(strata.soil_max_y)
        } else {
            stone_top
        };
        ColumnProfile {
            stone_bottom,
            stone_top,
            soil_top,
            water_top: strata.water_level.max(soil_top),
        }
    }

    /// Writes raw terrain into `section`, which sits at `section_index` of
    /// chunk column `(cx, cz)`. Air is never written, so a fresh section
    /// above the terrain stays all-air at minimum width.
    ///
    /// # Panics
    /// If `section_index` is outside the column extent.
    pub fn fill_section(
        &self,
        section: &mut ChunkSection,
        strata: &Strata,
        cx: i32,
        cz: i32,
        section_index: usize,
    ) {
        let y0 = self.extent.section_origin_y(section_index);
        let base_x = i64::from(cx) * SECTION_SIZE as i64;
        let base_z = i64::from(cz) * SECTION_SIZE as i64;
        for lz in 0..SECTION_SIZE {
            for lx in 0..SECTION_SIZE {
                let profile = self.column(strata, base_x + lx as i64, base_z + lz as i64);
                for ly in 0..SECTION_SIZE {
                    let id = profile.block_at(y0 + ly as i32, &self.blocks);
                    if id != AIR {
                        section.set_block(lx, ly, lz, id);
                    }
                }
            }
        }
    }
}

#[inline]
fn unit(n: f32) -> f32 {
    ((n + 1.0) * 0.5).clamp(0.0, 1.0)
}

#[inline]
fn lerp_i(a: i32, b: i32, t: f32) -> i32 {
    let (a, b) = (i64::from(a), i64::from(b));
    let v = a + ((b - a) as f64 * f64::from(t)).round() as i64;
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
