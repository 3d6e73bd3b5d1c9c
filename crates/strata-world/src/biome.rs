use hashbrown::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use strata_blocks::{BaseBlockType, BlockId, BlockRegistry};

use crate::buckets::{ColumnExtent, SectionBuckets};
use crate::config::{BiomeDef, BiomesConfig, ReplacementDef};
use crate::error::BiomeError;
use crate::matcher::select_rule;
use crate::rules::{CompiledRule, compile_rules};

pub type MicrobiomeId = u16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Microbiome {
    pub id: MicrobiomeId,
    pub name: String,
}

/// Vertical strata the raw terrain fill reads. All bounds are world Y, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strata {
    pub stone_min_y: i32,
    pub stone_max_y: i32,
    pub stone_depth_min: i32,
    pub stone_depth_max: i32,
    pub soil_min_y: i32,
    pub soil_max_y: i32,
    pub soil_depth_min: i32,
    pub soil_depth_max: i32,
    pub water_level: i32,
}

/// A biome with its replacement rules compiled and bucketed.
///
/// Built once at load time; nothing here changes afterwards, so a `Biome`
/// can be read from any number of generation workers.
#[derive(Clone, Debug)]
pub struct Biome {
    pub id: u16,
    pub name: String,
    pub strata: Strata,
    pub microbiomes: Vec<Microbiome>,
    pub simple_replacements: Vec<ReplacementDef>,
    pub compiled_rules: Box<[CompiledRule]>,
    pub section_buckets: SectionBuckets,
}

impl Biome {
    pub fn compile(
        def: BiomeDef,
        reg: &BlockRegistry,
        extent: ColumnExtent,
    ) -> Result<Self, BiomeError> {
        let mut microbiomes: Vec<Microbiome> = Vec::with_capacity(def.microbiomes.len());
        for m in def.microbiomes {
            if microbiomes.iter().any(|e| e.id == m.id) {
                return Err(BiomeError::DuplicateMicrobiome {
                    biome: def.name,
                    id: m.id,
                });
            }
            microbiomes.push(Microbiome {
                id: m.id,
                name: m.name.unwrap_or_else(|| format!("microbiome_{}", m.id)),
            });
        }

        let compiled = compile_rules(&def.simple_replacements, reg, &microbiomes).map_err(
            |(rule, kind)| BiomeError::Rule {
                biome: def.name.clone(),
                rule,
                kind,
            },
        )?;
        let (lo, hi) = (extent.min_y(), extent.max_y());
        for (i, r) in compiled.iter().enumerate() {
            if !r.vertical_intersects(lo, hi) {
                log::warn!(
                    "biome `{}` replacement #{} ({}..={}) lies outside the column {}..={}",
                    def.name,
                    i,
                    r.min_y,
                    r.max_y,
                    lo,
                    hi
                );
            }
        }
        let section_buckets = SectionBuckets::build(&compiled, extent);
        log::debug!(
            "biome `{}`: {} rules, bucket sizes {:?}",
            def.name,
            compiled.len(),
            section_buckets.iter().map(<[u32]>::len).collect::<Vec<_>>()
        );

        Ok(Biome {
            id: def.id,
            name: def.name,
            strata: Strata {
                stone_min_y: def.stone_min_y,
                stone_max_y: def.stone_max_y,
                stone_depth_min: def.stone_depth_min,
                stone_depth_max: def.stone_depth_max,
                soil_min_y: def.soil_min_y,
                soil_max_y: def.soil_max_y,
                soil_depth_min: def.soil_depth_min,
                soil_depth_max: def.soil_depth_max,
                water_level: def.water_level,
            },
            microbiomes,
            simple_replacements: def.simple_replacements,
            compiled_rules: compiled.into_boxed_slice(),
            section_buckets,
        })
    }

    /// Candidate rule indices for a column-relative section index.
    #[inline]
    pub fn bucket(&self, section: usize) -> &[u32] {
        self.section_buckets.get(section)
    }

    pub fn microbiome(&self, id: MicrobiomeId) -> Option<&Microbiome> {
        self.microbiomes.iter().find(|m| m.id == id)
    }

    /// Replacement for a voxel at `world_y`, or `None` when no rule applies.
    pub fn replacement_for(
        &self,
        id: BlockId,
        base: BaseBlockType,
        world_y: i32,
        microbiome: Option<MicrobiomeId>,
    ) -> Option<BlockId> {
        let section = self.section_buckets.extent()?.section_of(world_y)?;
        select_rule(
            &self.compiled_rules,
            self.bucket(section),
            id,
            base,
            world_y,
            microbiome,
        )
        .map(|r| r.replacement_id)
    }
}

/// Every biome of a world, compiled against one block registry and column extent.
#[derive(Clone, Debug)]
pub struct BiomeSet {
    biomes: Vec<Biome>,
    by_id: HashMap<u16, usize>,
    by_name: HashMap<String, usize>,
    extent: ColumnExtent,
}

impl BiomeSet {
    pub fn load_from_path(
        path: impl AsRef<Path>,
        reg: &BlockRegistry,
        extent: ColumnExtent,
    ) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s, reg, extent)
    }

    pub fn from_toml_str(
        toml_str: &str,
        reg: &BlockRegistry,
        extent: ColumnExtent,
    ) -> Result<Self, Box<dyn Error>> {
        let cfg: BiomesConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg, reg, extent)?)
    }

    /// Compiles every biome. The first authoring error rejects the whole set.
    pub fn from_config(
        cfg: BiomesConfig,
        reg: &BlockRegistry,
        extent: ColumnExtent,
    ) -> Result<Self, BiomeError> {
        let mut set = BiomeSet {
            biomes: Vec::with_capacity(cfg.biomes.len()),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            extent,
        };
        for def in cfg.biomes {
            if set.by_name.contains_key(&def.name) {
                return Err(BiomeError::DuplicateName(def.name));
            }
            if let Some(&prev) = set.by_id.get(&def.id) {
                return Err(BiomeError::DuplicateId {
                    id: def.id,
                    first: set.biomes[prev].name.clone(),
                    second: def.name,
                });
            }
            let biome = Biome::compile(def, reg, extent)?;
            let slot = set.biomes.len();
            set.by_id.insert(biome.id, slot);
            set.by_name.insert(biome.name.clone(), slot);
            set.biomes.push(biome);
        }
        log::info!(
            "compiled {} biomes ({} replacement rules)",
            set.biomes.len(),
            set.biomes
                .iter()
                .map(|b| b.compiled_rules.len())
                .sum::<usize>()
        );
        Ok(set)
    }

    pub fn get(&self, id: u16) -> Option<&Biome> {
        self.by_id.get(&id).map(|&i| &self.biomes[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&Biome> {
        self.by_name.get(name).map(|&i| &self.biomes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.iter()
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    pub fn extent(&self) -> ColumnExtent {
        self.extent
    }
}
