//! Biomes, replacement-rule compilation and matching, and raw strata fill.
#![forbid(unsafe_code)]

pub mod biome;
pub mod buckets;
pub mod config;
pub mod error;
pub mod fill;
pub mod matcher;
pub mod rules;
pub mod shared;

pub use biome::{Biome, BiomeSet, Microbiome, MicrobiomeId, Strata};
pub use buckets::{ColumnExtent, SectionBuckets};
pub use config::{WorldGenConfig, WorldGenParams};
pub use error::{BiomeError, RuleError, WorldGenError};
pub use fill::StrataFiller;
pub use matcher::{DecorateStats, MicrobiomeSource, NoMicrobiome, decorate_section, select_rule};
pub use rules::CompiledRule;
pub use shared::SharedBiomes;
