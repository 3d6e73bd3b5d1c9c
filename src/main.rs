use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;

use strata_blocks::BlockRegistry;
use strata_chunk::ChunkSection;
use strata_world::config::load_params_from_path;
use strata_world::{
    BiomeSet, DecorateStats, MicrobiomeId, NoMicrobiome, SharedBiomes, StrataFiller,
    decorate_section,
};

static BIOMES: SharedBiomes = SharedBiomes::new();

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Generate and decorate one chunk column")]
struct Args {
    /// Block type definitions
    #[arg(long, default_value = "assets/blocks.toml")]
    blocks: PathBuf,
    /// Biome definitions with replacement rules
    #[arg(long, default_value = "assets/biomes.toml")]
    biomes: PathBuf,
    /// Seed, column extent, fill blocks and noise settings
    #[arg(long, default_value = "assets/worldgen.toml")]
    worldgen: PathBuf,
    /// Biome to generate (defaults to the first one defined)
    #[arg(long)]
    biome: Option<String>,
    /// Chunk column X
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    cx: i32,
    /// Chunk column Z
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    cz: i32,
    /// Override the seed from the worldgen config
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i32>,
    /// Treat the whole column as lying in this microbiome
    #[arg(long)]
    microbiome: Option<MicrobiomeId>,
}

struct SectionReport {
    index: usize,
    section: ChunkSection,
    stats: DecorateStats,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let reg = BlockRegistry::load_from_path(&args.blocks)?;
    log::info!("loaded {} block types from {}", reg.len(), args.blocks.display());
    let mut params = load_params_from_path(&args.worldgen)?;
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let set = BiomeSet::load_from_path(&args.biomes, &reg, params.extent)?;
    if BIOMES.publish(set).is_err() {
        return Err("biome set already published".into());
    }
    let filler = StrataFiller::new(&params, &reg)?;

    let biomes = BIOMES.get().ok_or("biome set not published")?;
    let biome_id = match &args.biome {
        Some(name) => biomes
            .by_name(name)
            .ok_or_else(|| format!("unknown biome `{name}`"))?
            .id,
        None => biomes.iter().next().ok_or("no biomes defined")?.id,
    };
    drop(biomes);

    let extent = params.extent;
    log::info!(
        "generating column ({}, {}) seed {}: {} sections from y {}",
        args.cx,
        args.cz,
        params.seed,
        extent.section_count(),
        extent.base_y()
    );

    let mut reports: Vec<SectionReport> = (0..extent.section_count())
        .into_par_iter()
        .filter_map(|index| {
            let biomes = BIOMES.get()?;
            let biome = biomes.get(biome_id)?;
            let mut section = ChunkSection::new();
            filler.fill_section(&mut section, &biome.strata, args.cx, args.cz, index);
            let stats = match args.microbiome {
                Some(mb) => {
                    let uniform = |_: usize, _: usize, _: usize| Some(mb);
                    decorate_section(&mut section, biome, index, &reg, &uniform)
                }
                None => decorate_section(&mut section, biome, index, &reg, &NoMicrobiome),
            };
            Some(SectionReport {
                index,
                section,
                stats,
            })
        })
        .collect();
    reports.sort_by_key(|r| r.index);

    for r in &reports {
        let (y0, y1) = extent.section_y_range(r.index);
        let palette: Vec<&str> = r
            .section
            .palette()
            .entries()
            .iter()
            .map(|&id| reg.get(id).map_or("?", |b| b.name.as_str()))
            .collect();
        log::info!(
            "section {} (y {}..={}): {} non-air, {} bits, palette [{}], {} rules, {} replaced",
            r.index,
            y0,
            y1,
            r.section.non_air_count(),
            r.section.bits_per_index(),
            palette.join(", "),
            r.stats.candidates,
            r.stats.replaced
        );
    }
    let replaced: usize = reports.iter().map(|r| r.stats.replaced).sum();
    log::info!("{} sections, {} voxels replaced", reports.len(), replaced);

    BIOMES.teardown();
    Ok(())
}
