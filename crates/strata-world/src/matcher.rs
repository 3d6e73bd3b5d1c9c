//! Per-voxel rule selection and the in-place section decoration pass.

use strata_blocks::{BaseBlockType, BlockId, BlockRegistry};
use strata_chunk::{ChunkSection, VOXEL_COUNT};

use crate::biome::{Biome, MicrobiomeId};
use crate::rules::CompiledRule;

/// Supplies the microbiome a voxel falls in, by section-local coordinate.
pub trait MicrobiomeSource {
    fn microbiome_at(&self, lx: usize, ly: usize, lz: usize) -> Option<MicrobiomeId>;
}

/// No voxel lies in any microbiome.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMicrobiome;

impl MicrobiomeSource for NoMicrobiome {
    #[inline]
    fn microbiome_at(&self, _: usize, _: usize, _: usize) -> Option<MicrobiomeId> {
        None
    }
}

impl<F> MicrobiomeSource for F
where
    F: Fn(usize, usize, usize) -> Option<MicrobiomeId>,
{
    #[inline]
    fn microbiome_at(&self, lx: usize, ly: usize, lz: usize) -> Option<MicrobiomeId> {
        self(lx, ly, lz)
    }
}

/// First rule of `bucket` (in bucket order) that applies to the voxel.
#[inline]
pub fn select_rule<'r>(
    rules: &'r [CompiledRule],
    bucket: &[u32],
    id: BlockId,
    base: BaseBlockType,
    world_y: i32,
    microbiome: Option<MicrobiomeId>,
) -> Option<&'r CompiledRule> {
    bucket
        .iter()
        .map(|&i| &rules[i as usize])
        .find(|r| r.applies_in(microbiome) && r.contains_y(world_y) && r.matches(id, base))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecorateStats {
    /// Rules in the section's bucket.
    pub candidates: usize,
    /// Voxels checked against at least one rule.
    pub visited: usize,
    /// Voxels whose id changed.
    pub replaced: usize,
}

/// Applies `biome`'s replacement rules to every voxel of `section`.
///
/// `section_index` is the section's position in the biome's column extent.
/// Each voxel is decided from the id it held before the pass, so one rule's
/// output never feeds another rule.
pub fn decorate_section<M: MicrobiomeSource + ?Sized>(
    section: &mut ChunkSection,
    biome: &Biome,
    section_index: usize,
    reg: &BlockRegistry,
    microbiomes: &M,
) -> DecorateStats {
    let bucket = biome.bucket(section_index);
    let mut stats = DecorateStats {
        candidates: bucket.len(),
        ..DecorateStats::default()
    };
    let Some(extent) = biome.section_buckets.extent() else {
        return stats;
    };
    if bucket.is_empty() {
        return stats;
    }
    let (y0, y1) = extent.section_y_range(section_index);
    let rules = &biome.compiled_rules;
    let candidates: Vec<(&CompiledRule, bool)> = bucket
        .iter()
        .map(|&i| {
            let r = &rules[i as usize];
            (r, r.fully_covers_section(y0, y1))
        })
        .collect();
    let needs_microbiome = candidates.iter().any(|(r, _)| r.microbiome_id.is_some());

    // Per palette entry: its base type, and whether any candidate could match it at all.
    // Entries appended during the pass are replacement outputs and are never read back.
    let palette: Vec<(BlockId, BaseBlockType, bool)> = section
        .palette()
        .entries()
        .iter()
        .map(|&id| {
            let base = reg.base_type(id);
            let reachable = candidates.iter().any(|(r, _)| r.matches(id, base));
            (id, base, reachable)
        })
        .collect();

    for index in 0..VOXEL_COUNT {
        let pi = section.palette_index_at(index) as usize;
        let (id, base, reachable) = palette[pi];
        if !reachable {
            continue;
        }
        stats.visited += 1;
        let (lx, ly, lz) = ChunkSection::coords_of(index);
        let world_y = y0 + ly as i32;
        let microbiome = if needs_microbiome {
            microbiomes.microbiome_at(lx, ly, lz)
        } else {
            None
        };
        let hit = candidates.iter().find(|(r, covers)| {
            r.applies_in(microbiome) && (*covers || r.contains_y(world_y)) && r.matches(id, base)
        });
        if let Some((r, _)) = hit {
            if r.replacement_id != id {
                section.set_block_at(index, r.replacement_id);
                stats.replaced += 1;
            }
        }
    }
    log::trace!(
        "biome `{}` section {}: {} candidates, {} visited, {} replaced",
        biome.name,
        section_index,
        stats.candidates,
        stats.visited,
        stats.replaced
    );
    stats
}
