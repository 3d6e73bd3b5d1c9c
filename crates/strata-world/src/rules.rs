//! Replacement rules in their compiled, match-ready form.

use strata_blocks::{BaseBlockType, BlockId, BlockRegistry};

use crate::biome::{Microbiome, MicrobiomeId};
use crate::config::ReplacementDef;
use crate::error::RuleError;

/// A replacement rule after name resolution.
///
/// Matching is `base_type_mask` bit test first, then a binary search over
/// `specific_ids_sorted`. `min_y..=max_y` is inclusive; an unbounded side holds
/// [`CompiledRule::UNBOUNDED_MIN`] or [`CompiledRule::UNBOUNDED_MAX`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledRule {
    pub replacement_id: BlockId,
    pub specific_ids_sorted: Box<[BlockId]>,
    pub base_type_mask: u32,
    pub min_y: i32,
    pub max_y: i32,
    pub microbiome_id: Option<MicrobiomeId>,
    pub priority: i32,
}

impl CompiledRule {
    pub const UNBOUNDED_MIN: i32 = i32::MIN;
    pub const UNBOUNDED_MAX: i32 = i32::MAX;

    #[inline]
    pub fn matches(&self, id: BlockId, base: BaseBlockType) -> bool {
        base.in_mask(self.base_type_mask) || self.specific_ids_sorted.binary_search(&id).is_ok()
    }

    #[inline]
    pub fn contains_y(&self, world_y: i32) -> bool {
        self.min_y <= world_y && world_y <= self.max_y
    }

    /// True when `[min_y, max_y]` overlaps the inclusive band `[y0, y1]`.
    #[inline]
    pub fn vertical_intersects(&self, y0: i32, y1: i32) -> bool {
        self.min_y <= y1 && self.max_y >= y0
    }

    /// True when every Y in `[y0, y1]` passes [`CompiledRule::contains_y`].
    #[inline]
    pub fn fully_covers_section(&self, y0: i32, y1: i32) -> bool {
        self.min_y <= y0 && self.max_y >= y1
    }

    #[inline]
    pub fn applies_in(&self, microbiome: Option<MicrobiomeId>) -> bool {
        match self.microbiome_id {
            None => true,
            Some(required) => microbiome == Some(required),
        }
    }
}

/// Compiles one authoring rule. Names resolve through `reg`; the microbiome,
/// if any, must be one of `microbiomes`.
pub fn compile_rule(
    def: &ReplacementDef,
    reg: &BlockRegistry,
    microbiomes: &[Microbiome],
) -> Result<CompiledRule, RuleError> {
    let mut ids = def
        .blocks_to_replace
        .iter()
        .map(|name| {
            reg.id_by_name(name)
                .ok_or_else(|| RuleError::UnknownBlock(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    ids.sort_unstable();
    ids.dedup();

    let mut mask = 0u32;
    for name in &def.base_blocks_to_replace {
        let base: BaseBlockType = name
            .parse()
            .map_err(|_| RuleError::UnknownBaseType(name.clone()))?;
        mask |= base.bit();
    }

    let replacement_id = reg
        .id_by_name(&def.replace_with)
        .ok_or_else(|| RuleError::UnknownReplacement(def.replace_with.clone()))?;

    if let Some(mb) = def.microbiome {
        if !microbiomes.iter().any(|m| m.id == mb) {
            return Err(RuleError::UnknownMicrobiome(mb));
        }
    }

    let min_y = def.min_y.unwrap_or(CompiledRule::UNBOUNDED_MIN);
    let max_y = def.max_y.unwrap_or(CompiledRule::UNBOUNDED_MAX);
    if min_y > max_y {
        return Err(RuleError::InvertedRange { min_y, max_y });
    }

    if ids.is_empty() && mask == 0 {
        return Err(RuleError::EmptyMatchSet);
    }

    Ok(CompiledRule {
        replacement_id,
        specific_ids_sorted: ids.into_boxed_slice(),
        base_type_mask: mask,
        min_y,
        max_y,
        microbiome_id: def.microbiome,
        priority: def.priority,
    })
}

/// Compiles every rule in authoring order, one compiled rule per input.
/// On failure reports the index of the offending rule.
pub fn compile_rules(
    defs: &[ReplacementDef],
    reg: &BlockRegistry,
    microbiomes: &[Microbiome],
) -> Result<Vec<CompiledRule>, (usize, RuleError)> {
    defs.iter()
        .enumerate()
        .map(|(i, def)| compile_rule(def, reg, microbiomes).map_err(|e| (i, e)))
        .collect()
}
