use proptest::prelude::*;
use strata_blocks::config::{BlockDef, BlocksConfig};
use strata_blocks::{AIR, BaseBlockType, BlockId, BlockRegistry};
use strata_chunk::{ChunkSection, SECTION_SIZE, VOXEL_COUNT};
use strata_world::{
    Biome, ColumnExtent, CompiledRule, MicrobiomeId, SectionBuckets, Strata, decorate_section,
};

const BASES: [&str; 4] = ["stone", "soil", "water", "living"];

// ids 1..=8, base types cycling through BASES
fn registry() -> BlockRegistry {
    let blocks = (1u16..=8)
        .map(|id| BlockDef {
            name: format!("b{id}"),
            id: Some(id),
            base: BASES[id as usize % BASES.len()].into(),
            textures: None,
        })
        .collect();
    BlockRegistry::from_config(BlocksConfig { blocks }).unwrap()
}

fn y_bound() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![1 => Just(None), 4 => (-60i32..200).prop_map(Some)]
}

fn arb_rule() -> impl Strategy<Value = CompiledRule> {
    (
        0u16..=8,
        proptest::collection::btree_set(0u16..=8, 0..4),
        0u32..(1 << BaseBlockType::COUNT),
        y_bound(),
        y_bound(),
        prop_oneof![2 => Just(None), 1 => (1u16..=2).prop_map(Some)],
        0i32..4,
    )
        .prop_map(|(replacement_id, ids, mask, a, b, microbiome_id, priority)| {
            let mut min_y = a.unwrap_or(CompiledRule::UNBOUNDED_MIN);
            let mut max_y = b.unwrap_or(CompiledRule::UNBOUNDED_MAX);
            if min_y > max_y {
                std::mem::swap(&mut min_y, &mut max_y);
            }
            CompiledRule {
                replacement_id,
                specific_ids_sorted: ids.into_iter().collect(),
                // keep masks sparse so specific ids matter
                base_type_mask: mask & mask.rotate_left(3),
                min_y,
                max_y,
                microbiome_id,
                priority,
            }
        })
}

fn biome_with(rules: Vec<CompiledRule>, extent: ColumnExtent) -> Biome {
    let section_buckets = SectionBuckets::build(&rules, extent);
    Biome {
        id: 1,
        name: "test".into(),
        strata: Strata {
            stone_min_y: 0,
            stone_max_y: 0,
            stone_depth_min: 0,
            stone_depth_max: 0,
            soil_min_y: 0,
            soil_max_y: 0,
            soil_depth_min: 0,
            soil_depth_max: 0,
            water_level: 0,
        },
        microbiomes: Vec::new(),
        simple_replacements: Vec::new(),
        compiled_rules: rules.into_boxed_slice(),
        section_buckets,
    }
}

fn microbiome_at(lx: usize, _ly: usize, lz: usize) -> Option<MicrobiomeId> {
    match (lx + lz) % 3 {
        0 => None,
        1 => Some(1),
        _ => Some(2),
    }
}

// Reference: full scan of every rule in (priority, index) order, no buckets or fast paths
fn naive_replacement(
    rules: &[CompiledRule],
    id: BlockId,
    base: BaseBlockType,
    y: i32,
    mb: Option<MicrobiomeId>,
) -> Option<BlockId> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&i| (rules[i].priority, i));
    order.into_iter().map(|i| &rules[i]).find_map(|r| {
        let mb_ok = r.microbiome_id.is_none() || r.microbiome_id == mb;
        let y_ok = r.min_y <= y && y <= r.max_y;
        let hit = r.base_type_mask & (1 << base as u32) != 0
            || r.specific_ids_sorted.iter().any(|&s| s == id);
        (mb_ok && y_ok && hit).then_some(r.replacement_id)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Binary search over the sorted list agrees with a linear scan
    #[test]
    fn matches_equals_linear_scan(rule in arb_rule(), id in 0u16..=10, base_i in 0usize..BaseBlockType::COUNT) {
        let base = BaseBlockType::ALL[base_i];
        let linear = rule.specific_ids_sorted.iter().any(|&s| s == id);
        prop_assert_eq!(rule.specific_ids_sorted.binary_search(&id).is_ok(), linear);
        prop_assert_eq!(rule.matches(id, base), linear || base.in_mask(rule.base_type_mask));
    }

    // Every rule sits in exactly the buckets it intersects, ordered by (priority, index)
    #[test]
    fn buckets_are_exact_and_ordered(
        rules in proptest::collection::vec(arb_rule(), 0..24),
        base_y in -80i32..40,
        sections in 1usize..12,
    ) {
        let extent = ColumnExtent::new(base_y, sections);
        let buckets = SectionBuckets::build(&rules, extent);
        prop_assert_eq!(buckets.len(), sections);
        for s in 0..sections {
            let (y0, y1) = extent.section_y_range(s);
            let bucket = buckets.get(s);
            for (i, r) in rules.iter().enumerate() {
                let expect = r.min_y <= y1 && r.max_y >= y0;
                prop_assert_eq!(bucket.contains(&(i as u32)), expect);
            }
            for w in bucket.windows(2) {
                let (a, b) = (w[0] as usize, w[1] as usize);
                prop_assert!((rules[a].priority, a) < (rules[b].priority, b));
            }
        }
    }

    // The bucketed, fast-pathed pass writes exactly what a naive full scan decides
    #[test]
    fn decorate_matches_naive_scan(
        rules in proptest::collection::vec(arb_rule(), 0..12),
        fill in proptest::collection::vec(0u16..=8, SECTION_SIZE),
        base_y in -40i32..60,
        section in 0usize..3,
    ) {
        let reg = registry();
        let extent = ColumnExtent::new(base_y, 3);
        let biome = biome_with(rules.clone(), extent);
        let mut s = ChunkSection::new();
        for i in 0..VOXEL_COUNT {
            let (lx, ly, lz) = ChunkSection::coords_of(i);
            s.set_block_at(i, fill[(lx * 7 + ly * 3 + lz) % fill.len()]);
        }
        let before: Vec<BlockId> = s.blocks().collect();
        let stats = decorate_section(&mut s, &biome, section, &reg, &microbiome_at);

        let (y0, _) = extent.section_y_range(section);
        let mut changed = 0;
        for (i, &id) in before.iter().enumerate() {
            let (lx, ly, lz) = ChunkSection::coords_of(i);
            let expect = naive_replacement(
                &rules,
                id,
                reg.base_type(id),
                y0 + ly as i32,
                microbiome_at(lx, ly, lz),
            )
            .unwrap_or(id);
            if expect != id {
                changed += 1;
            }
            prop_assert_eq!(s.block_at(i), expect);
        }
        prop_assert_eq!(stats.replaced, changed);
        let non_air = s.blocks().filter(|&b| b != AIR).count() as u32;
        prop_assert_eq!(s.non_air_count(), non_air);
    }
}
