use proptest::prelude::*;
use strata_blocks::{AIR, BlockId};
use strata_chunk::{ChunkSection, PackedIndices, SECTION_SIZE, VOXEL_COUNT};

fn coord() -> impl Strategy<Value = usize> {
    0usize..SECTION_SIZE
}

// Small id pool keeps air likely; a wide one forces several growth steps.
fn block_id() -> impl Strategy<Value = BlockId> {
    prop_oneof![
        2 => Just(AIR),
        3 => 1u16..8,
        2 => 0u16..600,
    ]
}

fn op() -> impl Strategy<Value = (usize, usize, usize, BlockId)> {
    (coord(), coord(), coord(), block_id())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // get_block returns the last id written, width never shrinks, counters stay exact
    #[test]
    fn set_then_get_round_trips(ops in proptest::collection::vec(op(), 1..400)) {
        let mut s = ChunkSection::new();
        let mut shadow = vec![AIR; VOXEL_COUNT];
        let mut last_bits = s.bits_per_index();
        for (x, y, z, id) in ops {
            let prev = s.set_block(x, y, z, id);
            let i = ChunkSection::index_of(x, y, z);
            prop_assert_eq!(prev, shadow[i]);
            shadow[i] = id;
            prop_assert_eq!(s.get_block(x, y, z), id);
            prop_assert!(s.bits_per_index() >= last_bits);
            last_bits = s.bits_per_index();
        }
        for (i, b) in s.blocks().enumerate() {
            prop_assert_eq!(b, shadow[i]);
        }
        let non_air = shadow.iter().filter(|&&b| b != AIR).count() as u32;
        prop_assert_eq!(s.non_air_count(), non_air);
        prop_assert_eq!(s.is_all_air(), non_air == 0);
    }

    // Palette and its lookup stay inverse; every packed index is a palette entry
    #[test]
    fn palette_stays_consistent(ops in proptest::collection::vec(op(), 1..300)) {
        let mut s = ChunkSection::new();
        for (x, y, z, id) in ops {
            s.set_block(x, y, z, id);
        }
        let pal = s.palette();
        prop_assert_eq!(pal.entries()[0], AIR);
        for (i, id) in pal.entries().iter().enumerate() {
            prop_assert_eq!(pal.index_of(*id), Some(i as u16));
        }
        prop_assert!(pal.len() <= 1usize << s.bits_per_index());
        for i in 0..VOXEL_COUNT {
            prop_assert!((s.palette_index_at(i) as usize) < pal.len());
        }
    }

    // Growing to any wider width keeps every stored value
    #[test]
    fn packed_grow_preserves(bits in 1u8..8, extra in 1u8..8, seed in proptest::collection::vec(any::<u16>(), 50)) {
        let to = (bits + extra).min(16);
        let mut p = PackedIndices::new(seed.len(), bits);
        let cap = 1u32 << bits;
        for (i, v) in seed.iter().enumerate() {
            p.set(i, (u32::from(*v) % cap) as u16);
        }
        p.grow(to);
        prop_assert_eq!(p.bits(), to);
        for (i, v) in seed.iter().enumerate() {
            prop_assert_eq!(u32::from(p.get(i)), u32::from(*v) % cap);
        }
    }
}

#[test]
fn sixth_distinct_id_in_stone_section_forces_three_bits() {
    let mut s = ChunkSection::new();
    s.fill(5);
    assert_eq!(s.bits_per_index(), 1);
    assert_eq!(s.palette().entries(), &[AIR, 5]);
    for (i, id) in [20u16, 21, 22, 23, 24].into_iter().enumerate() {
        s.set_block(i, 7, 7, id);
    }
    assert_eq!(s.palette().len(), 7);
    assert_eq!(s.bits_per_index(), 3);
    let fives = s.blocks().filter(|&b| b == 5).count();
    assert_eq!(fives, VOXEL_COUNT - 5);
    assert_eq!(s.non_air_count(), VOXEL_COUNT as u32);
}
