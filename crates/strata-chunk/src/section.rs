use strata_blocks::{AIR, BlockId};

use crate::bitpack::{PackedIndices, bits_required};
use crate::palette::Palette;

/// Edge length of a cubic section.
pub const SECTION_SIZE: usize = 20;
/// Voxels per section.
pub const VOXEL_COUNT: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;

/// A 20³ block of voxels stored as a palette plus bit-packed palette indices.
///
/// Owned by a single writer while it is generated; afterwards only read.
/// Every mutating method leaves the palette, packed data and air counters
/// consistent before returning.
#[derive(Clone, Debug)]
pub struct ChunkSection {
    palette: Palette,
    data: PackedIndices,
    non_air: u32,
}

impl Default for ChunkSection {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkSection {
    /// All-air section at the minimum width.
    pub fn new() -> Self {
        Self::with_palette_capacity(1)
    }

    /// Like [`ChunkSection::new`], reserving palette memory for `capacity`
    /// distinct ids. The packed width still starts at 1 bit.
    pub fn with_palette_capacity(capacity: usize) -> Self {
        Self {
            palette: Palette::with_capacity(capacity),
            data: PackedIndices::new(VOXEL_COUNT, 1),
            non_air: 0,
        }
    }

    /// Flat index of a local coordinate (`y`-major, then `z`, then `x`).
    ///
    /// # Panics
    /// If any coordinate is outside `0..SECTION_SIZE`.
    #[inline]
    pub fn index_of(lx: usize, ly: usize, lz: usize) -> usize {
        assert!(
            lx < SECTION_SIZE && ly < SECTION_SIZE && lz < SECTION_SIZE,
            "local coordinate ({lx}, {ly}, {lz}) outside section of size {SECTION_SIZE}"
        );
        (ly * SECTION_SIZE + lz) * SECTION_SIZE + lx
    }

    #[inline]
    pub fn coords_of(index: usize) -> (usize, usize, usize) {
        debug_assert!(index < VOXEL_COUNT);
        let lx = index % SECTION_SIZE;
        let lz = (index / SECTION_SIZE) % SECTION_SIZE;
        let ly = index / (SECTION_SIZE * SECTION_SIZE);
        (lx, ly, lz)
    }

    #[inline]
    pub fn get_block(&self, lx: usize, ly: usize, lz: usize) -> BlockId {
        self.block_at(Self::index_of(lx, ly, lz))
    }

    /// Writes `id` at a local coordinate, returning the id it replaced.
    #[inline]
    pub fn set_block(&mut self, lx: usize, ly: usize, lz: usize, id: BlockId) -> BlockId {
        self.set_block_at(Self::index_of(lx, ly, lz), id)
    }

    #[inline]
    pub fn block_at(&self, index: usize) -> BlockId {
        self.palette.resolve(self.data.get(index))
    }

    /// Palette index stored at a flat index.
    #[inline]
    pub fn palette_index_at(&self, index: usize) -> u16 {
        let i = self.data.get(index);
        debug_assert!((i as usize) < self.palette.len());
        i
    }

    /// Flat-index variant of [`ChunkSection::set_block`].
    pub fn set_block_at(&mut self, index: usize, id: BlockId) -> BlockId {
        let prev = self.data.get(index);
        let prev_id = self.palette.resolve(prev);
        if prev_id == id {
            return id;
        }
        let next = self.intern(id);
        self.data.set(index, next);
        match (prev != 0, next != 0) {
            (false, true) => self.non_air += 1,
            (true, false) => self.non_air -= 1,
            _ => {}
        }
        prev_id
    }

    /// Sets every voxel to `id`.
    pub fn fill(&mut self, id: BlockId) {
        let index = self.intern(id);
        self.data.fill(index);
        self.non_air = if id == AIR { 0 } else { VOXEL_COUNT as u32 };
    }

    fn intern(&mut self, id: BlockId) -> u16 {
        let (index, appended) = self.palette.insert(id);
        if appended && self.palette.len() > self.data.capacity() {
            let bits = bits_required(self.palette.len());
            log::trace!(
                "section palette grew to {} entries: {} -> {} bits",
                self.palette.len(),
                self.data.bits(),
                bits
            );
            self.data.grow(bits);
        }
        index
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn packed(&self) -> &PackedIndices {
        &self.data
    }

    #[inline]
    pub fn bits_per_index(&self) -> u8 {
        self.data.bits()
    }

    #[inline]
    pub fn non_air_count(&self) -> u32 {
        self.non_air
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.non_air == 0
    }

    /// Block ids in flat index order.
    pub fn blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.data.iter().map(|i| self.palette.resolve(i))
    }
}
