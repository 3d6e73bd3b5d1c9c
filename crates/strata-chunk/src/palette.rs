use hashbrown::HashMap;
use strata_blocks::{AIR, BlockId};

/// Most entries a palette can hold; one per possible block id.
pub const MAX_PALETTE_LEN: usize = 1 << 16;

/// Per-section table of block ids in first-seen order, plus its inverse.
///
/// Index 0 is always [`AIR`]. Entries are only ever appended, so an index
/// handed out once stays valid for the lifetime of the palette.
#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<BlockId>,
    lookup: HashMap<BlockId, u16>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity.max(1));
        entries.push(AIR);
        let mut lookup = HashMap::with_capacity(capacity.max(1));
        lookup.insert(AIR, 0);
        Self { entries, lookup }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the air entry is permanent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[BlockId] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, index: u16) -> Option<BlockId> {
        self.entries.get(index as usize).copied()
    }

    #[inline]
    pub fn index_of(&self, id: BlockId) -> Option<u16> {
        self.lookup.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: BlockId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Block id stored at `index`.
    ///
    /// # Panics
    /// If `index` is not a palette entry: packed data referencing it is corrupt.
    #[inline]
    pub fn resolve(&self, index: u16) -> BlockId {
        match self.entries.get(index as usize) {
            Some(id) => *id,
            None => panic!(
                "corrupt section: palette index {index} >= palette length {}",
                self.entries.len()
            ),
        }
    }

    /// Index for `id`, appending it when absent. The flag reports an append.
    pub fn insert(&mut self, id: BlockId) -> (u16, bool) {
        if let Some(&index) = self.lookup.get(&id) {
            return (index, false);
        }
        // Unreachable with 16-bit ids: every id already has a slot by then.
        assert!(
            self.entries.len() < MAX_PALETTE_LEN,
            "palette exceeds {MAX_PALETTE_LEN} entries"
        );
        let index = self.entries.len() as u16;
        self.entries.push(id);
        self.lookup.insert(id, index);
        (index, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_air() {
        let p = Palette::new();
        assert_eq!(p.entries(), &[AIR]);
        assert_eq!(p.index_of(AIR), Some(0));
    }

    #[test]
    fn insert_appends_once() {
        let mut p = Palette::new();
        assert_eq!(p.insert(7), (1, true));
        assert_eq!(p.insert(3), (2, true));
        assert_eq!(p.insert(7), (1, false));
        assert_eq!(p.insert(AIR), (0, false));
        assert_eq!(p.entries(), &[AIR, 7, 3]);
        for (i, id) in p.entries().iter().enumerate() {
            assert_eq!(p.index_of(*id), Some(i as u16));
        }
    }

    #[test]
    #[should_panic(expected = "corrupt section")]
    fn resolve_out_of_range_panics() {
        Palette::new().resolve(1);
    }
}
