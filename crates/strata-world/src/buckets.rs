use strata_chunk::SECTION_SIZE;

use crate::error::WorldGenError;
use crate::rules::CompiledRule;

/// Vertical span of a chunk column, measured in whole sections.
///
/// Section `i` covers world Y `base_y + 20 * i ..= base_y + 20 * i + 19`.
/// Construction guarantees at least one section and that the whole span,
/// top voxel included, is representable as an `i32` world Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnExtent {
    base_y: i32,
    section_count: usize,
}

impl ColumnExtent {
    /// Validated extent.
    pub fn try_new(base_y: i32, section_count: usize) -> Result<Self, WorldGenError> {
        if section_count == 0 {
            return Err(WorldGenError::EmptyColumn);
        }
        let top = i64::try_from(section_count)
            .ok()
            .and_then(|n| n.checked_mul(SECTION_SIZE as i64))
            .map(|height| i64::from(base_y) + height - 1);
        match top {
            Some(top) if i32::try_from(top).is_ok() => Ok(Self {
                base_y,
                section_count,
            }),
            _ => Err(WorldGenError::ColumnOutOfRange {
                base_y,
                sections: section_count,
            }),
        }
    }

    /// # Panics
    /// If the extent is rejected by [`ColumnExtent::try_new`].
    pub fn new(base_y: i32, section_count: usize) -> Self {
        match Self::try_new(base_y, section_count) {
            Ok(extent) => extent,
            Err(e) => panic!("invalid column extent: {e}"),
        }
    }

    #[inline]
    pub fn base_y(&self) -> i32 {
        self.base_y
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// World Y of the bottom layer of `section`.
    ///
    /// # Panics
    /// If `section` is not inside the column.
    #[inline]
    pub fn section_origin_y(&self, section: usize) -> i32 {
        assert!(
            section < self.section_count,
            "section {section} outside column of {} sections",
            self.section_count
        );
        // In range: the whole column fits in i32.
        (i64::from(self.base_y) + section as i64 * SECTION_SIZE as i64) as i32
    }

    /// Inclusive world-Y band of `section`.
    #[inline]
    pub fn section_y_range(&self, section: usize) -> (i32, i32) {
        let y0 = self.section_origin_y(section);
        (y0, y0 + (SECTION_SIZE as i32 - 1))
    }

    pub fn section_of(&self, world_y: i32) -> Option<usize> {
        let rel = i64::from(world_y) - i64::from(self.base_y);
        let section = usize::try_from(rel).ok()? / SECTION_SIZE;
        (section < self.section_count).then_some(section)
    }

    pub fn min_y(&self) -> i32 {
        self.base_y
    }

    pub fn max_y(&self) -> i32 {
        self.section_y_range(self.section_count - 1).1
    }
}

/// Per-section lists of compiled-rule indices, each ordered by ascending
/// priority with ties kept in compiled order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionBuckets {
    extent: Option<ColumnExtent>,
    buckets: Box<[Box<[u32]>]>,
}

impl SectionBuckets {
    pub fn build(rules: &[CompiledRule], extent: ColumnExtent) -> Self {
        let mut order: Vec<u32> = (0..rules.len() as u32).collect();
        // Pairing priority with the compiled index spells out the tie-break.
        order.sort_unstable_by_key(|&i| (rules[i as usize].priority, i));

        let buckets = (0..extent.section_count())
            .map(|section| {
                let (y0, y1) = extent.section_y_range(section);
                order
                    .iter()
                    .copied()
                    .filter(|&i| rules[i as usize].vertical_intersects(y0, y1))
                    .collect::<Box<[u32]>>()
            })
            .collect();

        Self {
            extent: Some(extent),
            buckets,
        }
    }

    /// Candidate rule indices for `section`; empty outside the column.
    #[inline]
    pub fn get(&self, section: usize) -> &[u32] {
        self.buckets.get(section).map(|b| &**b).unwrap_or(&[])
    }

    pub fn extent(&self) -> Option<ColumnExtent> {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u32]> {
        self.buckets.iter().map(|b| &**b)
    }
}
