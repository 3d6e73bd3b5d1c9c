//! Fixed-length array of small unsigned indices packed into `u64` words.
//!
//! Every entry occupies exactly `bits` bits starting at bit `i * bits`, so an
//! entry may straddle two words when the width does not divide 64.

const WORD_BITS: usize = u64::BITS as usize;

/// Widest supported entry. Block ids are 16-bit, so a palette never needs more.
pub const MAX_BITS: u8 = 16;

/// Minimum width able to address `palette_len` distinct values (at least 1).
#[inline]
pub const fn bits_required(palette_len: usize) -> u8 {
    if palette_len <= 2 {
        1
    } else {
        (usize::BITS - (palette_len - 1).leading_zeros()) as u8
    }
}

/// Words needed to hold `len` entries of `bits` each.
#[inline]
pub const fn words_for(len: usize, bits: u8) -> usize {
    (len * bits as usize).div_ceil(WORD_BITS)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedIndices {
    bits: u8,
    len: usize,
    words: Vec<u64>,
}

impl PackedIndices {
    /// `len` zeroed entries at width `bits`.
    pub fn new(len: usize, bits: u8) -> Self {
        assert!(
            (1..=MAX_BITS).contains(&bits),
            "packed index width {bits} outside 1..={MAX_BITS}"
        );
        Self {
            bits,
            len,
            words: vec![0; words_for(len, bits)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Number of distinct values representable at the current width.
    #[inline]
    pub fn capacity(&self) -> usize {
        1usize << self.bits
    }

    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn mask(&self) -> u64 {
        (1u64 << self.bits) - 1
    }

    #[inline]
    pub fn get(&self, i: usize) -> u16 {
        assert!(i < self.len, "packed index {i} out of bounds ({})", self.len);
        let bits = self.bits as usize;
        let bit = i * bits;
        let w = bit / WORD_BITS;
        let off = bit % WORD_BITS;
        let mut v = self.words[w] >> off;
        if off + bits > WORD_BITS {
            v |= self.words[w + 1] << (WORD_BITS - off);
        }
        (v & self.mask()) as u16
    }

    #[inline]
    pub fn set(&mut self, i: usize, value: u16) {
        assert!(i < self.len, "packed index {i} out of bounds ({})", self.len);
        let mask = self.mask();
        let v = u64::from(value);
        assert!(v <= mask, "value {value} does not fit in {} bits", self.bits);
        let bits = self.bits as usize;
        let bit = i * bits;
        let w = bit / WORD_BITS;
        let off = bit % WORD_BITS;
        self.words[w] = (self.words[w] & !(mask << off)) | (v << off);
        if off + bits > WORD_BITS {
            let spill = WORD_BITS - off;
            let hi_mask = mask >> spill;
            self.words[w + 1] = (self.words[w + 1] & !hi_mask) | (v >> spill);
        }
    }

    /// Sets every entry to `value`.
    pub fn fill(&mut self, value: u16) {
        if value == 0 {
            self.words.fill(0);
            return;
        }
        for i in 0..self.len {
            self.set(i, value);
        }
    }

    /// Re-encodes every entry at `new_bits`. Widths only ever increase.
    ///
    /// The replacement buffer is fully populated before it is swapped in, so
    /// the array is never observable at a mixed width.
    pub fn grow(&mut self, new_bits: u8) {
        assert!(
            new_bits > self.bits,
            "packed width must grow: {} -> {new_bits}",
            self.bits
        );
        let mut next = PackedIndices::new(self.len, new_bits);
        for i in 0..self.len {
            next.set(i, self.get(i));
        }
        *self = next;
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }
}
