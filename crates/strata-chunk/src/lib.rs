//! Paletted, bit-packed voxel storage for cubic chunk sections.
#![forbid(unsafe_code)]

pub mod bitpack;
pub mod palette;
pub mod section;

pub use bitpack::{PackedIndices, bits_required};
pub use palette::Palette;
pub use section::{ChunkSection, SECTION_SIZE, VOXEL_COUNT};
