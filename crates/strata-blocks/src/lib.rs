//! Block ids, base block types, and the block-type registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use registry::{BlockRegistry, BlockType};
pub use types::{AIR, BaseBlockType, BlockId, BlockTextures, FaceRole};
