use thiserror::Error;

use crate::types::BlockId;

/// Problems found while building a [`crate::BlockRegistry`] from authoring data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("block name is blank (id {id:?})")]
    EmptyName { id: Option<BlockId> },

    #[error("block `{0}` is defined more than once")]
    DuplicateName(String),

    #[error("block id {id} is claimed by both `{first}` and `{second}`")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },

    #[error("block `{block}` has unknown base type `{base}`")]
    UnknownBaseType { block: String, base: String },

    #[error("block id 0 is reserved for `air` with base `empty`; found `{0}`")]
    InvalidAir(String),

    #[error("block ids exhausted: more than 65536 block types")]
    TooManyBlocks,
}
