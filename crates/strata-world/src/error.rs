use thiserror::Error;

/// Why a single replacement rule failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown block `{0}` in blocks_to_replace")]
    UnknownBlock(String),

    #[error("unknown base block type `{0}`")]
    UnknownBaseType(String),

    #[error("unknown replacement block `{0}`")]
    UnknownReplacement(String),

    #[error("microbiome {0} is not defined by this biome")]
    UnknownMicrobiome(u16),

    #[error("min_y {min_y} is above max_y {max_y}")]
    InvertedRange { min_y: i32, max_y: i32 },

    #[error("rule matches nothing: no blocks or base types to replace")]
    EmptyMatchSet,
}

/// Authoring problems that reject a whole biome file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiomeError {
    #[error("biome `{biome}` replacement #{rule}: {kind}")]
    Rule {
        biome: String,
        rule: usize,
        kind: RuleError,
    },

    #[error("biome name `{0}` is defined more than once")]
    DuplicateName(String),

    #[error("biome id {id} is claimed by both `{first}` and `{second}`")]
    DuplicateId {
        id: u16,
        first: String,
        second: String,
    },

    #[error("biome `{biome}` defines microbiome {id} more than once")]
    DuplicateMicrobiome { biome: String, id: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldGenError {
    #[error("fill block `{0}` is not registered")]
    UnknownFillBlock(String),

    #[error("column must contain at least one section")]
    EmptyColumn,

    #[error("column of {sections} sections from y {base_y} reaches past the i32 world height")]
    ColumnOutOfRange { base_y: i32, sections: usize },
}
