use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Opaque 16-bit block identifier, resolved against a [`crate::BlockRegistry`].
pub type BlockId = u16;

/// Reserved id for empty space. Palette index 0 always maps here.
pub const AIR: BlockId = 0;

/// Coarse material category used for bulk rule matching.
///
/// Discriminants double as bit positions in a rule's base-type mask, so the
/// order is part of the compiled format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BaseBlockType {
    #[default]
    Empty = 0,
    Gas = 1,
    Living = 2,
    Mineral = 3,
    Liquid = 4,
    Soil = 5,
    Stone = 6,
    Water = 7,
    Wood = 8,
}

impl BaseBlockType {
    pub const COUNT: usize = 9;

    pub const ALL: [BaseBlockType; Self::COUNT] = [
        BaseBlockType::Empty,
        BaseBlockType::Gas,
        BaseBlockType::Living,
        BaseBlockType::Mineral,
        BaseBlockType::Liquid,
        BaseBlockType::Soil,
        BaseBlockType::Stone,
        BaseBlockType::Water,
        BaseBlockType::Wood,
    ];

    #[inline]
    pub const fn bit(self) -> u32 {
        1u32 << (self as u32)
    }

    #[inline]
    pub const fn in_mask(self, mask: u32) -> bool {
        mask & self.bit() != 0
    }

    pub const fn name(self) -> &'static str {
        match self {
            BaseBlockType::Empty => "empty",
            BaseBlockType::Gas => "gas",
            BaseBlockType::Living => "living",
            BaseBlockType::Mineral => "mineral",
            BaseBlockType::Liquid => "liquid",
            BaseBlockType::Soil => "soil",
            BaseBlockType::Stone => "stone",
            BaseBlockType::Water => "water",
            BaseBlockType::Wood => "wood",
        }
    }
}

impl fmt::Display for BaseBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown base block type `{0}`")]
pub struct ParseBaseTypeError(pub String);

impl FromStr for BaseBlockType {
    type Err = ParseBaseTypeError;

    // Authoring files are written by hand; accept any casing ("Stone", "stone").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        BaseBlockType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseBaseTypeError(s.to_string()))
    }
}

// Used by cube-like shapes to resolve which texture to apply
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    All,
    Top,
    Bottom,
    Side,
}

/// Texture keys per face role. Resolution of keys to images belongs to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockTextures {
    pub all: Option<String>,
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub side: Option<String>,
}

impl BlockTextures {
    pub fn face(&self, role: FaceRole) -> Option<&str> {
        let pick = match role {
            FaceRole::Top => self.top.as_ref().or(self.all.as_ref()),
            FaceRole::Bottom => self.bottom.as_ref().or(self.all.as_ref()),
            FaceRole::Side => self.side.as_ref().or(self.all.as_ref()),
            FaceRole::All => self.all.as_ref(),
        };
        pick.map(String::as_str)
    }
}
