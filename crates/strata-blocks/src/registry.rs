use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig, TexturesDef};
use super::error::RegistryError;
use super::types::{AIR, BaseBlockType, BlockId, BlockTextures};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub base: BaseBlockType,
    pub textures: BlockTextures,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            base: BaseBlockType::Empty,
            textures: BlockTextures::default(),
        }
    }

    #[inline]
    fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

/// Table of block types indexed by id. Slot 0 is always `air`.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Registry holding only `air`.
    pub fn new() -> Self {
        let mut air = BlockType::placeholder(AIR);
        air.name = "air".into();
        Self {
            blocks: vec![air],
            by_name: HashMap::from([("air".to_string(), AIR)]),
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).filter(|t| !t.is_placeholder())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Base type of `id`. Ids with no registered type count as `Empty`.
    #[inline]
    pub fn base_type(&self, id: BlockId) -> BaseBlockType {
        self.blocks
            .get(id as usize)
            .map(|t| t.base)
            .unwrap_or(BaseBlockType::Empty)
    }

    /// Number of registered block types, holes excluded.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter().filter(|t| !t.is_placeholder())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg)?)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry {
            blocks: vec![BlockType::placeholder(AIR)],
            by_name: HashMap::new(),
        };
        for def in cfg.blocks.into_iter() {
            let ty = compile_block(&reg, def)?;
            let slot = ty.id as usize;
            if reg.blocks.len() <= slot {
                let start = reg.blocks.len();
                reg.blocks
                    .extend((start..=slot).map(|i| BlockType::placeholder(i as BlockId)));
            }
            let existing = &reg.blocks[slot];
            if !existing.is_placeholder() {
                return Err(RegistryError::DuplicateId {
                    id: ty.id,
                    first: existing.name.clone(),
                    second: ty.name,
                });
            }
            reg.by_name.insert(ty.name.clone(), ty.id);
            reg.blocks[slot] = ty;
        }
        if reg.blocks[AIR as usize].is_placeholder() {
            reg.blocks[AIR as usize].name = "air".into();
            reg.by_name.insert("air".into(), AIR);
        }
        log::debug!(
            "block registry: {} types, highest id {}",
            reg.len(),
            reg.blocks.len() - 1
        );
        Ok(reg)
    }
}

fn compile_block(reg: &BlockRegistry, def: BlockDef) -> Result<BlockType, RegistryError> {
    // Blank names are reserved for vacant id slots.
    if def.name.trim().is_empty() {
        return Err(RegistryError::EmptyName { id: def.id });
    }
    if reg.by_name.contains_key(&def.name) {
        return Err(RegistryError::DuplicateName(def.name));
    }
    let base: BaseBlockType = def
        .base
        .parse()
        .map_err(|_| RegistryError::UnknownBaseType {
            block: def.name.clone(),
            base: def.base.clone(),
        })?;
    let is_air_name = def.name == "air";
    let id = match def.id {
        Some(id) => id,
        None if is_air_name => AIR,
        None => {
            let next = reg.blocks.len();
            BlockId::try_from(next).map_err(|_| RegistryError::TooManyBlocks)?
        }
    };
    if (id == AIR) != is_air_name || (is_air_name && base != BaseBlockType::Empty) {
        return Err(RegistryError::InvalidAir(def.name));
    }
    let textures = match def.textures {
        None => BlockTextures::default(),
        Some(TexturesDef::Key(k)) => BlockTextures {
            all: Some(k),
            ..BlockTextures::default()
        },
        Some(TexturesDef::Faces {
            all,
            top,
            bottom,
            side,
        }) => BlockTextures {
            all,
            top,
            bottom,
            side,
        },
    };
    Ok(BlockType {
        id,
        name: def.name,
        base,
        textures,
    })
}
