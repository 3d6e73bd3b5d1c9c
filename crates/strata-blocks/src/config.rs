use serde::Deserialize;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    // Explicit ids keep worlds stable across edits; absent ids are assigned in file order.
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default)]
    pub textures: Option<TexturesDef>,
}

fn default_base() -> String {
    "empty".into()
}

// Textures: either a single key for every face, or per-face keys
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TexturesDef {
    Key(String),
    Faces {
        #[serde(default)]
        all: Option<String>,
        #[serde(default)]
        top: Option<String>,
        #[serde(default)]
        bottom: Option<String>,
        #[serde(default)]
        side: Option<String>,
    },
}
