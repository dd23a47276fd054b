use std::collections::BTreeMap;

/// A model with a fixed, published output dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub dimension: usize,
    pub description: &'static str,
}

/// OpenCode embedding models.
pub const MODEL_OPENCODE_EMBED_V1: &str = "opencode-embed-v1";
pub const MODEL_OPENCODE_EMBED_LARGE: &str = "opencode-embed-large";
pub const MODEL_OPENCODE_CODE_EMBED: &str = "opencode-code-embed";

pub const KNOWN_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        name: MODEL_OPENCODE_EMBED_V1,
        dimension: 1536,
        description: "General-purpose text embedding model (default)",
    },
    ModelDescriptor {
        name: MODEL_OPENCODE_EMBED_LARGE,
        dimension: 3072,
        description: "Higher-accuracy text embedding model",
    },
    ModelDescriptor {
        name: MODEL_OPENCODE_CODE_EMBED,
        dimension: 1024,
        description: "Embedding model tuned for source code",
    },
];

/// Look up a known model by name.
pub fn lookup(name: &str) -> Option<&'static ModelDescriptor> {
    KNOWN_MODELS.iter().find(|m| m.name == name)
}

/// All known models keyed by name.
pub fn supported_models() -> BTreeMap<&'static str, ModelDescriptor> {
    KNOWN_MODELS.iter().map(|m| (m.name, *m)).collect()
}
