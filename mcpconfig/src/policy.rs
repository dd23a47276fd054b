/// When a recognized variable appears in the generated `environment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Needed by the server; always emitted.
    Required,
    /// Optional but always emitted so users see where to set it.
    Always,
    /// Emitted only when set in the environment.
    IfSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVarSpec {
    pub name: &'static str,
    pub inclusion: Inclusion,
}

const fn var(name: &'static str, inclusion: Inclusion) -> EnvVarSpec {
    EnvVarSpec { name, inclusion }
}

/// Recognized variables in output order.
pub const RECOGNIZED_ENV_VARS: &[EnvVarSpec] = &[
    var("MILVUS_TOKEN", Inclusion::Required),
    var("MILVUS_ADDRESS", Inclusion::Always),
    var("EMBEDDING_PROVIDER", Inclusion::Always),
    var("EMBEDDING_MODEL", Inclusion::Always),
    var("OPENAI_API_KEY", Inclusion::IfSet),
    var("OPENAI_BASE_URL", Inclusion::IfSet),
    var("VOYAGEAI_API_KEY", Inclusion::IfSet),
    var("GEMINI_API_KEY", Inclusion::IfSet),
    var("GEMINI_BASE_URL", Inclusion::IfSet),
    var("OLLAMA_MODEL", Inclusion::IfSet),
    var("OLLAMA_HOST", Inclusion::IfSet),
    var("CUSTOM_EXTENSIONS", Inclusion::IfSet),
    var("CUSTOM_IGNORE_PATTERNS", Inclusion::IfSet),
    var("HYBRID_MODE", Inclusion::IfSet),
    var("EMBEDDING_BATCH_SIZE", Inclusion::IfSet),
];

pub fn recognized_env_vars() -> &'static [EnvVarSpec] {
    RECOGNIZED_ENV_VARS
}

/// Names of the variables with the given inclusion policy, in output order.
pub fn names_with(inclusion: Inclusion) -> impl Iterator<Item = &'static str> {
    RECOGNIZED_ENV_VARS
        .iter()
        .filter(move |v| v.inclusion == inclusion)
        .map(|v| v.name)
}

/// Placeholder resolved by the host from its own environment.
pub fn placeholder(name: &str) -> String {
    format!("{{env:{name}}}")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_policy_lists() {
        assert_eq!(names_with(Inclusion::Required).collect::<Vec<_>>(), ["MILVUS_TOKEN"]);
        assert_eq!(
            names_with(Inclusion::Always).collect::<Vec<_>>(),
            ["MILVUS_ADDRESS", "EMBEDDING_PROVIDER", "EMBEDDING_MODEL"]
        );
        assert_eq!(names_with(Inclusion::IfSet).count(), 11);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = RECOGNIZED_ENV_VARS.iter().map(|v| v.name).collect();
        assert_eq!(names.len(), RECOGNIZED_ENV_VARS.len());
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder("MILVUS_TOKEN"), "{env:MILVUS_TOKEN}");
    }
}
