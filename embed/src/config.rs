/// Environment variable holding the OpenCode API key.
pub const ENV_API_KEY: &str = "OPENCODE_API_KEY";
/// Environment variable selecting the embedding model.
pub const ENV_MODEL: &str = "EMBEDDING_MODEL";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "OPENCODE_BASE_URL";

/// Builder-style configuration for the OpenCode embedder.
///
/// Empty fields fall back to the provider defaults at construction.
#[derive(Debug, Clone, Default)]
pub struct EmbedConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

impl EmbedConfig {
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_string();
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Load from `OPENCODE_API_KEY`, `EMBEDDING_MODEL` and `OPENCODE_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_default()
        };
        Self {
            model: get(ENV_MODEL),
            api_key: get(ENV_API_KEY),
            base_url: get(ENV_BASE_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "sk-test"),
            (ENV_MODEL, "opencode-code-embed"),
            (ENV_BASE_URL, "  "),
        ]
        .into_iter()
        .collect();

        let cfg = EmbedConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(cfg.api_key, "sk-test");
        assert_eq!(cfg.model, "opencode-code-embed");
        assert!(cfg.base_url.is_empty());
    }

    #[test]
    fn test_builder() {
        let cfg = EmbedConfig::default()
            .with_model("custom")
            .with_api_key("k")
            .with_base_url("http://localhost:8080/v1");
        assert_eq!(cfg.model, "custom");
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.base_url, "http://localhost:8080/v1");
    }
}
