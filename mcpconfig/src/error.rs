use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("mcpconfig: encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
