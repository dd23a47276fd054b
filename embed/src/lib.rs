//! OpenCode embedding adapter.
//!
//! Turns text into dense vectors through an OpenAI-compatible
//! `POST {base_url}/embeddings` endpoint and keeps track of the output
//! dimension of the configured model.

pub mod config;
pub mod dimension;
pub mod embed;
pub mod error;
pub mod models;
pub mod opencode;
pub(crate) mod openai_compat;

pub use config::EmbedConfig;
pub use dimension::DimensionState;
pub use embed::{Embedder, EmbeddingVector};
pub use error::{ApiError, EmbedError, Operation};
pub use models::ModelDescriptor;
pub use opencode::OpenCode;
