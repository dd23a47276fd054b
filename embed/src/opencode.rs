use std::collections::BTreeMap;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::EmbedConfig;
use crate::dimension::DimensionState;
use crate::embed::{Embedder, EmbeddingVector};
use crate::error::{ApiError, EmbedError, Operation};
use crate::models::{self, ModelDescriptor, MODEL_OPENCODE_EMBED_V1};
use crate::openai_compat::EmbeddingInput;

pub const PROVIDER_NAME: &str = "OpenCode";

const OPENCODE_BASE_URL: &str = "https://api.opencode.ai/v1";
const OPENCODE_DEFAULT_DIM: usize = 1536;
const PROBE_TEXT: &str = "test";

/// OpenCode embedder using an OpenAI-compatible `/embeddings` endpoint.
///
/// Dimensions of the models in [`models::KNOWN_MODELS`] come from the
/// table. Any other model name is probed with a one-item request and the
/// dimension is taken from the returned vector.
pub struct OpenCode {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    dimension: DimensionState,
}

impl OpenCode {
    pub fn new(api_key: &str) -> Self {
        Self::with_config(EmbedConfig::default().with_api_key(api_key))
    }

    pub fn with_config(cfg: EmbedConfig) -> Self {
        let model = if cfg.model.is_empty() {
            MODEL_OPENCODE_EMBED_V1.to_string()
        } else {
            cfg.model
        };
        Self {
            client: Client::new(),
            api_key: cfg.api_key,
            dimension: initial_dimension(&model),
            model,
            base_url: if cfg.base_url.is_empty() {
                OPENCODE_BASE_URL.to_string()
            } else {
                cfg.base_url
            },
        }
    }

    /// All models with a known output dimension.
    pub fn list_supported_models() -> BTreeMap<&'static str, ModelDescriptor> {
        models::supported_models()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dimension_state(&self) -> DimensionState {
        self.dimension
    }

    /// Switch to another model and resolve its dimension.
    ///
    /// Known models resolve from the table without I/O; other names cost
    /// one probe request.
    pub async fn set_model(&mut self, model: &str) -> Result<(), EmbedError> {
        self.model = model.to_string();
        self.dimension = initial_dimension(model);
        self.resolve_dimension().await.map(|_| ())
    }

    /// Bring the dimension state up to date before a request.
    async fn resolve_dimension(&mut self) -> Result<usize, EmbedError> {
        if let Some(desc) = models::lookup(&self.model) {
            self.dimension = DimensionState::Resolved(desc.dimension);
            return Ok(desc.dimension);
        }
        if let DimensionState::Resolved(d) = self.dimension {
            return Ok(d);
        }
        self.probe(PROBE_TEXT).await
    }

    async fn probe(&mut self, sample_text: &str) -> Result<usize, EmbedError> {
        let text = self.preprocess_text(sample_text);
        let vector = self
            .call_single(&text)
            .await
            .map_err(|e| EmbedError::request(Operation::DetectDimension, &self.model, e))?;
        debug!("probed model {}: dimension={}", self.model, vector.len());
        self.observe(vector.len());
        Ok(vector.len())
    }

    /// Record the length of a vector returned by the endpoint.
    fn observe(&mut self, dim: usize) {
        match models::lookup(&self.model) {
            Some(desc) => {
                if desc.dimension != dim {
                    warn!(
                        "model {} returned {}-dim vector, expected {}",
                        self.model, dim, desc.dimension
                    );
                }
                self.dimension = DimensionState::Resolved(desc.dimension);
            }
            None => self.dimension = DimensionState::Resolved(dim),
        }
    }

    async fn call_single(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        self.call_api(EmbeddingInput::Single(text))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidResponse("response contains no embedding data".into()))
    }

    async fn call_api(&self, input: EmbeddingInput<'_>) -> Result<Vec<Vec<f32>>, ApiError> {
        crate::openai_compat::call_embedding_api(
            &self.client,
            &self.api_key,
            &self.base_url,
            &self.model,
            input,
        )
        .await
    }
}

fn initial_dimension(model: &str) -> DimensionState {
    match models::lookup(model) {
        Some(desc) => DimensionState::Resolved(desc.dimension),
        None => DimensionState::Unresolved(OPENCODE_DEFAULT_DIM),
    }
}

#[async_trait::async_trait]
impl Embedder for OpenCode {
    async fn embed(&mut self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        self.resolve_dimension().await?;

        let text = self.preprocess_text(text);
        let vector = self
            .call_single(&text)
            .await
            .map_err(|e| EmbedError::request(Operation::Embed, &self.model, e))?;
        self.observe(vector.len());
        Ok(EmbeddingVector::new(vector))
    }

    async fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        if texts.is_empty() {
            return Err(EmbedError::EmptyInput);
        }
        self.resolve_dimension().await?;

        let texts = self.preprocess_texts(texts);
        let vecs = self
            .call_api(EmbeddingInput::Batch(&texts))
            .await
            .map_err(|e| EmbedError::request(Operation::EmbedBatch, &self.model, e))?;
        if let Some(first) = vecs.first() {
            self.observe(first.len());
        }
        debug!("embedded batch of {} with model {}", vecs.len(), self.model);
        Ok(vecs.into_iter().map(EmbeddingVector::new).collect())
    }

    async fn detect_dimension(&mut self, sample_text: Option<&str>) -> Result<usize, EmbedError> {
        if let Some(desc) = models::lookup(&self.model) {
            self.dimension = DimensionState::Resolved(desc.dimension);
            return Ok(desc.dimension);
        }
        self.probe(sample_text.unwrap_or(PROBE_TEXT)).await
    }

    fn dimension(&self) -> usize {
        if let Some(desc) = models::lookup(&self.model) {
            return desc.dimension;
        }
        match self.dimension {
            DimensionState::Resolved(d) => d,
            DimensionState::Unresolved(d) => {
                warn!(
                    "dimension for model {} is not detected yet, returning default {}; \
                     call detect_dimension() for an accurate value",
                    self.model, d
                );
                d
            }
        }
    }

    fn provider(&self) -> &str {
        PROVIDER_NAME
    }
}
