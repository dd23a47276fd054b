use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// The `input` field: one string for single calls, an array for batches.
#[derive(Serialize, Clone, Copy)]
#[serde(untagged)]
pub(crate) enum EmbeddingInput<'a> {
    Single(&'a str),
    Batch(&'a [String]),
}

impl EmbeddingInput<'_> {
    fn len(&self) -> usize {
        match self {
            EmbeddingInput::Single(_) => 1,
            EmbeddingInput::Batch(texts) => texts.len(),
        }
    }
}

/// OpenAI-compatible embedding request body.
#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: EmbeddingInput<'a>,
}

/// OpenAI-compatible embedding response.
#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Option<Vec<EmbeddingData>>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    embedding: Option<Vec<f64>>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

/// Call an OpenAI-compatible embedding API endpoint.
///
/// Returns exactly one vector per input, in input order, or fails as a whole.
pub(crate) async fn call_embedding_api(
    client: &Client,
    api_key: &str,
    base_url: &str,
    model: &str,
    input: EmbeddingInput<'_>,
) -> Result<Vec<Vec<f32>>, ApiError> {
    let url = format!("{}/embeddings", base_url.trim_end_matches('/'));
    let expected = input.len();
    let body = EmbeddingRequest { model, input };

    debug!("POST {} (model={}, inputs={})", url, model, expected);

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), text));
    }

    let parsed: EmbeddingResponse = serde_json::from_str(&text)
        .map_err(|e| ApiError::InvalidResponse(format!("malformed body: {e}")))?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "embeddings usage: model={}, prompt_tokens={}, total_tokens={}",
            parsed.model.as_deref().unwrap_or(model),
            usage.prompt_tokens,
            usage.total_tokens
        );
    }

    collect_vectors(parsed.data.unwrap_or_default(), expected)
}

/// Order response items by their `index` (the API may return them out of
/// order) and check that every input got exactly one embedding.
fn collect_vectors(data: Vec<EmbeddingData>, expected: usize) -> Result<Vec<Vec<f32>>, ApiError> {
    if data.is_empty() {
        return Err(ApiError::InvalidResponse(
            "response contains no embedding data".to_string(),
        ));
    }
    if data.len() != expected {
        return Err(ApiError::InvalidResponse(format!(
            "expected {expected} embeddings, got {}",
            data.len()
        )));
    }

    let mut vecs: Vec<Option<Vec<f32>>> = vec![None; expected];
    for (pos, item) in data.into_iter().enumerate() {
        let embedding = item.embedding.ok_or_else(|| {
            ApiError::InvalidResponse(format!("missing embedding at position {pos}"))
        })?;
        let slot = item.index.unwrap_or(pos);
        if slot >= expected {
            return Err(ApiError::InvalidResponse(format!(
                "unexpected embedding index {slot} for batch size {expected}"
            )));
        }
        if vecs[slot].is_some() {
            return Err(ApiError::InvalidResponse(format!(
                "duplicate embedding index {slot}"
            )));
        }
        vecs[slot] = Some(embedding.iter().map(|&v| v as f32).collect());
    }

    vecs.into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.ok_or_else(|| ApiError::InvalidResponse(format!("missing embedding for index {i}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: Option<usize>, embedding: Option<Vec<f64>>) -> EmbeddingData {
        EmbeddingData { index, embedding }
    }

    #[test]
    fn test_request_body_single_and_batch() {
        let single = EmbeddingRequest {
            model: "m",
            input: EmbeddingInput::Single("hello"),
        };
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            serde_json::json!({"model": "m", "input": "hello"})
        );

        let texts = vec!["a".to_string(), "b".to_string()];
        let batch = EmbeddingRequest {
            model: "m",
            input: EmbeddingInput::Batch(&texts),
        };
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            serde_json::json!({"model": "m", "input": ["a", "b"]})
        );
    }

    #[test]
    fn test_collect_reorders_by_index() {
        let vecs = collect_vectors(
            vec![
                item(Some(1), Some(vec![2.0])),
                item(Some(0), Some(vec![1.0])),
            ],
            2,
        )
        .unwrap();
        assert_eq!(vecs, vec![vec![1.0f32], vec![2.0f32]]);
    }

    #[test]
    fn test_collect_without_index_uses_position() {
        let vecs = collect_vectors(vec![item(None, Some(vec![1.0, 2.0]))], 1).unwrap();
        assert_eq!(vecs, vec![vec![1.0f32, 2.0]]);
    }

    #[test]
    fn test_collect_rejects_empty() {
        let err = collect_vectors(vec![], 1).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_collect_rejects_missing_embedding() {
        let err = collect_vectors(vec![item(Some(0), None)], 1).unwrap_err();
        assert!(err.to_string().contains("missing embedding"));
    }

    #[test]
    fn test_collect_rejects_count_mismatch() {
        let err = collect_vectors(vec![item(Some(0), Some(vec![1.0]))], 3).unwrap_err();
        assert!(err.to_string().contains("expected 3 embeddings, got 1"));
    }

    #[test]
    fn test_collect_rejects_bad_indices() {
        let err = collect_vectors(
            vec![item(Some(0), Some(vec![1.0])), item(Some(5), Some(vec![1.0]))],
            2,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unexpected embedding index 5"));

        let err = collect_vectors(
            vec![item(Some(0), Some(vec![1.0])), item(Some(0), Some(vec![1.0]))],
            2,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate embedding index 0"));
    }
}
