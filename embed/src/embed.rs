use crate::error::EmbedError;

/// Default token budget used to bound input length.
pub const DEFAULT_MAX_TOKENS: usize = 8192;

/// Rough characters-per-token ratio used for truncation.
const CHARS_PER_TOKEN: usize = 4;

/// A dense embedding together with its length.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector {
    pub vector: Vec<f32>,
    pub dimension: usize,
}

impl EmbeddingVector {
    pub fn new(vector: Vec<f32>) -> Self {
        let dimension = vector.len();
        Self { vector, dimension }
    }
}

/// Embedder converts text into dense float32 vectors.
///
/// Resolving the output dimension may update the embedder, so the
/// operations take `&mut self`. Share one instance across tasks only
/// behind a lock, or give each caller its own.
#[async_trait::async_trait]
pub trait Embedder: Send {
    /// Return the embedding vector for a single text.
    async fn embed(&mut self, text: &str) -> Result<EmbeddingVector, EmbedError>;

    /// Return one embedding vector per input text, in input order.
    async fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, EmbedError>;

    /// Determine the output dimension, calling the endpoint if the model
    /// is not known in advance.
    async fn detect_dimension(&mut self, sample_text: Option<&str>) -> Result<usize, EmbedError>;

    /// Return the dimensionality of the output vectors without any I/O.
    fn dimension(&self) -> usize;

    /// Return the provider name.
    fn provider(&self) -> &str;

    /// Token budget for a single input.
    fn max_tokens(&self) -> usize {
        DEFAULT_MAX_TOKENS
    }

    /// Normalize a text before it is sent: empty input becomes a single
    /// space and long input is cut to `max_tokens() * 4` characters.
    fn preprocess_text(&self, text: &str) -> String {
        if text.is_empty() {
            return " ".to_string();
        }
        let max_chars = self.max_tokens() * CHARS_PER_TOKEN;
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        }
    }

    fn preprocess_texts(&self, texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| self.preprocess_text(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait::async_trait]
    impl Embedder for Fixed {
        async fn embed(&mut self, _text: &str) -> Result<EmbeddingVector, EmbedError> {
            Ok(EmbeddingVector::new(vec![0.0; 2]))
        }

        async fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, EmbedError> {
            Ok(texts.iter().map(|_| EmbeddingVector::new(vec![0.0; 2])).collect())
        }

        async fn detect_dimension(&mut self, _sample_text: Option<&str>) -> Result<usize, EmbedError> {
            Ok(2)
        }

        fn dimension(&self) -> usize {
            2
        }

        fn provider(&self) -> &str {
            "fixed"
        }

        fn max_tokens(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_vector_dimension_matches_length() {
        let v = EmbeddingVector::new(vec![0.1, 0.2, 0.3]);
        assert_eq!(v.dimension, 3);
        assert_eq!(v.dimension, v.vector.len());
    }

    #[test]
    fn test_preprocess_empty() {
        assert_eq!(Fixed.preprocess_text(""), " ");
    }

    #[test]
    fn test_preprocess_truncates_on_char_boundary() {
        // max_tokens = 2 -> 8 chars
        assert_eq!(Fixed.preprocess_text("abcdefghij"), "abcdefgh");
        assert_eq!(Fixed.preprocess_text("短文本短文本短文本"), "短文本短文本短文");
        assert_eq!(Fixed.preprocess_text("short"), "short");
    }

    #[test]
    fn test_preprocess_texts() {
        assert_eq!(
            Fixed.preprocess_texts(&["", "a"]),
            vec![" ".to_string(), "a".to_string()]
        );
    }
}
