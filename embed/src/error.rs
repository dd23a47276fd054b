use std::fmt;

use thiserror::Error;

/// The adapter operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Embed,
    EmbedBatch,
    DetectDimension,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Embed => "generate embedding",
            Operation::EmbedBatch => "generate batch embeddings",
            Operation::DetectDimension => "detect dimension",
        })
    }
}

/// Failure of a single call to the embeddings endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed (HTTP {status}), check the API key: {body}")]
    Unauthorized { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized { status, body },
            _ => ApiError::Status { status, body },
        }
    }
}

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("embed: empty input")]
    EmptyInput,

    #[error("embed: failed to {op} with model {model}: {source}")]
    Request {
        op: Operation,
        model: String,
        #[source]
        source: ApiError,
    },
}

impl EmbedError {
    pub(crate) fn request(op: Operation, model: &str, source: ApiError) -> Self {
        EmbedError::Request {
            op,
            model: model.to_string(),
            source,
        }
    }

    /// Returns the HTTP status code if the endpoint answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            EmbedError::Request {
                source: ApiError::Status { status, .. } | ApiError::Unauthorized { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the endpoint rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            EmbedError::Request {
                source: ApiError::Unauthorized { .. },
                ..
            }
        )
    }

    /// Returns true if the endpoint answered with a body that does not
    /// match the expected embeddings shape.
    pub fn is_invalid_response(&self) -> bool {
        matches!(
            self,
            EmbedError::Request {
                source: ApiError::InvalidResponse(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ApiError::from_status(401, String::new()),
            ApiError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            ApiError::from_status(403, String::new()),
            ApiError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            ApiError::from_status(500, String::new()),
            ApiError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_request_message_names_operation_and_model() {
        let err = EmbedError::request(
            Operation::DetectDimension,
            "my-model",
            ApiError::from_status(502, "bad gateway".into()),
        );
        let msg = err.to_string();
        assert!(msg.contains("detect dimension"));
        assert!(msg.contains("my-model"));
        assert!(msg.contains("502"));
        assert!(msg.contains("bad gateway"));
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_auth());
    }

    #[test]
    fn test_auth_error() {
        let err = EmbedError::request(
            Operation::Embed,
            "opencode-embed-v1",
            ApiError::from_status(401, "invalid key".into()),
        );
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("check the API key"));
    }

    #[test]
    fn test_empty_input_has_no_status() {
        assert_eq!(EmbedError::EmptyInput.status(), None);
        assert!(!EmbedError::EmptyInput.is_invalid_response());
    }
}
