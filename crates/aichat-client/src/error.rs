//! Error types for AI Help Center requests.

use aichat_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when talking to the AI Help Center service.
#[derive(Error, Debug)]
pub enum AiChatError {
    /// The client could not be constructed from its configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required argument was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// An argument had the wrong shape.
    #[error("{0}")]
    Type(String),

    /// The request never produced a response (connection, DNS, timeout).
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{context} (status {status}): {detail}")]
    Http {
        context: String,
        status: u16,
        detail: String,
    },

    /// The service answered successfully but the body was not JSON.
    #[error("Response did not contain valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// The request payload could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl AiChatError {
    /// Status code of an HTTP failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            AiChatError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request failed because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AiChatError::Transport { source, .. } if source.is_timeout())
    }

    /// Whether the request failed because the service could not be reached.
    pub fn is_connect(&self) -> bool {
        matches!(self, AiChatError::Transport { source, .. } if source.is_connect())
    }
}

impl From<aichat_core::Error> for AiChatError {
    fn from(err: aichat_core::Error) -> Self {
        match err {
            aichat_core::Error::Validation(message) => AiChatError::Validation(message),
            aichat_core::Error::Type(message) => AiChatError::Type(message),
        }
    }
}

/// Result type for AI Help Center operations.
pub type AiChatResult<T> = Result<T, AiChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = AiChatError::Http {
            context: "Failed to submit ask request".to_string(),
            status: 500,
            detail: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to submit ask request (status 500): boom"
        );
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_core_errors_keep_their_category() {
        let err: AiChatError = aichat_core::Error::Type("bad".to_string()).into();
        assert!(matches!(err, AiChatError::Type(ref m) if m == "bad"));

        let err: AiChatError = aichat_core::Error::Validation("empty".to_string()).into();
        assert!(matches!(err, AiChatError::Validation(_)));
    }
}
