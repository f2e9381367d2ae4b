//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket transport failed.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Server returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail from the server, or the raw response body.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected locally before a request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Stream error.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl Error {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound(_) => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_)) || matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is a client error (4xx status).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// FastAPI-style error body (`{"detail": ...}`).
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// Flatten `detail` into a message; validation errors arrive as arrays.
    pub(crate) fn into_message(self) -> String {
        match self.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        let err = Error::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(err.is_rate_limited());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), Some(429));

        let err = Error::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_not_found() {
        assert!(Error::NotFound("entry 1".to_string()).is_not_found());
        assert!(Error::NotFound("entry 1".to_string()).is_client_error());
        assert!(!Error::InvalidInput("x".to_string()).is_not_found());
        assert_eq!(Error::InvalidInput("x".to_string()).status(), None);
    }

    #[test]
    fn test_error_detail_flattening() {
        let body: ErrorResponse = serde_json::from_str(r#"{"detail": "Table missing"}"#).unwrap();
        assert_eq!(body.into_message(), "Table missing");

        let body: ErrorResponse =
            serde_json::from_str(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#)
                .unwrap();
        assert!(body.into_message().contains("field required"));
    }

    #[test]
    fn test_display() {
        let err = Error::Api {
            status: 400,
            message: "Bad request".to_string(),
        };
        assert_eq!(err.to_string(), "API error (400): Bad request");
    }
}
