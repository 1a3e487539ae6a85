//! Error types for the API client

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API (the `detail` field when present)
        message: String,
    },
}

/// Error body returned by the backend: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an API response error from a raw response body
    ///
    /// Uses the backend's `detail` field when the body carries one, otherwise
    /// the raw text.
    pub fn api_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = extract_detail(&body).unwrap_or(body);
        Self::ApiResponse { status, message }
    }

    /// Message suitable for showing to the user as-is.
    ///
    /// For backend rejections this is the backend's own message, without the
    /// status prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiResponse { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a backend rejection, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the backend rejected the credentials (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

/// Pull the `detail` message out of a backend error body.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_uses_detail() {
        let err = ApiError::api_response(400, r#"{"detail":"Project ID 9 does not exist"}"#);
        assert_eq!(err.user_message(), "Project ID 9 does not exist");
        assert_eq!(err.to_string(), "API error (400): Project ID 9 does not exist");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_api_response_falls_back_to_body() {
        let err = ApiError::api_response(502, "Bad Gateway");
        assert_eq!(err.user_message(), "Bad Gateway");
        assert!(err.is_server_error());
    }

    #[test]
    fn test_structured_detail() {
        let err = ApiError::api_response(422, r#"{"detail":[{"msg":"field required"}]}"#);
        assert!(err.user_message().contains("field required"));
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::api_response(401, r#"{"detail":"Invalid credentials"}"#).is_unauthorized());
        assert!(!ApiError::config("x").is_unauthorized());
    }
}
