//! Error types.

use thiserror::Error;

/// The main error type for eduhub operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    /// Operation requires authentication but none was provided.
    #[error("Authentication required")]
    AuthRequired,

    /// Malformed input passed to an API method.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cache storage error.
    #[error("Cache error: {0}")]
    Cache(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Check if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::AuthRequired => true,
            Error::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

/// Result type alias for eduhub operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::api(404, "notification not found");
        assert_eq!(format!("{}", e), "API error [404]: notification not found");
    }

    #[test]
    fn test_retryable() {
        assert!(Error::api(503, "unavailable").is_retryable());
        assert!(Error::api(429, "throttled").is_retryable());
        assert!(!Error::api(404, "missing").is_retryable());
        assert!(!Error::validation("empty content").is_retryable());
    }

    #[test]
    fn test_auth_error() {
        assert!(Error::AuthRequired.is_auth_error());
        assert!(Error::api(401, "token expired").is_auth_error());
        assert!(!Error::api(500, "oops").is_auth_error());
    }
}
