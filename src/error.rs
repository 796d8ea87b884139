//! Error types for the Tourbook client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the Tourbook API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend rejected our credentials. The gateway has already cleared
    /// stored credentials and the response cache before returning this.
    #[error("Authentication failed")]
    Unauthorized,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned a non-success status code
    #[error("API error (status {status}): {message}")]
    Request { status: u16, message: String },

    /// Network-level failure (no response at all)
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Failed to parse a JSON response body
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request could not be built (bad header value, bad mime type, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Credential persistence failed
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while persisting credentials.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage directory could not be determined
    #[error("No storage directory available")]
    NoStorageDir,

    /// Reading or writing the credential file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Credential file contents could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
