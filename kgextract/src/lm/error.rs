//! Error types for language model calls

use std::fmt;
use thiserror::Error;

/// Error type for language model operations
#[derive(Debug, Error)]
pub enum LmError {
    /// Transport-level failure talking to the model endpoint
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status
    #[error("Model endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the endpoint
        body: String,
    },

    /// The endpoint answered but the payload did not have the expected shape
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// Error related to model configuration
    #[error("Model configuration error: {0}")]
    Configuration(String),

    /// Other unexpected errors
    #[error("{0}")]
    Other(String),
}

impl LmError {
    /// Create a new HTTP error
    pub fn http(msg: impl fmt::Display) -> Self {
        Self::Http(msg.to_string())
    }

    /// Create a new invalid response error
    pub fn invalid_response(msg: impl fmt::Display) -> Self {
        Self::InvalidResponse(msg.to_string())
    }

    /// Create a new configuration error
    pub fn configuration(msg: impl fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }
}

impl From<reqwest::Error> for LmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type for language model operations
pub type Result<T> = std::result::Result<T, LmError>;
