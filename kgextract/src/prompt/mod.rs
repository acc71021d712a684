//! Minimal prompting layer.
//!
//! A [`Signature`] declares what goes into and comes out of a model call;
//! [`Predict`] renders it (with optional few-shot demonstrations) into chat
//! messages, makes exactly one completion request and checks that the reply
//! carries every declared output field with the right shape.

pub mod parse;
mod predict;
mod signature;

pub use parse::extract_json;
pub use predict::{Demo, Predict, Prediction};
pub use signature::{Field, FieldKind, Signature};

use crate::lm::LmError;

/// Error type for prompt execution
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// A declared input field was not supplied
    #[error("Missing input field `{0}`")]
    MissingInput(String),

    /// The model call itself failed
    #[error("Model call failed: {0}")]
    Model(#[from] LmError),

    /// No JSON object could be recovered from the reply
    #[error("No JSON object found in model reply: {0}")]
    NoJson(String),

    /// The reply lacks a declared output field
    #[error("Model reply is missing output field `{0}`")]
    MissingOutput(String),

    /// An output field has the wrong shape
    #[error("Output field `{field}` is not a {expected}")]
    OutputType {
        /// Field name
        field: String,
        /// Expected type hint
        expected: &'static str,
    },
}

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;
