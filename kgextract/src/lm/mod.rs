//! Language model seam.
//!
//! Extraction never talks to a provider directly; it goes through the
//! [`LanguageModel`] trait so callers can plug in any chat-completion backend
//! (or a scripted model in tests).

pub mod error;
mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LanguageModelConfig;

pub use error::{LmError, Result};
pub use openai::OpenAiChatModel;

/// Role of a chat message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters for a completion request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionParams {
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
}

/// Trait for chat-completion language models.
#[async_trait]
pub trait LanguageModel: Send + Sync + std::fmt::Debug {
    /// Complete a conversation, returning the assistant's reply text.
    async fn complete(&self, messages: &[Message], params: &CompletionParams) -> Result<String>;

    /// Get the name of this model for identification purposes.
    fn name(&self) -> &str;
}

/// Build the configured language model.
pub fn build_model(config: &LanguageModelConfig) -> Result<Box<dyn LanguageModel>> {
    let model = OpenAiChatModel::from_config(config)?;
    Ok(Box::new(model))
}
