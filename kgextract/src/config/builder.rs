//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};

/// Builder for creating KgConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: KgConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: KgConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: KgConfig) -> Self {
        Self { config }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.llm.model = model.into();
        self
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.llm.base_url = url.into();
        self
    }

    /// Set the API key directly.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llm.api_key = Some(key.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.llm.temperature = Some(temperature);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.config.llm.timeout_secs = secs;
        self
    }

    /// Use a local OpenAI-compatible server (no API key).
    pub fn with_local_model(mut self, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        self.config.llm.base_url = base_url.into();
        self.config.llm.model = model.into();
        self.config.llm.api_key = None;
        self.config.llm.api_key_env = None;
        self
    }

    /// Treat input as a conversation by default.
    pub fn with_conversation(mut self, is_conversation: bool) -> Self {
        self.config.extraction.is_conversation = is_conversation;
        self
    }

    /// Set the allowed entity types.
    pub fn with_node_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extraction.node_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the allowed predicate types.
    pub fn with_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extraction.edge_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether entities and predicates must carry a type.
    pub fn require_types(mut self, require_node_type: bool, require_edge_type: bool) -> Self {
        self.config.extraction.require_node_type = require_node_type;
        self.config.extraction.require_edge_type = require_edge_type;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Create a configuration for development against a local Ollama server.
    ///
    /// - `llama3.1` at `http://localhost:11434/v1`
    /// - Debug-level logging
    pub fn development() -> Self {
        Self::new()
            .with_local_model("http://localhost:11434/v1", "llama3.1")
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for automated testing.
    ///
    /// Like `development()`, with compact warn-level logging and a short timeout.
    pub fn testing() -> Self {
        Self::development()
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
            .with_timeout_secs(10)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<KgConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
