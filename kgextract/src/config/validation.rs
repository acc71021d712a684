//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &KgConfig) -> Result<(), ConfigError> {
    validate_llm_config(&config.llm)?;
    validate_extraction_config(&config.extraction)?;

    Ok(())
}

/// Validate language model configuration.
fn validate_llm_config(config: &LanguageModelConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Model name cannot be empty".to_string(),
        ));
    }

    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "Base URL must start with http:// or https://, got '{}'",
            config.base_url
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeout_secs must be greater than 0".to_string(),
        ));
    }

    if let Some(temperature) = config.temperature
        && !(0.0..=2.0).contains(&temperature)
    {
        return Err(ConfigError::ValidationError(format!(
            "Temperature must be between 0.0 and 2.0, got {}",
            temperature
        )));
    }

    if config.max_tokens == Some(0) {
        return Err(ConfigError::ValidationError(
            "max_tokens must be greater than 0 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validate extraction defaults.
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    let blank = |types: &[String]| types.iter().any(|t| t.trim().is_empty());

    if blank(&config.node_types) {
        return Err(ConfigError::ValidationError(
            "node_types cannot contain blank entries".to_string(),
        ));
    }
    if blank(&config.edge_types) {
        return Err(ConfigError::ValidationError(
            "edge_types cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}
