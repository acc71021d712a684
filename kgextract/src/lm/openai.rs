//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument};

use super::{CompletionParams, LanguageModel, LmError, Message, Result};
use crate::config::LanguageModelConfig;

/// Chat model reached through an OpenAI-compatible `/chat/completions` endpoint.
///
/// Works against OpenAI itself as well as local servers that speak the same
/// protocol (Ollama, vLLM, llama.cpp server).
#[derive(Debug, Clone)]
pub struct OpenAiChatModel {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiChatModel {
    /// Create a client for `model` at `base_url`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LmError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Create a client from configuration.
    ///
    /// The API key is taken from `api_key` when set, otherwise from the
    /// environment variable named by `api_key_env`. A missing key is not an
    /// error: local endpoints usually don't need one.
    pub fn from_config(config: &LanguageModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LmError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = config.api_key.clone().or_else(|| {
            config
                .api_key_env
                .as_deref()
                .and_then(|var| std::env::var(var).ok())
                .filter(|key| !key.is_empty())
        });

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the default sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Full URL of the completion endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build the JSON request body. Per-call params win over client defaults.
    pub fn request_body(&self, messages: &[Message], params: &CompletionParams) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temperature) = params.temperature.or(self.temperature) {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = params.max_tokens.or(self.max_tokens) {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}

/// Pull the assistant text out of a chat completion response.
pub(crate) fn completion_text(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| LmError::invalid_response("missing choices[0].message.content"))
}

#[async_trait]
impl LanguageModel for OpenAiChatModel {
    #[instrument(skip(self, messages, params), fields(model = %self.model))]
    async fn complete(&self, messages: &[Message], params: &CompletionParams) -> Result<String> {
        debug!("Sending chat completion request with {} messages", messages.len());

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&self.request_body(messages, params));

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| LmError::invalid_response(format!("Failed to parse response: {}", e)))?;

        completion_text(&payload)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> OpenAiChatModel {
        OpenAiChatModel::new("http://localhost:11434/v1/", "llama3.1").unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            model().endpoint(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_params_override_defaults() {
        let model = model().with_temperature(0.7);
        let messages = vec![Message::system("sys"), Message::user("hi")];

        let body = model.request_body(&messages, &CompletionParams::default());
        assert_eq!(body["model"], "llama3.1");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(body.get("max_tokens").is_none());

        let params = CompletionParams {
            temperature: Some(0.0),
            max_tokens: Some(256),
        };
        let body = model.request_body(&messages, &params);
        assert_eq!(body["temperature"].as_f64().unwrap(), 0.0);
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_completion_text() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"entities\": []}"}}]
        });
        assert_eq!(completion_text(&response).unwrap(), "{\"entities\": []}");

        let err = completion_text(&json!({"choices": []})).unwrap_err();
        assert!(matches!(err, LmError::InvalidResponse(_)));
    }

    #[test]
    fn test_from_config_prefers_inline_key() {
        let config = LanguageModelConfig {
            api_key: Some("sk-inline".to_string()),
            api_key_env: Some("KGEXTRACT_TEST_UNSET_KEY".to_string()),
            ..LanguageModelConfig::default()
        };
        let model = OpenAiChatModel::from_config(&config).unwrap();
        assert_eq!(model.api_key.as_deref(), Some("sk-inline"));
        assert_eq!(model.name(), config.model);
    }
}
