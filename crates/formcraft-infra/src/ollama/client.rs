//! OllamaGenerator -- concrete [`TextGenerator`] backed by Ollama.
//!
//! Sends `{model, prompt, stream: false}` to the configured generate URL
//! and returns the envelope's `response` text untouched. Exactly one HTTP
//! request is made per call; failures are reported, never retried.

use std::time::Duration;

use formcraft_core::generation::client::TextGenerator;
use formcraft_types::config::ModelConfig;
use formcraft_types::generation::ModelError;

use super::types::{GenerateRequest, GenerateResponse};

/// Ollama text generator.
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl OllamaGenerator {
    /// Build a generator from model settings.
    ///
    /// The configured timeout bounds the whole request, body included.
    pub fn new(config: &ModelConfig) -> Result<Self, reqwest::Error> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.name.clone(),
            timeout,
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout {
                after_secs: self.timeout.as_secs(),
            }
        } else {
            ModelError::Unreachable {
                status: None,
                message: format!("HTTP request failed: {err}"),
            }
        }
    }
}

impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ModelError::Unreachable {
                status: Some(status.as_u16()),
                message: format!("HTTP {status}: {error_body}"),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let envelope: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            ModelError::MalformedEnvelope(format!("expected a string `response` field: {e}"))
        })?;

        tracing::debug!(
            model = %self.model,
            bytes = envelope.response.len(),
            done = ?envelope.done,
            "ollama generation complete"
        );

        Ok(envelope.response)
    }
}
