//! TextGenerator trait definition.
//!
//! The port through which the pipeline reaches a text-generation model.
//! Implementations live in formcraft-infra (e.g., `OllamaGenerator`).

use formcraft_types::generation::ModelError;

/// A single-shot, non-streaming text-generation backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations must bound their own wait time and must not retry:
/// repeated model calls are not idempotent.
pub trait TextGenerator: Send + Sync {
    /// Backend name for tracing (e.g., "ollama").
    fn name(&self) -> &str;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Send `prompt` and return the raw generated text, unmodified.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ModelError>> + Send;
}
