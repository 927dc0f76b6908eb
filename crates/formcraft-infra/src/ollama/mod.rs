//! Ollama text-generation client.
//!
//! Provides [`OllamaGenerator`], the [`TextGenerator`] used in production.
//! It talks to Ollama's non-streaming `/api/generate` endpoint.
//!
//! [`TextGenerator`]: formcraft_core::generation::client::TextGenerator

pub mod client;
pub mod types;

pub use client::OllamaGenerator;
