//! Ollama `/api/generate` wire types.
//!
//! Only the fields Formcraft sends or reads are modelled; everything else
//! in the response envelope (timings, context, ...) is ignored.

use serde::{Deserialize, Serialize};

/// Request body for a single, non-streaming generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

/// Response envelope. `response` carries the generated text.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub done: Option<bool>,
}
