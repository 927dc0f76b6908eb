//! Generation pipeline types: stages, error taxonomy, model client errors.
//!
//! A pipeline run moves through
//! `Idle -> Prompting -> AwaitingModel -> Extracting -> Validating`
//! and ends in `Succeeded` or `Failed`. Every failure carries the narrowest
//! [`ErrorKind`] reached plus any raw diagnostic text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::FormSchema;

/// Outcome of a single pipeline invocation.
pub type PipelineResult = Result<FormSchema, GenerationError>;

/// Pipeline state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Prompting,
    AwaitingModel,
    Extracting,
    Validating,
    Persisting,
    Succeeded,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Prompting => "prompting",
            PipelineStage::AwaitingModel => "awaiting_model",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Validating => "validating",
            PipelineStage::Persisting => "persisting",
            PipelineStage::Succeeded => "succeeded",
            PipelineStage::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Failure taxonomy for form generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InputInvalid,
    ModelUnreachable,
    ModelTimeout,
    MalformedModelEnvelope,
    NoJsonFound,
    JsonSyntaxError,
    SchemaMismatch,
    PersistenceFailure,
}

impl ErrorKind {
    /// Machine-readable code, identical to the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InputInvalid => "INPUT_INVALID",
            ErrorKind::ModelUnreachable => "MODEL_UNREACHABLE",
            ErrorKind::ModelTimeout => "MODEL_TIMEOUT",
            ErrorKind::MalformedModelEnvelope => "MALFORMED_MODEL_ENVELOPE",
            ErrorKind::NoJsonFound => "NO_JSON_FOUND",
            ErrorKind::JsonSyntaxError => "JSON_SYNTAX_ERROR",
            ErrorKind::SchemaMismatch => "SCHEMA_MISMATCH",
            ErrorKind::PersistenceFailure => "PERSISTENCE_FAILURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors from the text-generation endpoint client.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// Transport failure or non-2xx HTTP status.
    #[error("model endpoint unreachable: {message}")]
    Unreachable {
        status: Option<u16>,
        message: String,
    },

    #[error("model did not answer within {after_secs}s")]
    Timeout { after_secs: u64 },

    /// 2xx response whose body lacks a string `response` field.
    #[error("malformed model envelope: {0}")]
    MalformedEnvelope(String),
}

/// A failed pipeline run.
///
/// `raw_text` holds the model output (or rejected document) whenever one
/// was produced; it is never discarded.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct GenerationError {
    pub kind: ErrorKind,
    /// Stage at which the run failed.
    pub stage: PipelineStage,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

impl GenerationError {
    pub fn new(kind: ErrorKind, stage: PipelineStage, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            message: message.into(),
            raw_text: None,
            validation_errors: Vec::new(),
        }
    }

    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = Some(raw_text.into());
        self
    }

    pub fn with_validation_errors(mut self, errors: Vec<String>) -> Self {
        self.validation_errors = errors;
        self
    }
}

impl From<ModelError> for GenerationError {
    fn from(err: ModelError) -> Self {
        let kind = match &err {
            ModelError::Unreachable { .. } => ErrorKind::ModelUnreachable,
            ModelError::Timeout { .. } => ErrorKind::ModelTimeout,
            ModelError::MalformedEnvelope(_) => ErrorKind::MalformedModelEnvelope,
        };
        GenerationError::new(kind, PipelineStage::AwaitingModel, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_serializes_as_code() {
        for kind in [
            ErrorKind::InputInvalid,
            ErrorKind::ModelTimeout,
            ErrorKind::JsonSyntaxError,
            ErrorKind::PersistenceFailure,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_model_error_maps_to_kind() {
        let err: GenerationError = ModelError::Unreachable {
            status: Some(500),
            message: "HTTP 500 Internal Server Error".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::ModelUnreachable);
        assert_eq!(err.stage, PipelineStage::AwaitingModel);
        assert!(err.message.contains("500"));

        let err: GenerationError = ModelError::Timeout { after_secs: 5 }.into();
        assert_eq!(err.kind, ErrorKind::ModelTimeout);

        let err: GenerationError = ModelError::MalformedEnvelope("no response".to_string()).into();
        assert_eq!(err.kind, ErrorKind::MalformedModelEnvelope);
    }

    #[test]
    fn test_generation_error_display_and_raw_text() {
        let err = GenerationError::new(
            ErrorKind::NoJsonFound,
            PipelineStage::Extracting,
            "no JSON object found in model output",
        )
        .with_raw_text("Sorry, I cannot help with that.");
        assert_eq!(
            err.to_string(),
            "NO_JSON_FOUND: no JSON object found in model output"
        );
        assert_eq!(err.raw_text.as_deref(), Some("Sorry, I cannot help with that."));
    }
}
