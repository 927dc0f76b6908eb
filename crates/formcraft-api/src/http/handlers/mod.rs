//! HTTP request handlers for the REST API.

pub mod form;
pub mod health;
pub mod share;
pub mod stats;

use formcraft_types::error::FormError;
use formcraft_types::form::FormId;

use crate::http::error::AppError;

/// Parse a form id path segment. Unparseable ids are simply unknown forms.
pub(crate) fn parse_form_id(raw: &str) -> Result<FormId, AppError> {
    raw.parse::<FormId>()
        .map_err(|_| AppError::Form(FormError::NotFound))
}

/// Serialize a payload for the envelope.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(format!("serialization failed: {e}")))
}
