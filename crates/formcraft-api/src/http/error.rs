//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use formcraft_types::error::{FormError, SubmissionError};
use formcraft_types::generation::{ErrorKind, GenerationError};

use crate::http::response::{ApiMeta, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Form lifecycle errors.
    Form(FormError),
    /// Submission intake errors.
    Submission(SubmissionError),
    /// Failed generation pipeline run.
    Generation(GenerationError),
    /// Missing owner identity.
    Unauthorized(String),
    /// Malformed request input.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<FormError> for AppError {
    fn from(e: FormError) -> Self {
        AppError::Form(e)
    }
}

impl From<SubmissionError> for AppError {
    fn from(e: SubmissionError) -> Self {
        AppError::Submission(e)
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Form(FormError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Form(FormError::Forbidden) => StatusCode::FORBIDDEN,
            AppError::Form(FormError::NotPublished) => StatusCode::CONFLICT,
            AppError::Form(FormError::InvalidSchema(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Form(FormError::StorageError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Submission(SubmissionError::FormNotFound) => StatusCode::NOT_FOUND,
            AppError::Submission(SubmissionError::FormNotPublished) => StatusCode::CONFLICT,
            AppError::Submission(SubmissionError::InvalidAnswers(_))
            | AppError::Submission(SubmissionError::MissingRequired(_)) => StatusCode::BAD_REQUEST,
            AppError::Submission(SubmissionError::StorageError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Generation(e) => generation_status(e.kind),
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Form(FormError::NotFound) => "FORM_NOT_FOUND",
            AppError::Form(FormError::Forbidden) => "FORBIDDEN",
            AppError::Form(FormError::NotPublished) => "FORM_NOT_PUBLISHED",
            AppError::Form(FormError::InvalidSchema(_)) => ErrorKind::SchemaMismatch.code(),
            AppError::Form(FormError::StorageError(_)) => "STORAGE_ERROR",
            AppError::Submission(SubmissionError::FormNotFound) => "FORM_NOT_FOUND",
            AppError::Submission(SubmissionError::FormNotPublished) => "FORM_NOT_PUBLISHED",
            AppError::Submission(SubmissionError::InvalidAnswers(_)) => "VALIDATION_ERROR",
            AppError::Submission(SubmissionError::MissingRequired(_)) => "MISSING_REQUIRED_FIELDS",
            AppError::Submission(SubmissionError::StorageError(_)) => "STORAGE_ERROR",
            AppError::Generation(e) => e.kind.code(),
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Form(FormError::NotFound) => "Form not found".to_string(),
            AppError::Form(e) => e.to_string(),
            AppError::Submission(e) => e.to_string(),
            AppError::Generation(e) => e.message.clone(),
            AppError::Unauthorized(msg) | AppError::Validation(msg) | AppError::Internal(msg) => {
                msg.clone()
            }
        }
    }

    /// Split into `(details, rawResponse)` for the envelope.
    fn into_diagnostics(self) -> (Vec<String>, Option<String>) {
        match self {
            AppError::Generation(e) => (e.validation_errors, e.raw_text),
            AppError::Submission(SubmissionError::MissingRequired(labels)) => (labels, None),
            _ => (Vec::new(), None),
        }
    }
}

fn generation_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InputInvalid => StatusCode::BAD_REQUEST,
        ErrorKind::ModelUnreachable | ErrorKind::MalformedModelEnvelope => StatusCode::BAD_GATEWAY,
        ErrorKind::ModelTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::NoJsonFound | ErrorKind::JsonSyntaxError | ErrorKind::SchemaMismatch => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, status = status.as_u16(), "{message}");
        }

        let (details, raw_response) = self.into_diagnostics();
        let body = ApiResponse::failure(
            code,
            message,
            details,
            raw_response,
            ApiMeta::new(uuid::Uuid::now_v7().to_string(), 0),
        );

        let body = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"success":false,"message":"Failed to serialize response","error":{"code":"SERIALIZATION_ERROR","details":[]}}"#.to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft_types::generation::PipelineStage;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn generation_kinds_map_to_status_codes() {
        let cases = [
            (ErrorKind::InputInvalid, StatusCode::BAD_REQUEST),
            (ErrorKind::ModelUnreachable, StatusCode::BAD_GATEWAY),
            (ErrorKind::MalformedModelEnvelope, StatusCode::BAD_GATEWAY),
            (ErrorKind::ModelTimeout, StatusCode::GATEWAY_TIMEOUT),
            (ErrorKind::NoJsonFound, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorKind::JsonSyntaxError, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorKind::SchemaMismatch, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorKind::PersistenceFailure, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, expected) in cases {
            let err = AppError::from(GenerationError::new(kind, PipelineStage::Failed, "x"));
            assert_eq!(err.status(), expected, "{kind}");
            assert_eq!(err.code(), kind.code());
        }
    }

    #[test]
    fn form_and_submission_errors_map_to_status_codes() {
        assert_eq!(AppError::from(FormError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(FormError::Forbidden).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::from(FormError::NotPublished).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(SubmissionError::MissingRequired(vec!["Email".into()])).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("no owner".into()).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn generation_failure_body_keeps_raw_response() {
        let err = GenerationError::new(
            ErrorKind::JsonSyntaxError,
            PipelineStage::Extracting,
            "model output is not valid JSON",
        )
        .with_raw_text("{\"title\":");

        let (status, body) = body_json(AppError::from(err)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "model output is not valid JSON");
        assert_eq!(body["error"]["code"], "JSON_SYNTAX_ERROR");
        assert_eq!(body["rawResponse"], "{\"title\":");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn missing_required_lists_labels_as_details() {
        let err = SubmissionError::MissingRequired(vec!["Email".into(), "Name".into()]);
        let (status, body) = body_json(AppError::from(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELDS");
        assert_eq!(body["error"]["details"], serde_json::json!(["Email", "Name"]));
        assert!(body.get("rawResponse").is_none());
    }
}
