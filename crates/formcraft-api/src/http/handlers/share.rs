//! Public share-link handlers. No owner identity required.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use uuid::Uuid;

use formcraft_types::error::{FormError, SubmissionError};

use crate::http::error::AppError;
use crate::http::handlers::to_json;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/share/{share_id} - Schema of a published form.
///
/// Only the schema is exposed; owner and counters stay private.
pub async fn get_shared_form(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let share_id = Uuid::parse_str(&share_id).map_err(|_| AppError::Form(FormError::NotFound))?;

    let form = state.form_service.get_shared_form(&share_id).await?;

    let data = serde_json::json!({
        "share_id": form.share_id,
        "content": to_json(&form.content)?,
    });
    let resp = timer
        .success("Form retrieved", data)
        .with_link("submit", &format!("{}/submissions", form.share_path()));
    Ok(Json(resp))
}

/// POST /api/v1/share/{share_id}/submissions - Record answers for a published form.
pub async fn submit(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let share_id =
        Uuid::parse_str(&share_id).map_err(|_| AppError::Submission(SubmissionError::FormNotFound))?;
    let Json(answers) = payload?;

    let submission = state.submission_service.submit(&share_id, answers).await?;

    let data = serde_json::json!({
        "id": submission.id,
        "created_at": submission.created_at,
    });
    Ok(Json(timer.success("Submission recorded", data)))
}
