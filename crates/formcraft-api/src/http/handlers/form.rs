//! Form handlers: generation and the owner-scoped lifecycle.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use formcraft_types::form::Form;
use formcraft_types::generation::{ErrorKind, GenerationError, PipelineStage};

use crate::http::error::AppError;
use crate::http::extractors::owner::Owner;
use crate::http::extractors::query::{FormListQuery, PageQuery};
use crate::http::handlers::{parse_form_id, to_json};
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Body of `POST /forms/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateFormRequest {
    #[serde(default)]
    pub description: Option<String>,
}

fn form_response(
    timer: &RequestTimer,
    message: &str,
    form: &Form,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let resp = timer
        .success(message, to_json(form)?)
        .with_link("self", &format!("/api/v1/forms/{}", form.id))
        .with_link("submissions", &format!("/api/v1/forms/{}/submissions", form.id))
        .with_link("share", &form.share_path());
    Ok(Json(resp))
}

/// POST /api/v1/forms/generate - Generate a form from a description and save it.
pub async fn generate_form(
    State(state): State<AppState>,
    Owner(owner): Owner,
    payload: Result<Json<GenerateFormRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();

    let Json(body) = payload.map_err(|e| {
        GenerationError::new(
            ErrorKind::InputInvalid,
            PipelineStage::Idle,
            format!("request body must be {{\"description\": string}}: {}", e.body_text()),
        )
    })?;

    let form = state
        .form_service
        .generate_form(&owner, body.description.as_deref())
        .await?;

    form_response(&timer, "Form generated successfully", &form)
}

/// GET /api/v1/forms - List the owner's forms, newest first.
pub async fn list_forms(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Query(query): Query<FormListQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();

    let filter = query.into_filter()?;
    let forms = state.form_service.list_forms(&owner, Some(filter)).await?;

    let message = format!("{} form(s)", forms.len());
    let resp = timer
        .success(&message, to_json(&forms)?)
        .with_link("self", "/api/v1/forms");
    Ok(Json(resp))
}

/// GET /api/v1/forms/{id}
pub async fn get_form(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_form_id(&id)?;

    let form = state.form_service.get_form(&owner, &id).await?;
    form_response(&timer, "Form retrieved", &form)
}

/// PUT /api/v1/forms/{id} - Replace the schema with an edited document.
pub async fn update_form(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_form_id(&id)?;
    let Json(document) = payload?;

    let form = state
        .form_service
        .update_form_content(&owner, &id, document)
        .await?;
    form_response(&timer, "Form updated", &form)
}

/// POST /api/v1/forms/{id}/publish
pub async fn publish_form(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_form_id(&id)?;

    let form = state.form_service.publish_form(&owner, &id).await?;
    form_response(&timer, "Form published", &form)
}

/// POST /api/v1/forms/{id}/unpublish
pub async fn unpublish_form(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_form_id(&id)?;

    let form = state.form_service.unpublish_form(&owner, &id).await?;
    form_response(&timer, "Form unpublished", &form)
}

/// GET /api/v1/forms/{id}/submissions - Submissions for an owned form, newest first.
pub async fn list_submissions(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_form_id(&id)?;
    let (limit, offset) = page.validate()?;

    let submissions = state
        .submission_service
        .list_submissions(&owner, &id, limit, offset)
        .await?;

    let message = format!("{} submission(s)", submissions.len());
    let resp = timer
        .success(&message, to_json(&submissions)?)
        .with_link("form", &format!("/api/v1/forms/{id}"));
    Ok(Json(resp))
}
