//! Dashboard statistics endpoint.
//!
//! GET /api/v1/stats - Aggregate counts for the owner's dashboard.

use axum::Json;
use axum::extract::State;

use crate::http::error::AppError;
use crate::http::extractors::owner::Owner;
use crate::http::handlers::to_json;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/stats - Form and submission totals for the owner.
pub async fn get_stats(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();

    let stats = state.form_service.stats(&owner).await?;

    let resp = timer
        .success("Stats retrieved", to_json(&stats)?)
        .with_link("self", "/api/v1/stats")
        .with_link("forms", "/api/v1/forms");
    Ok(Json(resp))
}
