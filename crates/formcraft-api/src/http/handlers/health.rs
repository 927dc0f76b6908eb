//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/health - Service version, model settings and database reachability.
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();

    let database_ok = state.db_pool.ping().await.is_ok();

    let data = serde_json::json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": database_ok,
        "model": {
            "endpoint": state.config.model.endpoint,
            "name": state.config.model.name,
        },
    });
    Ok(Json(timer.success("Service is running", data)))
}
