//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Owner-scoped forms
        .route("/forms/generate", post(handlers::form::generate_form))
        .route("/forms", get(handlers::form::list_forms))
        .route(
            "/forms/{id}",
            get(handlers::form::get_form).put(handlers::form::update_form),
        )
        .route("/forms/{id}/publish", post(handlers::form::publish_form))
        .route("/forms/{id}/unpublish", post(handlers::form::unpublish_form))
        .route(
            "/forms/{id}/submissions",
            get(handlers::form::list_submissions),
        )
        // Dashboard stats
        .route("/stats", get(handlers::stats::get_stats))
        // Public share links
        .route("/share/{share_id}", get(handlers::share::get_shared_form))
        .route(
            "/share/{share_id}/submissions",
            post(handlers::share::submit),
        )
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
