//! HTTP/REST API layer for Formcraft.
//!
//! Axum-based REST API at `/api/v1/` with owner identity taken from the
//! `X-Owner-Id` header, envelope response format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
