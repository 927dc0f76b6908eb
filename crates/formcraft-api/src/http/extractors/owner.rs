//! Owner identity extractor.
//!
//! Authentication is handled by the fronting auth provider, which forwards
//! the signed-in user's id in the `X-Owner-Id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;

pub const OWNER_HEADER: &str = "x-owner-id";

/// The signed-in owner making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_owner(parts).map(Owner)
    }
}

fn extract_owner(parts: &Parts) -> Result<String, AppError> {
    let Some(value) = parts.headers.get(OWNER_HEADER) else {
        return Err(AppError::Unauthorized(
            "Missing owner identity. Provide it via the 'X-Owner-Id' header.".to_string(),
        ));
    };

    let owner = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid X-Owner-Id header encoding".to_string()))?
        .trim();

    if owner.is_empty() {
        return Err(AppError::Unauthorized("X-Owner-Id header is empty".to_string()));
    }
    Ok(owner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/forms");
        if let Some(value) = header {
            builder = builder.header("X-Owner-Id", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn extracts_trimmed_owner() {
        let mut parts = parts_with(Some("  user_42 "));
        let owner = Owner::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(owner, Owner("user_42".to_string()));
    }

    #[tokio::test]
    async fn missing_or_blank_owner_is_unauthorized() {
        for header in [None, Some(""), Some("   ")] {
            let mut parts = parts_with(header);
            let err = Owner::from_request_parts(&mut parts, &()).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
    }
}
