//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "success": true,
//!   "message": "Form generated successfully",
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "_links": { "self": "..." }
//! }
//! ```
//!
//! Failures set `success: false`, carry `error: { code, details }` and, for
//! generation failures, the offending model output as `rawResponse`.

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    /// Human-readable summary of the outcome.
    pub message: String,

    /// The main response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,

    /// Raw model output (or rejected document) behind a generation failure.
    #[serde(rename = "rawResponse", skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,

    /// Request metadata.
    pub meta: ApiMeta,

    /// HATEOAS-style links for discoverability.
    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Individual validation failures, if any.
    pub details: Vec<String>,
}

/// Per-request timing and id, created at the top of each handler.
pub struct RequestTimer {
    start: Instant,
    request_id: String,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            request_id: uuid::Uuid::now_v7().to_string(),
        }
    }

    fn meta(&self) -> ApiMeta {
        ApiMeta::new(
            self.request_id.clone(),
            self.start.elapsed().as_millis() as u64,
        )
    }

    /// Finish the request with a success envelope.
    pub fn success<T: Serialize>(&self, message: &str, data: T) -> ApiResponse<T> {
        ApiResponse::success(message, data, self.meta())
    }
}

impl ApiMeta {
    pub fn new(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(message: &str, data: T, meta: ApiMeta) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
            raw_response: None,
            meta,
            links: HashMap::new(),
        }
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

impl ApiResponse<()> {
    /// Create an error response (no data).
    pub fn failure(
        code: &str,
        message: String,
        details: Vec<String>,
        raw_response: Option<String>,
        meta: ApiMeta,
    ) -> Self {
        Self {
            success: false,
            message,
            data: None,
            error: Some(ApiErrorBody {
                code: code.to_string(),
                details,
            }),
            raw_response,
            meta,
            links: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error_fields() {
        let resp = ApiResponse::success("ok", json!({ "a": 1 }), ApiMeta::new("r1".into(), 3))
            .with_link("self", "/api/v1/forms");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["a"], 1);
        assert_eq!(value["meta"]["request_id"], "r1");
        assert_eq!(value["_links"]["self"], "/api/v1/forms");
        assert!(value.get("error").is_none());
        assert!(value.get("rawResponse").is_none());
    }

    #[test]
    fn failure_envelope_carries_code_details_and_raw_response() {
        let resp = ApiResponse::failure(
            "SCHEMA_MISMATCH",
            "output does not match a form shape".into(),
            vec!["missing field `title`".into()],
            Some("{\"foo\":\"bar\"}".into()),
            ApiMeta::new("r2".into(), 0),
        );
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "SCHEMA_MISMATCH");
        assert_eq!(value["error"]["details"][0], "missing field `title`");
        assert_eq!(value["rawResponse"], "{\"foo\":\"bar\"}");
        assert!(value.get("data").is_none());
    }
}
