//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) on `x-request-id`
//! - Keep a caller-supplied ID instead of replacing it
//! - Extract the `id` parameter forwarded upstream
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query string read leniently: unknown or repeated keys never reject a request

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a fresh UUID v4 for requests arriving without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID back out of a header map.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> &str {
        self.get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// First `id` value in a raw query string, decoded.
///
/// `None` when the key is absent; `Some("")` for `?id=`.
pub fn record_id(raw_query: Option<&str>) -> Option<String> {
    let query = raw_query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}
