//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn an upstream reply into the client response
//! - Force `Content-Type: application/xml` whatever upstream sent
//! - Map upstream failures to appropriate HTTP status codes
//!
//! # Design Decisions
//! - Body and status pass through untouched
//! - Upstream timeouts result in 504 Gateway Timeout, other failures in 502
//! - Error bodies are fixed strings; upstream error text can carry the key

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::upstream::{UpstreamError, UpstreamReply};

pub const APPLICATION_XML: &str = "application/xml";

/// Build the client response from what upstream returned.
pub fn relay_response(reply: UpstreamReply) -> Response {
    (
        reply.status,
        [(header::CONTENT_TYPE, APPLICATION_XML)],
        reply.body,
    )
        .into_response()
}

impl UpstreamError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Transport(_) | UpstreamError::Body(_) => StatusCode::BAD_GATEWAY,
            UpstreamError::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let message = match self {
            UpstreamError::Timeout(_) => "Upstream request timed out",
            UpstreamError::Transport(_) => "Upstream request failed",
            UpstreamError::Body(_) => "Upstream response could not be read",
            UpstreamError::ClientBuild(_) => "Upstream client unavailable",
        };
        (self.status_code(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    #[tokio::test]
    async fn reply_keeps_status_and_body() {
        let reply = UpstreamReply {
            status: StatusCode::NOT_FOUND,
            body: Bytes::from_static(b"<ERROR>Empty id list</ERROR>"),
        };

        let response = relay_response(reply);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], APPLICATION_XML);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<ERROR>Empty id list</ERROR>");
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let response = UpstreamError::Timeout(30).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
