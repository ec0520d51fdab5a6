//! Upstream reply and error definitions.

use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the fetch API.
///
/// Only raised when no usable response came back; an upstream error status is
/// a normal [`UpstreamReply`].
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP client could not be constructed.
    #[error("Failed to build upstream client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Upstream did not answer within the configured deadline.
    #[error("Upstream timeout after {0} seconds")]
    Timeout(u64),

    /// Connection, DNS or protocol failure before a response arrived.
    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response headers arrived but the body could not be read.
    #[error("Failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// What the fetch API sent back.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}
