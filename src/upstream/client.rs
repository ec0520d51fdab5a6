//! Fetch API client with timeout and error handling.
//!
//! # Responsibilities
//! - Build the outbound efetch query (`db`, `id`, `retmode`, `api_key`)
//! - Inject the process-wide API key
//! - Enforce connect and total deadlines
//! - Classify failures where no response was received

use std::time::Duration;

use axum::http::StatusCode;

use crate::config::{ApiKey, UpstreamConfig};
use crate::upstream::types::{UpstreamError, UpstreamReply, UpstreamResult};

/// Database queried on every call.
pub const DB: &str = "pubmed";

/// Return mode requested on every call.
pub const RETMODE: &str = "xml";

/// Client for the efetch endpoint.
///
/// Cheap to clone; clones share the connection pool and the key.
#[derive(Clone)]
pub struct EfetchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    request_timeout_secs: u64,
}

impl EfetchClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Upstream URL and deadlines
    /// * `api_key` - Credential appended to every request
    pub fn new(config: &UpstreamConfig, api_key: ApiKey) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(UpstreamError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
            request_timeout_secs: config.request_timeout_secs,
        })
    }

    /// Ordered query parameters for one fetch. A missing `id` is left out.
    pub fn query<'a>(&'a self, id: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
        let mut params = Vec::with_capacity(4);
        params.push(("db", DB));
        if let Some(id) = id {
            params.push(("id", id));
        }
        params.push(("retmode", RETMODE));
        params.push(("api_key", self.api_key.expose()));
        params
    }

    /// Fetch one record set. Any status upstream returns is a success here.
    pub async fn fetch(&self, id: Option<&str>) -> UpstreamResult<UpstreamReply> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&self.query(id))
            .send()
            .await
            .map_err(|e| self.classify(e, UpstreamError::Transport))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(e, UpstreamError::Body))?;

        tracing::debug!(status = %status, bytes = body.len(), "Upstream replied");

        Ok(UpstreamReply { status, body })
    }

    /// The request URL carries the key, so it is stripped before the error escapes.
    fn classify(
        &self,
        e: reqwest::Error,
        otherwise: fn(reqwest::Error) -> UpstreamError,
    ) -> UpstreamError {
        let e = e.without_url();
        if e.is_timeout() {
            UpstreamError::Timeout(self.request_timeout_secs)
        } else {
            otherwise(e)
        }
    }
}

impl std::fmt::Debug for EfetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EfetchClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
