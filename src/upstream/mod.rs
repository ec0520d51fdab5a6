//! Upstream (NCBI efetch) integration.
//!
//! # Data Flow
//! ```text
//! /proxy handler
//!     → client.rs (build query, inject api_key, send with deadline)
//!     → types.rs (UpstreamReply on any response, UpstreamError otherwise)
//! ```

pub mod client;
pub mod types;

pub use client::EfetchClient;
pub use types::{UpstreamError, UpstreamReply, UpstreamResult};
