//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, tracing)
//!     → request.rs (request ID, `id` extraction)
//!     → [upstream client calls efetch]
//!     → response.rs (status + body passthrough, fixed content type)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::APPLICATION_XML;
pub use server::{AppState, HttpServer};
