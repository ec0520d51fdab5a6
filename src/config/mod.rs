//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! PUBMED_RELAY_CONFIG (optional TOML file)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!
//! PUBMED_API_KEY
//!     → secret.rs (ApiKey, read once, never logged)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow running without a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod secret;
pub mod validation;

pub use loader::ConfigError;
pub use schema::RelayConfig;
pub use schema::ListenerConfig;
pub use schema::UpstreamConfig;
pub use schema::ObservabilityConfig;
pub use secret::{ApiKey, MissingApiKey, API_KEY_ENV};
