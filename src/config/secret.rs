//! Process-wide upstream credential.
//!
//! Read once at startup and handed to the HTTP layer; never re-read and never
//! printed.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "PUBMED_API_KEY";

/// Raised when the credential is unset or empty.
#[derive(Debug, Error)]
#[error("{} environment variable is not set", API_KEY_ENV)]
pub struct MissingApiKey;

/// Non-empty upstream API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// Read the key from `PUBMED_API_KEY`.
    pub fn from_env() -> Result<Self, MissingApiKey> {
        Self::from_value(std::env::var(API_KEY_ENV).ok())
    }

    /// Build a key from an optional raw value. Blank values count as missing.
    pub fn from_value(value: Option<String>) -> Result<Self, MissingApiKey> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(Self(Arc::from(v))),
            _ => Err(MissingApiKey),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_is_rejected() {
        assert!(ApiKey::from_value(None).is_err());
        assert!(ApiKey::from_value(Some(String::new())).is_err());
        assert!(ApiKey::from_value(Some("  \n".into())).is_err());
    }

    #[test]
    fn value_is_kept_verbatim() {
        let key = ApiKey::from_value(Some("abc123".into())).unwrap();
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn debug_output_hides_value() {
        let key = ApiKey::from_value(Some("top-secret".into())).unwrap();
        let printed = format!("{:?}", key);
        assert!(!printed.contains("top-secret"));
    }

    #[test]
    fn error_names_the_variable() {
        assert_eq!(
            MissingApiKey.to_string(),
            "PUBMED_API_KEY environment variable is not set"
        );
    }
}
