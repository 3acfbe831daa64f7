//! Error types shared by the auth client adapters and config loading.

/// Failure reported by the external auth provider for any operation.
///
/// Carries only the human-readable message; the view displays it verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Errors produced while loading [`crate::config::AuthConfig`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither the primary nor the fallback environment variable is set.
    #[error("missing config: env var {var} not set")]
    Missing { var: String },

    /// The provider URL is not an absolute http(s) URL.
    #[error("invalid provider url: {0}")]
    InvalidUrl(String),
}
