//! Provider endpoint + public key, read once at process start.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const URL_FALLBACK_VAR: &str = "VITE_SUPABASE_URL";
pub const ANON_KEY_FALLBACK_VAR: &str = "VITE_SUPABASE_ANON_KEY";

/// Connection settings for the hosted auth service.
///
/// Both values are public: the anon key is meant to ship to browsers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Project base URL without a trailing slash, e.g. `https://abc.supabase.co`.
    pub url: String,
    pub anon_key: String,
}

impl AuthConfig {
    /// Build a config, validating and normalizing the URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self { url: normalize_url(url)?, anon_key: anon_key.into() })
    }

    /// Load from `SUPABASE_URL` / `SUPABASE_ANON_KEY`, falling back to the
    /// `VITE_`-prefixed names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the primary variable when
    /// neither name is set, or [`ConfigError::InvalidUrl`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env_with_fallback(URL_VAR, URL_FALLBACK_VAR)?;
        let anon_key = env_with_fallback(ANON_KEY_VAR, ANON_KEY_FALLBACK_VAR)?;
        Self::new(&url, anon_key)
    }

    /// Base URL of the auth REST API.
    #[must_use]
    pub fn auth_base(&self) -> String {
        format!("{}/auth/v1", self.url)
    }
}

fn env_with_fallback(primary: &str, fallback: &str) -> Result<String, ConfigError> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing { var: primary.to_owned() })
}

fn normalize_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(trimmed.to_owned()));
    }
    Ok(trimmed.to_owned())
}
