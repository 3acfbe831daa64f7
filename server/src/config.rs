//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use session::AuthConfig;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` when the auth provider is not configured; the page then shows
    /// an error banner instead of the sign-in flow.
    pub auth: Option<AuthConfig>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SUPABASE_URL` / `SUPABASE_ANON_KEY` (or the `VITE_` names)
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError::InvalidPort`] if `PORT` is not a port
    /// number. Missing or invalid auth settings are logged, not fatal.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let auth = match AuthConfig::from_env() {
            Ok(auth) => Some(auth),
            Err(e) => {
                tracing::warn!(error = %e, "auth provider not configured; sign-in disabled");
                None
            }
        };
        Ok(Self { port, auth })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ServerConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse::<u16>().map_err(|_| ServerConfigError::InvalidPort(value.to_owned())),
    }
}
