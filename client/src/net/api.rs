//! REST API helpers for communicating with the host server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` so a missing config degrades to an error
//! banner instead of a panic during hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::AuthConfig;

/// Endpoint serving the public auth provider settings.
pub const AUTH_CONFIG_ENDPOINT: &str = "/api/config";

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn config_request_failed_message(status: u16) -> String {
    format!("auth config request failed: {status}")
}

/// Fetch the auth provider URL and public key from `/api/config`.
///
/// # Errors
///
/// Returns an error string if the request fails, the server reports a
/// non-success status, or the body is not a valid config.
pub async fn fetch_auth_config() -> Result<AuthConfig, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(AUTH_CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(config_request_failed_message(resp.status()));
        }
        resp.json::<AuthConfig>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
