//! [`AuthClient`] backed by the hosted auth service's REST API (GoTrue).
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider owns the OAuth dance. Sign-in only builds the `authorize`
//! URL and hands it to a [`Navigator`]; the provider redirects back with
//! the session tokens in the URL fragment. The host passes that fragment to
//! [`GoTrueClient::with_redirect_fragment`], and the first `get_session`
//! turns it into a [`Session`] by fetching the user.
//!
//! The session lives in memory only. Refresh and persistence are not done
//! here.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is a [`ProviderError`]. Non-2xx responses use the message
//! the service put in the body when there is one.

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod gotrue_test;

use std::cell::RefCell;

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{AuthClient, AuthListener, Subscription};
use crate::config::AuthConfig;
use crate::error::ProviderError;
use crate::listeners::ListenerRegistry;
use crate::types::{AuthChangeEvent, Session, SignInRequest, User};

/// Moves the page to another URL. The browser implementation sets
/// `window.location`.
pub trait Navigator {
    /// # Errors
    ///
    /// Returns a description of why navigation could not start.
    fn navigate(&self, url: &str) -> Result<(), String>;
}

/// Tokens carried back in the redirect fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: String,
}

/// What the provider put in the redirect fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectFragment {
    Tokens(RedirectTokens),
    Error(String),
    Empty,
}

/// Parse `#access_token=...&expires_in=...` or `#error=...&error_description=...`.
/// A leading `#` or `?` is optional, so a query string parses the same way.
#[must_use]
pub fn parse_redirect_fragment(fragment: &str) -> RedirectFragment {
    let raw = fragment.trim_start_matches(['#', '?']);
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut token_type = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "expires_in" => expires_in = value.parse::<u64>().ok(),
            "token_type" => token_type = Some(value),
            "error" => error = Some(value),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if let Some(message) = error_description.or(error) {
        return RedirectFragment::Error(message);
    }
    match access_token.filter(|t| !t.is_empty()) {
        Some(access_token) => RedirectFragment::Tokens(RedirectTokens {
            access_token,
            refresh_token,
            expires_in,
            token_type: token_type.unwrap_or_else(|| "bearer".to_owned()),
        }),
        None => RedirectFragment::Empty,
    }
}

/// Build the provider's OAuth `authorize` URL.
///
/// # Errors
///
/// Returns a [`ProviderError`] if the configured base URL cannot be parsed.
pub fn authorize_url(config: &AuthConfig, request: &SignInRequest) -> Result<String, ProviderError> {
    let base = format!("{}/authorize", config.auth_base());
    let url = url::Url::parse_with_params(
        &base,
        &[("provider", request.provider.as_str()), ("redirect_to", request.redirect_to.as_str())],
    )
    .map_err(|e| ProviderError::new(format!("invalid authorize url: {e}")))?;
    Ok(url.into())
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

/// Map a non-success response to the message the service sent.
#[must_use]
pub fn provider_error_from_response(status: u16, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.msg.or(b.error_description).or(b.message))
        .filter(|m| !m.is_empty());
    match parsed {
        Some(message) => ProviderError::new(message),
        None => ProviderError::new(format!("{status}: {body}")),
    }
}

/// Logout statuses meaning the session is already gone server-side.
fn logout_already_done(status: u16) -> bool {
    matches!(status, 401 | 403 | 404)
}

pub struct GoTrueClient<N> {
    config: AuthConfig,
    http: reqwest::Client,
    navigator: N,
    session: RefCell<Option<Session>>,
    pending_fragment: RefCell<Option<String>>,
    listeners: ListenerRegistry,
}

impl<N: Navigator> GoTrueClient<N> {
    pub fn new(config: AuthConfig, navigator: N) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            navigator,
            session: RefCell::new(None),
            pending_fragment: RefCell::new(None),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Redirect parameters the page was loaded with (fragment or query),
    /// consumed by the first `get_session`.
    #[must_use]
    pub fn with_redirect_fragment(self, fragment: &str) -> Self {
        if !fragment.trim_start_matches(['#', '?']).is_empty() {
            *self.pending_fragment.borrow_mut() = Some(fragment.to_owned());
        }
        self
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Fetch the user that owns `access_token`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport failure, a non-2xx status, or
    /// an unparseable body.
    pub async fn fetch_user(&self, access_token: &str) -> Result<User, ProviderError> {
        let resp = self
            .http
            .get(format!("{}/user", self.config.auth_base()))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(provider_error_from_response(status.as_u16(), &body));
        }
        resp.json::<User>().await.map_err(ProviderError::from)
    }

    async fn restore_from_fragment(&self, fragment: &str) -> Result<(), ProviderError> {
        let tokens = match parse_redirect_fragment(fragment) {
            RedirectFragment::Tokens(tokens) => tokens,
            RedirectFragment::Error(message) => return Err(ProviderError::new(message)),
            RedirectFragment::Empty => return Ok(()),
        };

        let user = self.fetch_user(&tokens.access_token).await?;
        log::info!("session restored from redirect for user {}", user.id);
        let session = Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
            user,
        };
        *self.session.borrow_mut() = Some(session.clone());
        self.listeners.emit(AuthChangeEvent::SignedIn, Some(&session));
        Ok(())
    }
}

#[async_trait(?Send)]
impl<N: Navigator> AuthClient for GoTrueClient<N> {
    async fn get_session(&self) -> Result<Option<Session>, ProviderError> {
        let pending = self.pending_fragment.borrow_mut().take();
        if let Some(fragment) = pending {
            self.restore_from_fragment(&fragment).await?;
        }
        Ok(self.session.borrow().clone())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn sign_in_with_oauth(&self, request: SignInRequest) -> Result<(), ProviderError> {
        let url = authorize_url(&self.config, &request)?;
        log::info!("starting {} sign-in", request.provider.as_str());
        self.navigator.navigate(&url).map_err(ProviderError::new)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let token = self.session.borrow().as_ref().map(|s| s.access_token.clone());
        if let Some(token) = token {
            let resp = self
                .http
                .post(format!("{}/logout", self.config.auth_base()))
                .header("apikey", &self.config.anon_key)
                .bearer_auth(&token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() && !logout_already_done(status.as_u16()) {
                let body = resp.text().await.unwrap_or_default();
                return Err(provider_error_from_response(status.as_u16(), &body));
            }
        }

        *self.session.borrow_mut() = None;
        self.listeners.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }
}
