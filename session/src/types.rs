//! Session DTOs as issued by the hosted auth service.
//!
//! DESIGN
//! ======
//! Field names mirror the GoTrue JSON payloads so `/auth/v1/user` responses
//! deserialize directly. Unknown fields are ignored; the view only reads
//! `user.email`, `user.id` and `user.app_metadata.provider`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Provider metadata attached to a user by the auth service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Provider used for the most recent sign-in (e.g. `"google"`).
    #[serde(default)]
    pub provider: Option<String>,
    /// Every provider linked to this identity.
    #[serde(default)]
    pub providers: Vec<String>,
}

/// Authenticated user identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-side user identifier (UUID string).
    pub id: String,
    /// Email address; absent for phone-only identities.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl User {
    /// Email for display, empty when the identity has none.
    #[must_use]
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Sign-in provider for display, empty when unknown.
    #[must_use]
    pub fn display_provider(&self) -> &str {
        self.app_metadata.provider.as_deref().unwrap_or_default()
    }
}

/// Opaque session held by the view. Only the nested user is ever read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Kind of auth-state transition reported alongside the session payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthChangeEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
        }
    }
}

/// OAuth identity providers this app can start a sign-in with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    /// Provider identifier expected by the `authorize` endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Arguments for starting a provider-initiated sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignInRequest {
    pub provider: OAuthProvider,
    /// Absolute URL the provider sends the browser back to.
    pub redirect_to: String,
}
