//! View state for the session screen and its pure render mapping.
//!
//! DESIGN
//! ======
//! `ViewState` holds the three inputs (loading flag, session, error). The
//! screen shown is a pure function of them, see [`ViewState::screen`].
//! Loading wins over everything; the error banner is orthogonal to the
//! authenticated/unauthenticated split.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::types::Session;

pub const LOADING_TEXT: &str = "Loading...";
pub const NOT_LOGGED_IN_TEXT: &str = "Not logged in";
pub const LOGGED_IN_TEXT: &str = "Logged in!";
pub const SIGN_IN_LABEL: &str = "Sign in with Google";
pub const SIGN_OUT_LABEL: &str = "Sign Out";

/// Inputs to the session screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// True until the first session lookup resolves; never set again.
    pub loading: bool,
    /// Most recently received session.
    pub session: Option<Session>,
    /// Message from the last failed provider operation.
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { loading: true, session: None, error: None }
    }
}

/// User identity fields rendered on the authenticated screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub email: String,
    pub id: String,
    pub provider: String,
}

/// What the session screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Unauthenticated { error: Option<String> },
    Authenticated { user: UserSummary, error: Option<String> },
}

impl ViewState {
    /// Apply the result of the initial session lookup.
    pub fn finish_loading(&mut self, session: Option<Session>) {
        self.session = session;
        self.loading = false;
    }

    /// Apply an auth-state-change payload. Allowed while loading; the
    /// screen stays `Loading` until [`Self::finish_loading`].
    pub fn replace_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.loading {
            return Screen::Loading;
        }
        let error = self.error.clone();
        match &self.session {
            None => Screen::Unauthenticated { error },
            Some(session) => Screen::Authenticated {
                user: UserSummary {
                    email: session.user.display_email().to_owned(),
                    id: session.user.id.clone(),
                    provider: session.user.display_provider().to_owned(),
                },
                error,
            },
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.screen(), Screen::Authenticated { .. })
    }
}

impl Screen {
    /// Banner text for the current error, if any.
    #[must_use]
    pub fn error_banner(&self) -> Option<String> {
        match self {
            Self::Loading => None,
            Self::Unauthenticated { error } | Self::Authenticated { error, .. } => {
                error.as_deref().map(error_banner_text)
            }
        }
    }
}

#[must_use]
pub fn error_banner_text(message: &str) -> String {
    format!("Error: {message}")
}

/// Shorten a public API key for the debug panel: first 50 chars then `...`.
#[must_use]
pub fn key_preview(key: &str) -> String {
    let prefix: String = key.chars().take(50).collect();
    format!("{prefix}...")
}
