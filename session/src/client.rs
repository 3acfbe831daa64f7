//! The capability set the session view consumes from the auth provider.
//!
//! DESIGN
//! ======
//! The provider is reached only through [`AuthClient`], constructed by the
//! host and injected into [`crate::controller::SessionController`]. The
//! browser uses [`crate::gotrue::GoTrueClient`]; tests use the in-memory
//! `MockAuthClient`. Futures are `?Send` because the view runs on a
//! single-threaded event loop.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::fmt;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{AuthChangeEvent, Session, SignInRequest};

/// Callback invoked for every auth-state change, in provider emission order.
pub type AuthListener = Box<dyn Fn(AuthChangeEvent, Option<&Session>)>;

/// Auth operations delegated to the external provider.
#[async_trait(?Send)]
pub trait AuthClient {
    /// Current session snapshot, `None` when signed out.
    async fn get_session(&self) -> Result<Option<Session>, ProviderError>;

    /// Register a listener for auth-state changes. The listener stays live
    /// until the returned handle is released or dropped.
    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription;

    /// Start a provider-initiated sign-in. On success the provider usually
    /// navigates the page away.
    async fn sign_in_with_oauth(&self, request: SignInRequest) -> Result<(), ProviderError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Owned handle for a live auth-state listener.
///
/// Releasing is idempotent: [`Subscription::unsubscribe`] may be called any
/// number of times, and dropping the handle releases it if still active.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// A handle with nothing to release.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}
