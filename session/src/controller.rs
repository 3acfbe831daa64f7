//! Session view logic: initial lookup, live auth-state updates, and the
//! two user actions.
//!
//! LIFECYCLE
//! =========
//! [`SessionController::mount`] registers the auth-state listener at once so
//! no event is missed while [`SessionController::load`] is in flight.
//! [`SessionController::unmount`] releases the listener and marks the
//! controller unmounted; provider calls that resolve afterwards are logged
//! and dropped rather than applied.
//!
//! ERROR HANDLING
//! ==============
//! Provider failures become the view's error message and a log line. Nothing
//! is returned to the caller, so UI handlers can fire and forget.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::client::{AuthClient, Subscription};
use crate::store::StateStore;
use crate::types::{OAuthProvider, SignInRequest};
use crate::view::{Screen, ViewState};

struct Inner<C, S> {
    client: Rc<C>,
    store: S,
    redirect_to: String,
    mounted: Rc<Cell<bool>>,
    load_started: Cell<bool>,
    subscription: RefCell<Option<Subscription>>,
}

/// Handle to one mounted session view. Clones share the same mount.
pub struct SessionController<C, S> {
    inner: Rc<Inner<C, S>>,
}

impl<C, S> Clone for SessionController<C, S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<C, S> SessionController<C, S>
where
    C: AuthClient + 'static,
    S: StateStore + Clone + 'static,
{
    /// Subscribe to auth-state changes and return the mounted controller.
    ///
    /// `redirect_to` is where the provider returns the browser after sign-in,
    /// normally the page origin.
    pub fn mount(client: Rc<C>, store: S, redirect_to: impl Into<String>) -> Self {
        let mounted = Rc::new(Cell::new(true));

        let listener_store = store.clone();
        let listener_mounted = Rc::clone(&mounted);
        let subscription = client.on_auth_state_change(Box::new(move |event, session| {
            if !listener_mounted.get() {
                return;
            }
            log::debug!("auth state change: {}", event.as_str());
            listener_store.update(|s| s.replace_session(session.cloned()));
        }));

        Self {
            inner: Rc::new(Inner {
                client,
                store,
                redirect_to: redirect_to.into(),
                mounted,
                load_started: Cell::new(false),
                subscription: RefCell::new(Some(subscription)),
            }),
        }
    }

    /// Run the one-shot initial session lookup. Later calls are no-ops.
    pub async fn load(&self) {
        if self.inner.load_started.replace(true) {
            return;
        }

        let result = self.inner.client.get_session().await;
        if !self.is_mounted() {
            log::debug!("session lookup resolved after unmount; ignoring");
            return;
        }

        match result {
            Ok(session) => self.inner.store.update(|s| s.finish_loading(session)),
            Err(e) => {
                log::warn!("session lookup failed: {e}");
                self.inner.store.update(|s| {
                    s.finish_loading(None);
                    s.set_error(e.message);
                });
            }
        }
    }

    /// Start Google OAuth sign-in. Clears any shown error first.
    pub async fn sign_in_with_google(&self) {
        if self.is_mounted() {
            self.inner.store.update(ViewState::clear_error);
        }

        let request =
            SignInRequest { provider: OAuthProvider::Google, redirect_to: self.inner.redirect_to.clone() };
        if let Err(e) = self.inner.client.sign_in_with_oauth(request).await {
            log::error!("Google sign-in error: {e}");
            if self.is_mounted() {
                self.inner.store.update(|s| s.set_error(e.message));
            }
        }
    }

    /// Sign out. On failure the session shown is left as is.
    pub async fn sign_out(&self) {
        if let Err(e) = self.inner.client.sign_out().await {
            log::warn!("sign-out error: {e}");
            if self.is_mounted() {
                self.inner.store.update(|s| s.set_error(e.message));
            }
        }
    }

    /// Release the auth-state listener and stop applying results. Idempotent.
    pub fn unmount(&self) {
        self.inner.mounted.set(false);
        let subscription = self.inner.subscription.borrow_mut().take();
        if let Some(mut subscription) = subscription {
            subscription.unsubscribe();
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.inner.store.snapshot()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.state().screen()
    }
}
