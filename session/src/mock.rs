//! In-memory [`AuthClient`] double with scripted results.
//!
//! ORDERING CONTRACT
//! =================
//! [`MockAuthClient::emit`] delivers synchronously to every live listener,
//! in registration order, before returning. Events therefore arrive in the
//! exact order a test emits them. The mock never emits on its own: a
//! successful `sign_out` does not fire `SignedOut` until the test emits it.
//!
//! GATES
//! =====
//! [`MockAuthClient::hold`] makes the next call of an operation wait until
//! the returned [`Gate`] is released (or dropped), which lets tests observe
//! the view while a provider call is in flight.

use std::cell::RefCell;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::client::{AuthClient, AuthListener, Subscription};
use crate::error::ProviderError;
use crate::listeners::ListenerRegistry;
use crate::types::{AppMetadata, AuthChangeEvent, Session, SignInRequest, User};

/// Operations that can be held with a [`Gate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockOp {
    GetSession,
    SignIn,
    SignOut,
}

/// Calls observed by the mock, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    GetSession,
    Subscribe,
    SignInWithOAuth(SignInRequest),
    SignOut,
}

/// Releases one held operation.
pub struct Gate {
    tx: oneshot::Sender<()>,
}

impl Gate {
    pub fn release(self) {
        let _ = self.tx.send(());
    }
}

#[derive(Default)]
pub struct MockAuthClient {
    listeners: ListenerRegistry,
    session: RefCell<Option<Session>>,
    session_error: RefCell<Option<ProviderError>>,
    sign_in_error: RefCell<Option<ProviderError>>,
    sign_out_error: RefCell<Option<ProviderError>>,
    gates: RefCell<Vec<(MockOp, oneshot::Receiver<()>)>>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockAuthClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session returned by `get_session`.
    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        *self.session.borrow_mut() = Some(session);
        self
    }

    pub fn fail_get_session(&self, message: &str) {
        *self.session_error.borrow_mut() = Some(ProviderError::new(message));
    }

    /// Make every following `sign_in_with_oauth` fail; `None` restores success.
    pub fn fail_sign_in(&self, message: Option<&str>) {
        *self.sign_in_error.borrow_mut() = message.map(ProviderError::new);
    }

    /// Make every following `sign_out` fail; `None` restores success.
    pub fn fail_sign_out(&self, message: Option<&str>) {
        *self.sign_out_error.borrow_mut() = message.map(ProviderError::new);
    }

    /// Hold the next call of `op` until the gate is released.
    pub fn hold(&self, op: MockOp) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push((op, rx));
        Gate { tx }
    }

    /// Deliver an auth-state change to all live listeners.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<Session>) {
        self.listeners.emit(event, session.as_ref());
    }

    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }

    async fn wait_gate(&self, op: MockOp) {
        let rx = {
            let mut gates = self.gates.borrow_mut();
            gates.iter().position(|(gate_op, _)| *gate_op == op).map(|idx| gates.remove(idx).1)
        };
        if let Some(rx) = rx {
            // A dropped gate counts as released.
            let _ = rx.await;
        }
    }
}

#[async_trait(?Send)]
impl AuthClient for MockAuthClient {
    async fn get_session(&self) -> Result<Option<Session>, ProviderError> {
        self.record(MockCall::GetSession);
        self.wait_gate(MockOp::GetSession).await;
        if let Some(err) = self.session_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.session.borrow().clone())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.record(MockCall::Subscribe);
        self.listeners.subscribe(listener)
    }

    async fn sign_in_with_oauth(&self, request: SignInRequest) -> Result<(), ProviderError> {
        self.record(MockCall::SignInWithOAuth(request));
        self.wait_gate(MockOp::SignIn).await;
        match self.sign_in_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.record(MockCall::SignOut);
        self.wait_gate(MockOp::SignOut).await;
        match self.sign_out_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Build a session for a user signed in through `provider`.
#[must_use]
pub fn sample_session(email: &str, id: &str, provider: &str) -> Session {
    Session {
        access_token: format!("access-{id}"),
        refresh_token: Some(format!("refresh-{id}")),
        expires_in: Some(3600),
        token_type: "bearer".to_owned(),
        user: User {
            id: id.to_owned(),
            email: Some(email.to_owned()),
            app_metadata: AppMetadata { provider: Some(provider.to_owned()), providers: vec![provider.to_owned()] },
        },
    }
}
