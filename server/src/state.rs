//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the public auth provider settings served to the browser.

use std::sync::Arc;

use session::AuthConfig;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone, Default)]
pub struct AppState {
    pub auth: Option<Arc<AuthConfig>>,
}

impl AppState {
    #[must_use]
    pub fn new(auth: Option<AuthConfig>) -> Self {
        Self { auth: auth.map(Arc::new) }
    }
}
