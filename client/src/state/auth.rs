//! Auth-session state for the current browser page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionController` writes through `StateStore`; backing it with an
//! `RwSignal` makes every session, loading, or error change re-render the
//! page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{StateStore, ViewState};

/// [`StateStore`] over a Leptos signal.
#[derive(Clone, Copy, Debug)]
pub struct SignalStore(pub RwSignal<ViewState>);

impl SignalStore {
    pub fn new(signal: RwSignal<ViewState>) -> Self {
        Self(signal)
    }
}

impl StateStore for SignalStore {
    fn snapshot(&self) -> ViewState {
        self.0.get_untracked()
    }

    fn update<F: FnOnce(&mut ViewState)>(&self, f: F) {
        self.0.update(f);
    }
}
