//! Session view core for the Google sign-in demo.
//!
//! This crate is UI-framework agnostic. It owns the session data model, the
//! [`client::AuthClient`] capability set the view needs from the hosted auth
//! provider, the [`controller::SessionController`] that drives the view, and
//! the pure screen mapping in [`view`]. The `client` crate binds the
//! controller to Leptos signals; the `server` crate only uses [`config`].

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod gotrue;
pub mod listeners;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod store;
pub mod types;
pub mod view;

pub use client::{AuthClient, AuthListener, Subscription};
pub use config::AuthConfig;
pub use controller::SessionController;
pub use error::{ConfigError, ProviderError};
pub use store::{LocalStore, StateStore};
pub use types::{AppMetadata, AuthChangeEvent, OAuthProvider, Session, SignInRequest, User};
pub use view::{Screen, UserSummary, ViewState};
