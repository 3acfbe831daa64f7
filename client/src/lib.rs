//! # client
//!
//! Leptos + WASM frontend for the Google sign-in demo.
//!
//! The page binds `session::SessionController` to a reactive signal so the
//! screen re-renders on every auth-state change. Browser-only concerns
//! (location, navigation, REST) sit behind the `hydrate` feature; the SSR
//! build renders the loading placeholder.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
