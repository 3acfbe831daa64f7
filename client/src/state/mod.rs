//! Client-side state bindings.
//!
//! DESIGN
//! ======
//! View state itself is defined in the `session` crate; this module only
//! adapts it to Leptos signals.

pub mod auth;
