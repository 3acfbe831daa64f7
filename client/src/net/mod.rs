//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls to the host server. Calls to the auth provider
//! itself go through `session::gotrue`.

pub mod api;
