//! Reusable UI components used by the session page.
//!
//! DESIGN
//! ======
//! Components stay presentational; all provider calls go through the page's
//! `SessionController`.

pub mod debug_info;
pub mod error_banner;
pub mod user_card;
