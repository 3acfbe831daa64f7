//! Debug panel showing which auth project the page talks to.
//!
//! SYSTEM CONTEXT
//! ==============
//! Helps confirm the deployment picked up the right provider URL and key.
//! Only a prefix of the key is shown.

#[cfg(test)]
#[path = "debug_info_test.rs"]
mod debug_info_test;

use leptos::prelude::*;
use session::AuthConfig;
use session::view::key_preview;

const UNCONFIGURED: &str = "(not loaded)";

fn url_line(config: Option<&AuthConfig>) -> String {
    config.map_or_else(|| UNCONFIGURED.to_owned(), |c| c.url.clone())
}

fn key_line(config: Option<&AuthConfig>) -> String {
    config.map_or_else(|| UNCONFIGURED.to_owned(), |c| key_preview(&c.anon_key))
}

#[component]
pub fn DebugInfo(config: RwSignal<Option<AuthConfig>>) -> impl IntoView {
    let url = move || config.with(|c| url_line(c.as_ref()));
    let key = move || config.with(|c| key_line(c.as_ref()));

    view! {
        <div class="debug-info">
            <h3>"Debug Info:"</h3>
            <p>"Supabase URL: "{url}</p>
            <p>"Anon Key: "{key}</p>
        </div>
    }
}
