//! Banner for the last failed provider operation.

use leptos::prelude::*;

/// Renders `text` (already formatted as `Error: ...`) when present.
#[component]
pub fn ErrorBanner(text: Option<String>) -> impl IntoView {
    text.map(|text| {
        view! {
            <div class="error-banner" role="alert">
                {text}
            </div>
        }
    })
}
