//! Identity fields of the signed-in user.

use leptos::prelude::*;
use session::UserSummary;

#[component]
pub fn UserCard(user: UserSummary) -> impl IntoView {
    view! {
        <div class="user-card">
            <p><strong>"Email:"</strong>" "{user.email}</p>
            <p><strong>"User ID:"</strong>" "{user.id}</p>
            <p><strong>"Provider:"</strong>" "{user.provider}</p>
        </div>
    }
}
