//! Session page: Google sign-in, current session details, sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! On hydrate the page fetches the public auth config, builds the GoTrue
//! client (handing it any redirect parameters), and mounts a
//! `SessionController` over a page-local signal. Cleanup unmounts it, which
//! releases the auth-state listener. The SSR pass renders the loading
//! placeholder only.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use session::view::{LOADING_TEXT, LOGGED_IN_TEXT, NOT_LOGGED_IN_TEXT, SIGN_IN_LABEL, SIGN_OUT_LABEL};
use session::{AuthConfig, Screen, ViewState};

use crate::components::debug_info::DebugInfo;
use crate::components::error_banner::ErrorBanner;
use crate::components::user_card::UserCard;

#[cfg(feature = "hydrate")]
type BrowserController = session::SessionController<
    session::gotrue::GoTrueClient<crate::util::location::BrowserNavigator>,
    crate::state::auth::SignalStore,
>;

const PAGE_TITLE: &str = "Supabase Google Auth Test";
const PROVIDER_UNAVAILABLE: &str = "auth provider not configured";

/// Sign-in was clicked before the auth client could be built.
fn report_provider_unavailable(state: &mut ViewState) {
    state.set_error(PROVIDER_UNAVAILABLE);
}

/// Root element class for the current screen.
fn screen_class(screen: &Screen) -> &'static str {
    match screen {
        Screen::Loading => "session-page session-page--loading",
        Screen::Unauthenticated { .. } => "session-page session-page--signed-out",
        Screen::Authenticated { .. } => "session-page session-page--signed-in",
    }
}

#[component]
pub fn SessionPage() -> impl IntoView {
    let state = RwSignal::new(ViewState::default());
    let auth_config = RwSignal::new(None::<AuthConfig>);

    #[cfg(feature = "hydrate")]
    let controller = StoredValue::new_local(None::<BrowserController>);

    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use session::SessionController;
        use session::gotrue::GoTrueClient;

        use crate::state::auth::SignalStore;
        use crate::util::location::{BrowserNavigator, page_origin, take_auth_redirect};

        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            let fetched = crate::net::api::fetch_auth_config().await;
            if !alive_task.load(Ordering::Relaxed) {
                return;
            }
            let config = match fetched {
                Ok(config) => config,
                Err(e) => {
                    log::error!("auth config unavailable: {e}");
                    state.update(|s| {
                        s.finish_loading(None);
                        s.set_error(e);
                    });
                    return;
                }
            };
            auth_config.set(Some(config.clone()));

            let client = GoTrueClient::new(config, BrowserNavigator).with_redirect_fragment(&take_auth_redirect());
            let ctl = SessionController::mount(Rc::new(client), SignalStore::new(state), page_origin());
            controller.set_value(Some(ctl.clone()));
            ctl.load().await;
        });

        on_cleanup(move || {
            alive.store(false, Ordering::Relaxed);
            let _ = controller.try_with_value(|ctl| {
                if let Some(ctl) = ctl {
                    ctl.unmount();
                }
            });
        });
    }

    let on_sign_in = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(ctl) = controller.get_value() {
                leptos::task::spawn_local(async move { ctl.sign_in_with_google().await });
                return;
            }
            log::warn!("sign-in clicked without an auth client");
        }
        state.update(report_provider_unavailable);
    };

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(ctl) = controller.get_value() {
                leptos::task::spawn_local(async move { ctl.sign_out().await });
            }
        }
    };

    let screen = Memo::new(move |_| state.with(ViewState::screen));

    view! {
        {move || {
            let current = screen.get();
            if current == Screen::Loading {
                return view! { <div class=screen_class(&current)>{LOADING_TEXT}</div> }.into_any();
            }

            let class = screen_class(&current);
            let banner = current.error_banner();
            let body = match current {
                Screen::Authenticated { user, .. } => view! {
                    <div>
                        <p class="session-status session-status--ok">{LOGGED_IN_TEXT}</p>
                        <UserCard user=user/>
                        <button class="sign-out-button" on:click=on_sign_out>{SIGN_OUT_LABEL}</button>
                    </div>
                }
                .into_any(),
                _ => view! {
                    <div>
                        <p class="session-status">{NOT_LOGGED_IN_TEXT}</p>
                        <button class="google-button" on:click=on_sign_in>{SIGN_IN_LABEL}</button>
                    </div>
                }
                .into_any(),
            };

            view! {
                <div class=class>
                    <h1>{PAGE_TITLE}</h1>
                    <ErrorBanner text=banner/>
                    {body}
                    <DebugInfo config=auth_config/>
                </div>
            }
            .into_any()
        }}
    }
}
