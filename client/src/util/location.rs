//! Page location helpers: origin, OAuth redirect parameters, navigation.
//!
//! Requires a browser environment; the SSR build gets inert fallbacks.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use session::gotrue::{Navigator, RedirectFragment, parse_redirect_fragment};

/// Where the provider put its redirect parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectSource {
    Fragment,
    Query,
}

/// Whether a URL fragment was written by the auth provider's redirect.
pub fn fragment_carries_auth(fragment: &str) -> bool {
    parse_redirect_fragment(fragment) != RedirectFragment::Empty
}

/// Pick the part of the URL holding the provider's redirect. Tokens only
/// arrive in the fragment; errors may come back in either.
pub fn locate_redirect(hash: &str, search: &str) -> Option<RedirectSource> {
    if fragment_carries_auth(hash) {
        Some(RedirectSource::Fragment)
    } else if matches!(parse_redirect_fragment(search), RedirectFragment::Error(_)) {
        Some(RedirectSource::Query)
    } else {
        None
    }
}

/// Address-bar path with the redirect parameters removed.
pub fn scrubbed_path(pathname: &str, search: &str, hash: &str, source: RedirectSource) -> String {
    match source {
        RedirectSource::Fragment => format!("{pathname}{search}"),
        RedirectSource::Query => format!("{pathname}{hash}"),
    }
}

/// `window.location.origin`, used as the OAuth redirect target.
pub fn page_origin() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Read the provider's redirect parameters from the URL fragment or query
/// and remove them from the address bar so tokens do not linger in history.
pub fn take_auth_redirect() -> String {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        let location = window.location();
        let hash = location.hash().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        let Some(source) = locate_redirect(&hash, &search) else {
            return String::new();
        };

        let path = scrubbed_path(&location.pathname().unwrap_or_default(), &search, &hash, source);
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
        }
        match source {
            RedirectSource::Fragment => hash,
            RedirectSource::Query => search,
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Navigates by assigning `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or_else(|| "no browser window".to_owned())?;
            window
                .location()
                .assign(url)
                .map_err(|e| format!("navigation failed: {e:?}"))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err("navigation not available on server".to_owned())
        }
    }
}
