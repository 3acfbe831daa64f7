use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the process environment.
fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Caller must hold [`env_lock`].
unsafe fn clear_auth_env() {
    unsafe {
        std::env::remove_var(URL_VAR);
        std::env::remove_var(ANON_KEY_VAR);
        std::env::remove_var(URL_FALLBACK_VAR);
        std::env::remove_var(ANON_KEY_FALLBACK_VAR);
    }
}

#[test]
fn new_trims_trailing_slash() {
    let cfg = AuthConfig::new("https://abc.supabase.co/", "anon").unwrap();
    assert_eq!(cfg.url, "https://abc.supabase.co");
    assert_eq!(cfg.auth_base(), "https://abc.supabase.co/auth/v1");
}

#[test]
fn new_rejects_non_http_scheme() {
    assert!(matches!(AuthConfig::new("ftp://abc.supabase.co", "anon"), Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn new_rejects_relative_url() {
    assert!(matches!(AuthConfig::new("abc.supabase.co", "anon"), Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn from_env_reads_primary_names() {
    let _guard = env_lock();
    unsafe {
        clear_auth_env();
        std::env::set_var(URL_VAR, "https://abc.supabase.co");
        std::env::set_var(ANON_KEY_VAR, "anon-key");
    }

    let cfg = AuthConfig::from_env().unwrap();
    assert_eq!(cfg, AuthConfig { url: "https://abc.supabase.co".to_owned(), anon_key: "anon-key".to_owned() });

    unsafe { clear_auth_env() };
}

#[test]
fn from_env_falls_back_to_vite_names() {
    let _guard = env_lock();
    unsafe {
        clear_auth_env();
        std::env::set_var(URL_FALLBACK_VAR, "http://localhost:54321/");
        std::env::set_var(ANON_KEY_FALLBACK_VAR, "local-key");
    }

    let cfg = AuthConfig::from_env().unwrap();
    assert_eq!(cfg.url, "http://localhost:54321");
    assert_eq!(cfg.anon_key, "local-key");

    unsafe { clear_auth_env() };
}

#[test]
fn from_env_missing_key_names_primary_var() {
    let _guard = env_lock();
    unsafe {
        clear_auth_env();
        std::env::set_var(URL_VAR, "https://abc.supabase.co");
    }

    assert_eq!(AuthConfig::from_env(), Err(ConfigError::Missing { var: ANON_KEY_VAR.to_owned() }));

    unsafe { clear_auth_env() };
}

#[test]
fn from_env_blank_value_counts_as_missing() {
    let _guard = env_lock();
    unsafe {
        clear_auth_env();
        std::env::set_var(URL_VAR, "   ");
        std::env::set_var(ANON_KEY_VAR, "anon-key");
    }

    assert_eq!(AuthConfig::from_env(), Err(ConfigError::Missing { var: URL_VAR.to_owned() }));

    unsafe { clear_auth_env() };
}
