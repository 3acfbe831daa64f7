use super::*;

fn config() -> AuthConfig {
    AuthConfig::new("https://abc.supabase.co", "x".repeat(64)).unwrap()
}

#[test]
fn lines_before_config_loads_show_placeholder() {
    assert_eq!(url_line(None), "(not loaded)");
    assert_eq!(key_line(None), "(not loaded)");
}

#[test]
fn url_line_shows_configured_url() {
    assert_eq!(url_line(Some(&config())), "https://abc.supabase.co");
}

#[test]
fn key_line_shows_only_prefix() {
    let line = key_line(Some(&config()));
    assert_eq!(line, format!("{}...", "x".repeat(50)));
}
