use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::types::OAuthProvider;

#[derive(Clone, Default)]
struct RecordingNavigator {
    visited: Rc<RefCell<Vec<String>>>,
    fail_with: Option<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        self.visited.borrow_mut().push(url.to_owned());
        Ok(())
    }
}

fn config() -> AuthConfig {
    AuthConfig::new("https://abc.supabase.co", "anon-key").unwrap()
}

fn google_request() -> SignInRequest {
    SignInRequest { provider: OAuthProvider::Google, redirect_to: "http://localhost:3000".to_owned() }
}

// =============================================================
// authorize_url
// =============================================================

#[test]
fn authorize_url_encodes_provider_and_redirect() {
    let url = authorize_url(&config(), &google_request()).unwrap();
    assert_eq!(
        url,
        "https://abc.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000"
    );
}

// =============================================================
// parse_redirect_fragment
// =============================================================

#[test]
fn fragment_with_tokens_parses_all_fields() {
    let parsed = parse_redirect_fragment(
        "#access_token=at&expires_at=1700000000&expires_in=3600&provider_token=pt&refresh_token=rt&token_type=bearer",
    );
    assert_eq!(
        parsed,
        RedirectFragment::Tokens(RedirectTokens {
            access_token: "at".to_owned(),
            refresh_token: Some("rt".to_owned()),
            expires_in: Some(3600),
            token_type: "bearer".to_owned(),
        })
    );
}

#[test]
fn fragment_without_hash_and_token_type_defaults_bearer() {
    let RedirectFragment::Tokens(tokens) = parse_redirect_fragment("access_token=at") else {
        panic!("expected tokens");
    };
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.refresh_token, None);
}

#[test]
fn fragment_error_prefers_description() {
    assert_eq!(
        parse_redirect_fragment("#error=access_denied&error_description=User+cancelled+login"),
        RedirectFragment::Error("User cancelled login".to_owned())
    );
    assert_eq!(
        parse_redirect_fragment("#error=server_error"),
        RedirectFragment::Error("server_error".to_owned())
    );
}

#[test]
fn fragment_with_only_description_is_error() {
    assert_eq!(
        parse_redirect_fragment("#error_description=Email+not+confirmed"),
        RedirectFragment::Error("Email not confirmed".to_owned())
    );
}

#[test]
fn query_string_parses_like_fragment() {
    assert_eq!(
        parse_redirect_fragment("?error=access_denied&error_description=denied"),
        RedirectFragment::Error("denied".to_owned())
    );
}

#[test]
fn fragment_without_tokens_is_empty() {
    assert_eq!(parse_redirect_fragment(""), RedirectFragment::Empty);
    assert_eq!(parse_redirect_fragment("#section-2"), RedirectFragment::Empty);
    assert_eq!(parse_redirect_fragment("#access_token="), RedirectFragment::Empty);
}

// =============================================================
// provider_error_from_response
// =============================================================

#[test]
fn error_body_msg_field_is_used() {
    let err = provider_error_from_response(400, r#"{"code":400,"msg":"Unsupported provider"}"#);
    assert_eq!(err.message, "Unsupported provider");
}

#[test]
fn error_body_falls_back_through_known_fields() {
    let err = provider_error_from_response(401, r#"{"error":"invalid_grant","error_description":"bad token"}"#);
    assert_eq!(err.message, "bad token");
    let err = provider_error_from_response(500, r#"{"message":"boom"}"#);
    assert_eq!(err.message, "boom");
}

#[test]
fn unstructured_error_body_includes_status() {
    let err = provider_error_from_response(502, "Bad Gateway");
    assert_eq!(err.message, "502: Bad Gateway");
}

#[test]
fn logout_treats_missing_session_statuses_as_done() {
    assert!(logout_already_done(401));
    assert!(logout_already_done(404));
    assert!(!logout_already_done(500));
}

// =============================================================
// AuthClient behavior without network
// =============================================================

#[tokio::test]
async fn sign_in_navigates_to_authorize_url() {
    let navigator = RecordingNavigator::default();
    let client = GoTrueClient::new(config(), navigator.clone());

    client.sign_in_with_oauth(google_request()).await.unwrap();

    let visited = navigator.visited.borrow();
    assert_eq!(visited.len(), 1);
    assert!(visited[0].starts_with("https://abc.supabase.co/auth/v1/authorize?provider=google"));
}

#[tokio::test]
async fn sign_in_navigation_failure_is_provider_error() {
    let navigator = RecordingNavigator { fail_with: Some("navigation blocked".to_owned()), ..Default::default() };
    let client = GoTrueClient::new(config(), navigator);

    let err = client.sign_in_with_oauth(google_request()).await.unwrap_err();
    assert_eq!(err.message, "navigation blocked");
}

#[tokio::test]
async fn get_session_without_fragment_is_none() {
    let client = GoTrueClient::new(config(), RecordingNavigator::default()).with_redirect_fragment("");
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn get_session_with_error_fragment_fails_once() {
    let client = GoTrueClient::new(config(), RecordingNavigator::default())
        .with_redirect_fragment("#error=access_denied&error_description=popup_closed");

    let err = client.get_session().await.unwrap_err();
    assert_eq!(err.message, "popup_closed");
    // The fragment is consumed; later lookups report no session.
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn sign_out_without_session_emits_signed_out() {
    let client = GoTrueClient::new(config(), RecordingNavigator::default());
    let seen: Rc<RefCell<Vec<AuthChangeEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = client.on_auth_state_change(Box::new(move |event, session| {
        assert!(session.is_none());
        sink.borrow_mut().push(event);
    }));

    client.sign_out().await.unwrap();

    assert_eq!(*seen.borrow(), vec![AuthChangeEvent::SignedOut]);
}

// =============================================================
// AuthClient against a mock provider
// =============================================================

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &MockServer, fragment: &str) -> GoTrueClient<RecordingNavigator> {
    let config = AuthConfig::new(&server.uri(), "anon-key").unwrap();
    GoTrueClient::new(config, RecordingNavigator::default()).with_redirect_fragment(fragment)
}

fn record_events(client: &GoTrueClient<RecordingNavigator>) -> (Subscription, Rc<RefCell<Vec<(AuthChangeEvent, bool)>>>) {
    let seen: Rc<RefCell<Vec<(AuthChangeEvent, bool)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let sub = client.on_auth_state_change(Box::new(move |event, session| {
        sink.borrow_mut().push((event, session.is_some()));
    }));
    (sub, seen)
}

async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "a@b.com",
            "app_metadata": { "provider": "google", "providers": ["google"] },
            "aud": "authenticated"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_logout(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer at"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

const TOKEN_FRAGMENT: &str = "#access_token=at&refresh_token=rt&expires_in=3600&token_type=bearer";

#[tokio::test]
async fn get_session_restores_redirect_tokens() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mount_user(&server).await;
    let client = client_for(&server, TOKEN_FRAGMENT);
    let (_sub, seen) = record_events(&client);

    let session = client.get_session().await.unwrap().unwrap();

    assert_eq!(session.access_token, "at");
    assert_eq!(session.refresh_token.as_deref(), Some("rt"));
    assert_eq!(session.expires_in, Some(3600));
    assert_eq!(session.user.id, "u1");
    assert_eq!(session.user.display_email(), "a@b.com");
    assert_eq!(session.user.display_provider(), "google");
    assert_eq!(*seen.borrow(), vec![(AuthChangeEvent::SignedIn, true)]);

    // Held in memory; the user endpoint is not hit again.
    assert_eq!(client.get_session().await.unwrap(), Some(session));
}

#[tokio::test]
async fn get_session_maps_user_endpoint_error_body() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"code":401,"msg":"invalid JWT: token is expired"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server, TOKEN_FRAGMENT);
    let (_sub, seen) = record_events(&client);

    let err = client.get_session().await.unwrap_err();

    assert_eq!(err.message, "invalid JWT: token is expired");
    assert!(seen.borrow().is_empty());
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn sign_out_posts_logout_and_clears_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mount_user(&server).await;
    mount_logout(&server, 204, "").await;
    let client = client_for(&server, TOKEN_FRAGMENT);
    client.get_session().await.unwrap();
    let (_sub, seen) = record_events(&client);

    client.sign_out().await.unwrap();

    assert_eq!(client.get_session().await.unwrap(), None);
    assert_eq!(*seen.borrow(), vec![(AuthChangeEvent::SignedOut, false)]);
}

#[tokio::test]
async fn sign_out_treats_expired_session_statuses_as_signed_out() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    for status in [401, 403, 404] {
        let server = MockServer::start().await;
        mount_user(&server).await;
        mount_logout(&server, status, r#"{"msg":"session not found"}"#).await;
        let client = client_for(&server, TOKEN_FRAGMENT);
        client.get_session().await.unwrap();
        let (_sub, seen) = record_events(&client);

        client.sign_out().await.unwrap();

        assert_eq!(client.get_session().await.unwrap(), None, "status {status}");
        assert_eq!(*seen.borrow(), vec![(AuthChangeEvent::SignedOut, false)], "status {status}");
    }
}

#[tokio::test]
async fn sign_out_server_error_keeps_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mount_user(&server).await;
    mount_logout(&server, 500, r#"{"message":"database unavailable"}"#).await;
    let client = client_for(&server, TOKEN_FRAGMENT);
    let before = client.get_session().await.unwrap();
    let (_sub, seen) = record_events(&client);

    let err = client.sign_out().await.unwrap_err();

    assert_eq!(err.message, "database unavailable");
    assert_eq!(client.get_session().await.unwrap(), before);
    assert!(seen.borrow().is_empty());
}
