//! Public auth provider settings for the browser.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// `GET /api/config`: provider URL and public anon key.
pub async fn auth_config(State(state): State<AppState>) -> Response {
    let Some(auth) = &state.auth else {
        return (StatusCode::SERVICE_UNAVAILABLE, "auth provider not configured").into_response();
    };
    Json(auth.as_ref().clone()).into_response()
}
