mod config;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env().expect("invalid server config");
    if let Some(auth) = &config.auth {
        tracing::info!(url = %auth.url, "auth provider configured");
    }

    let state = state::AppState::new(config.auth);
    let app = routes::leptos_app(state).expect("leptos app init failed");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "auth-test listening");
    axum::serve(listener, app).await.expect("server failed");
}
