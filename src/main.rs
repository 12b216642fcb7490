use blud_api::app::{self, AppState};
use blud_api::config;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up APP_ENV, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("starting BLUD API in {:?} mode", config.environment);

    let state = AppState::in_memory();
    if config.security.seed_admin {
        if let Err(e) = app::seed_admin(&state).await {
            tracing::error!("failed to seed administrator account: {}", e);
        }
    }

    let app = app::router(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("BLUD_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("BLUD API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
