use server::{app, config, state};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Load the games dataset. A failed load is terminal: nothing can be
    // served without it.
    tracing::info!(path = %config.dataset_path, "Loading dataset...");
    let records = explorer_core::dataset::load_dataset(&config.dataset_path)
        .expect("Failed to load dataset");

    let state = state::AppState::new(records);
    let app = app(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
