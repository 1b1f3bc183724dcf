//! HTTP service for the opening-explorer dashboard.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router over loaded state. Extracted so tests can
/// serve it on an ephemeral port.
pub fn app(state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Views
        .route("/api/heatmap", get(routes::heatmap::get_heatmap))
        .route("/api/opening-brackets", get(routes::brackets::get_opening_brackets))
        .route("/api/opening-tree", get(routes::opening_tree::get_opening_tree))
        .route("/api/board", get(routes::board::get_board))
        // Cross-view filter state
        .route("/api/filters", get(routes::filters::get_filters))
        .route("/api/filters/eco", post(routes::filters::set_eco_filter))
        // Shared state
        .layer(Extension(state))
        .layer(cors)
}
