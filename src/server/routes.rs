//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(handlers::api_search))
        .route("/api/search/query", get(handlers::api_search_query))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
