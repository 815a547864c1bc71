//! API route configuration.

use crate::api::handlers::{missing_code_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

/// Shorten and resolve routes.
///
/// # Endpoints
///
/// - `POST /api/item`          - Shorten a URL
/// - `GET  /api/item`          - Always `missing_code`
/// - `GET  /api/item/{*code}`  - Redirect to the original URL (or the fallback)
/// - `GET  /{*code}`           - Same redirect, at the path short URLs point to
///
/// Resolve routes answer with permissive CORS headers so browsers can follow
/// them from other origins.
pub fn item_routes() -> Router<AppState> {
    let cors = CorsLayer::permissive();

    Router::new()
        .route(
            "/api/item",
            post(shorten_handler).merge(get(missing_code_handler).layer(cors.clone())),
        )
        .route(
            "/api/item/{*code}",
            get(redirect_handler).layer(cors.clone()),
        )
        .route("/{*code}", get(redirect_handler).layer(cors))
}
