//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check: store and cache (public)
//! - `POST /api/item`        - Shorten a URL
//! - `GET  /api/item/{code}` - Resolve a short code (CORS enabled)
//! - `GET  /{code}`          - Resolve a short code (CORS enabled)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// Paths are not normalized: a trailing `/` can be part of a short code.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::item_routes())
        .with_state(state)
        .layer(tracing::layer())
}
