//! Handler for the shorten endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/item`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a/b" }
/// ```
///
/// or `url=https%3A%2F%2Fexample.com%2Fa%2Fb` as form-urlencoded.
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a/b",
///   "shortUrl": "http://localhost/7R1BN2R7"
/// }
/// ```
///
/// Submitting the same URL again returns the same body without a new write.
///
/// # Errors
///
/// - 400 `missing_input` if no URL is supplied
/// - 400 `malformed_url` if the URL is not well formed
/// - 500 `persistence_failure` if the mapping cannot be stored
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: ShortenRequest,
) -> Result<Json<ShortenResponse>, AppError> {
    let shortened = state.shortener_service.shorten(payload.url).await?;

    Ok(Json(ShortenResponse {
        original_url: shortened.original_url,
        short_url: shortened.short_url,
    }))
}
