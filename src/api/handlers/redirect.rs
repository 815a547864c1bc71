//! Handlers for short code resolution.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::application::services::Resolution;
use crate::domain::repositories::{MappingField, StoreError};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoints
///
/// - `GET /{code}`
/// - `GET /api/item/{code}`
///
/// Codes may contain `/` and `+`, so the code is taken from the rest of the path.
///
/// # Responses
///
/// - **302 Found** to the original URL when the code is known
/// - **302 Found** to the configured fallback URL when it is not
/// - **400 Bad Request** (`malformed_code`) when the code has the wrong
///   length or alphabet, or the path does not decode to UTF-8
pub async fn redirect_handler(
    uri: Uri,
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Path(code) = code.map_err(|_| AppError::malformed_code(raw_code(&uri)))?;

    let resolution = state.resolver_service.resolve(Some(&code)).await?;

    redirect_for(&state, resolution)
}

/// Handles `GET /api/item` with no code.
///
/// Always answers 400 `missing_code`.
pub async fn missing_code_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let resolution = state.resolver_service.resolve(None).await?;

    redirect_for(&state, resolution)
}

fn raw_code(uri: &Uri) -> &str {
    let path = uri.path();
    path.strip_prefix("/api/item/")
        .or_else(|| path.strip_prefix('/'))
        .unwrap_or(path)
}

fn redirect_for(state: &AppState, resolution: Resolution) -> Result<Response, AppError> {
    match resolution {
        Resolution::Found(original_url) => found(&original_url),
        Resolution::NotFound => found(&state.fallback_url),
    }
}

/// Builds a 302 response.
///
/// Targets that are not valid header values as stored (non-ASCII or control
/// characters) are sent in their percent-encoded `Url` serialization.
fn found(target: &str) -> Result<Response, AppError> {
    let location = location_header(target).ok_or_else(|| {
        AppError::Storage(StoreError::ValidationFailure {
            field: MappingField::OriginalUrl,
            reason: "not usable as a redirect target".to_string(),
        })
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn location_header(target: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(target).ok().or_else(|| {
        Url::parse(target)
            .ok()
            .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
    })
}
