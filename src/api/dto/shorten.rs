//! DTOs for the shorten endpoint.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Request to shorten a URL.
///
/// Accepted as a JSON body (`{"url": "..."}`) or as a form-urlencoded body
/// (`url=...`). Any other body carries no URL and yields
/// [`AppError::MissingInput`] from the shortening service.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

impl<S> FromRequest<S> for ShortenRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(payload) = Json::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::bad_request("Invalid JSON body", json!({ "reason": e.body_text() }))
                })?;
            Ok(payload)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::bad_request("Invalid form body", json!({ "reason": e.body_text() }))
                })?;
            Ok(payload)
        } else {
            Ok(Self::default())
        }
    }
}

/// Successful shorten response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}
