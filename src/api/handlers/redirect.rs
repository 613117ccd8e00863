//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;
use crate::utils::extract_domain::extract_domain_from_headers;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`; any other method gets 404.
///
/// # Request Flow
///
/// 1. Reject paths (including segments that do not decode to UTF-8) that are not a 9-character alphanumeric code (404)
/// 2. Take the domain from the Host header (port stripped, lower-cased)
/// 3. Resolve through the cache, falling back to the store
/// 4. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 if the code is malformed, the Host header is unusable, or no
/// mapping exists. Returns 500 if the store is unavailable.
pub async fn redirect_handler(
    method: Method,
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let code = match code {
        Ok(Path(code)) if method == Method::GET && is_valid_code(&code) => code,
        _ => return Err(AppError::not_found("Short link not found", json!({}))),
    };

    let domain = extract_domain_from_headers(&headers)
        .ok_or_else(|| AppError::not_found("Short link not found", json!({})))?;

    let original_url = state.link_service.resolve(&domain, &code).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, original_url)],
    )
        .into_response())
}
