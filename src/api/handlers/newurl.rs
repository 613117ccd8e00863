//! Handler for short URL creation.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::newurl::{NewUrlRequest, NewUrlResponse};
use crate::application::services::LinkService;
use crate::error::AppError;
use crate::state::AppState;

/// Allocates a short code for a URL under a domain.
///
/// # Endpoint
///
/// `POST /newurl`
///
/// # Request Body
///
/// ```json
/// { "domain": "shortenurl.org", "url": "https://www.google.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "url": "https://www.google.com", "shortenUrl": "https://shortenurl.org/aZ3k9Qp0x" }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed or `domain`/`url` is missing or blank
/// - 500 if the store is unavailable or no unique code could be allocated
pub async fn new_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewUrlRequest>, JsonRejection>,
) -> Result<Json<NewUrlResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .allocate(&payload.domain, &payload.url)
        .await?;

    let shorten_url = LinkService::short_url(&link.domain, &link.code);

    Ok(Json(NewUrlResponse {
        url: link.original_url,
        shorten_url,
    }))
}
