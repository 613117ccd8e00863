//! DTOs for the short URL creation endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to create a short URL.
///
/// Missing fields deserialize as empty strings so that they are reported as
/// validation errors (400) rather than body rejections.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUrlRequest {
    /// Domain the code is scoped to; trimmed and lower-cased before use.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub domain: String,

    /// The original URL, stored unchanged. Only an empty string is rejected.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub url: String,
}

/// Created short URL.
#[derive(Debug, Serialize)]
pub struct NewUrlResponse {
    pub url: String,
    #[serde(rename = "shortenUrl")]
    pub shorten_url: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
