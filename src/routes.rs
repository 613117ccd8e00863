//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /newurl`  - Allocate a short code for a URL under a domain
//! - `GET  /health`  - Health check: store and cache
//! - `GET  /{code}`  - Short link redirect, scoped by the Host header; other
//!   methods on this path are 404
//!
//! Static segments take precedence over the `{code}` capture, so `/health`
//! and `/newurl` never reach the redirect handler. Paths are matched exactly;
//! a trailing slash is a different path and gets 404.

use axum::Router;
use axum::routing::{any, get, post};

use crate::api::handlers::{health_handler, new_url_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and request tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/newurl", post(new_url_handler))
        .route("/health", get(health_handler))
        .route("/{code}", any(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
