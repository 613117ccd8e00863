//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with per-backend checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable (cache problems only mark the body `degraded`)
/// - **503 Service Unavailable**: Store unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "backend": "postgres" },
///     "cache": { "status": "ok", "backend": "redis" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store = state.link_service.store();
    let cache = state.link_service.cache();

    let store_ok = store.health_check().await;
    let store_check = CheckStatus {
        status: if store_ok { "ok" } else { "error" }.to_string(),
        backend: store.backend_name().to_string(),
        message: match (store_ok, store.backend_name()) {
            (false, _) => Some("Store unreachable".to_string()),
            (true, "memory") => Some("In-memory fallback, mappings are not durable".to_string()),
            (true, _) => None,
        },
    };

    let cache_check = if !cache.is_enabled() {
        CheckStatus {
            status: "disabled".to_string(),
            backend: cache.backend_name().to_string(),
            message: None,
        }
    } else if cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            backend: cache.backend_name().to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            backend: cache.backend_name().to_string(),
            message: Some("Cache unreachable, serving from store".to_string()),
        }
    };

    let status = if !store_ok {
        "unhealthy"
    } else if cache_check.status == "error" {
        "degraded"
    } else {
        "healthy"
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            cache: cache_check,
        },
    };

    if store_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
