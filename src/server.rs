//! HTTP server initialization and runtime setup.
//!
//! Connects the backends with bounded timeouts, degrading instead of failing:
//! an unreachable Postgres selects the in-memory store and an unreachable
//! Redis disables caching. Then serves until Ctrl-C or SIGTERM.

use crate::application::services::LinkService;
use crate::config::{Config, mask_connection_string};
use crate::domain::repositories::LinkStore;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryLinkStore, PgLinkStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::CodeGenerator;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::timeout;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL, or in-memory fallback)
/// - Schema creation
/// - Redis cache (or NullCache fallback)
/// - Link service and Axum HTTP server
///
/// # Errors
///
/// Returns an error if the listen address is invalid, the bind fails, or the
/// server exits with an error. Backend failures never abort startup.
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await;
    let cache = connect_cache(&config).await;

    let generator = CodeGenerator::new(config.entropy_policy());
    let link_service = LinkService::new(store, cache, generator)
        .with_max_attempts(config.allocation_max_attempts)
        .with_cache_timeout(config.cache_timeout());

    let state = AppState::new(Arc::new(link_service));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects Postgres and creates the schema, or falls back to memory.
pub async fn connect_store(config: &Config) -> Arc<dyn LinkStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("No database configured, using in-memory store (mappings are not durable)");
        return Arc::new(MemoryLinkStore::new());
    };

    let connect_timeout = config.connect_timeout();
    let attempt = async {
        let store =
            PgLinkStore::connect(database_url, config.db_max_connections, connect_timeout).await?;
        store.ensure_schema().await?;
        Ok::<_, sqlx::Error>(store)
    };

    match timeout(connect_timeout, attempt).await {
        Ok(Ok(store)) => {
            tracing::info!(
                "Store enabled (PostgreSQL at {})",
                mask_connection_string(database_url)
            );
            Arc::new(store)
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to connect to PostgreSQL: {}. Using in-memory store.", e);
            Arc::new(MemoryLinkStore::new())
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = config.connect_timeout_ms,
                "PostgreSQL connect timed out. Using in-memory store."
            );
            Arc::new(MemoryLinkStore::new())
        }
    }
}

/// Connects Redis, or falls back to a disabled cache.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match timeout(config.connect_timeout(), RedisCache::connect(redis_url)).await {
        Ok(Ok(redis)) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = config.connect_timeout_ms,
                "Redis connect timed out. Using NullCache."
            );
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
