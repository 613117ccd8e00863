#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use domain_shortener::application::services::LinkService;
use domain_shortener::domain::entities::NewLink;
use domain_shortener::domain::errors::StoreError;
use domain_shortener::domain::repositories::LinkStore;
use domain_shortener::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use domain_shortener::infrastructure::persistence::MemoryLinkStore;
use domain_shortener::routes::app_router;
use domain_shortener::state::AppState;
use domain_shortener::utils::code_generator::{CodeGenerator, EntropyPolicy};
use std::sync::Arc;
use std::time::Duration;

/// Cache that is enabled but fails every operation.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get_url(&self, _domain: &str, _code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_url(&self, _domain: &str, _code: &str, _url: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Store whose every call fails, as a Postgres outage would.
pub struct DownStore;

#[async_trait]
impl LinkStore for DownStore {
    async fn insert_unique(&self, _new_link: &NewLink) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    async fn find(&self, _domain: &str, _code: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

pub fn create_state(store: Arc<dyn LinkStore>, cache: Arc<dyn CacheService>) -> AppState {
    let service = LinkService::new(store, cache, CodeGenerator::new(EntropyPolicy::Strict))
        .with_cache_timeout(Duration::from_millis(50));
    AppState::new(Arc::new(service))
}

pub fn create_memory_state() -> AppState {
    create_state(Arc::new(MemoryLinkStore::new()), Arc::new(NullCache::new()))
}

pub fn create_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}
