//! In-memory fallback store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::NewLink;
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkStore;

/// Non-durable store used when no database is configured or reachable.
///
/// Readers share the lock; an insert holds the write lock across both the
/// existence check and the insert, so two allocations can never both claim
/// the same `(domain, code)` pair.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<(String, String), String>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert_unique(&self, new_link: &NewLink) -> Result<(), StoreError> {
        let key = (new_link.domain.clone(), new_link.code.clone());
        let mut links = self.links.write().await;

        match links.entry(key) {
            Entry::Occupied(_) => Err(StoreError::Collision),
            Entry::Vacant(slot) => {
                slot.insert(new_link.original_url.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, domain: &str, code: &str) -> Result<Option<String>, StoreError> {
        let links = self.links.read().await;
        Ok(links
            .get(&(domain.to_string(), code.to_string()))
            .cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
