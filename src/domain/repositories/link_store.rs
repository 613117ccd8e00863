//! Store trait for domain-scoped short code mappings.

use crate::domain::entities::NewLink;
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Authoritative storage for mappings.
///
/// The store itself enforces uniqueness of `(domain, code)`: of any number of
/// concurrent inserts for the same pair, exactly one succeeds and the others
/// observe [`StoreError::Collision`]. Callers must never emulate this with a
/// separate existence check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL, durable
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a mapping under the `(domain, code)` uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Collision`] if the pair already exists and
    /// [`StoreError::Unavailable`] on any other failure.
    async fn insert_unique(&self, new_link: &NewLink) -> Result<(), StoreError>;

    /// Looks up the original URL for a `(domain, code)` pair.
    ///
    /// Absence is `Ok(None)`, never an error.
    async fn find(&self, domain: &str, code: &str) -> Result<Option<String>, StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output (`postgres`, `memory`).
    fn backend_name(&self) -> &'static str;
}
