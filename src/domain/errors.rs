//! Error taxonomy for allocation, lookup and storage.
//!
//! Cache failures are deliberately absent here: they are absorbed inside
//! [`crate::application::services::LinkService`] and never cross this layer.
//! See [`crate::infrastructure::cache::CacheError`].

use thiserror::Error;

/// Failure reported by a [`crate::domain::repositories::LinkStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The `(domain, code)` pair is already taken. Recovered by the allocation
    /// retry loop and never surfaced to callers.
    #[error("code already taken for this domain")]
    Collision,

    /// Any other backend failure: connectivity, unexpected constraint, etc.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of an allocation or lookup that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Malformed or missing input (empty domain, empty URL).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No mapping exists for the `(domain, code)` pair, or the code does not
    /// have the shape of a short code at all.
    #[error("short link not found")]
    NotFound,

    /// Every allocation attempt collided with an existing code.
    #[error("no unique code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// The durable store failed for a reason other than a collision.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The secure random source failed and the entropy policy forbids
    /// substituting a weaker source.
    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}

impl From<StoreError> for LinkError {
    fn from(e: StoreError) -> Self {
        match e {
            // Only reachable if a store reports a collision outside of insert.
            StoreError::Collision => LinkError::StoreUnavailable(e.to_string()),
            StoreError::Unavailable(msg) => LinkError::StoreUnavailable(msg),
        }
    }
}
