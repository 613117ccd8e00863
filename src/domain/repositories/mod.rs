//! Store trait definitions for the domain layer.
//!
//! - [`LinkStore`] - Unique insert and keyed lookup of mappings
//!
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.

pub mod link_store;

pub use link_store::LinkStore;

#[cfg(test)]
pub use link_store::MockLinkStore;
