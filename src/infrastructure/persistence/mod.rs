//! Store implementations.
//!
//! - [`PgLinkStore`] - PostgreSQL, the durable source of truth
//! - [`MemoryLinkStore`] - In-process fallback when no database is configured
//!
//! Both enforce `(domain, code)` uniqueness inside the store itself.

pub mod memory_link_store;
pub mod pg_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
