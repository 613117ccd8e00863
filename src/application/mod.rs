//! Application layer services implementing business logic.
//!
//! Services coordinate the store, the cache and the code generator, and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code allocation and lookup

pub mod services;
