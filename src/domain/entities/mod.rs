//! Core domain entities.
//!
//! - [`Link`] - A stored `(domain, code) -> original_url` mapping
//! - [`NewLink`] - Input for the durable insert performed by allocation

pub mod link;

pub use link::{Link, NewLink};
