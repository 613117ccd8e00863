//! Domain layer containing the mapping entity, the store contract and the
//! error taxonomy shared by every other layer.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait implemented by the infrastructure layer
//! - [`errors`] - Allocation/lookup and store error types
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod errors;
pub mod repositories;
