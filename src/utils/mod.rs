//! Utility functions for code generation, storage errors and request handling.
//!
//! - [`code_generator`] - Short code generation, code shape and domain normalization
//! - [`db_error`] - Classification of PostgreSQL errors
//! - [`extract_domain`] - Domain extraction from HTTP headers

pub mod code_generator;
pub mod db_error;
pub mod extract_domain;
