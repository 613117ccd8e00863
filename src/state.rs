//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;

/// Application state shared across all request handlers.
///
/// Cloned per request; the service behind it is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }
}
