//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::infra::UserRepository;

/// Application state shared across handlers.
///
/// Holds the storage backend behind the repository contract; handlers never
/// see a concrete backend.
#[derive(Clone)]
pub struct AppState {
    /// User storage backend
    pub repository: Arc<dyn UserRepository>,
}

impl AppState {
    /// Create application state around a storage backend.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}
