use std::sync::Arc;

use crate::{data::MovieStore, services::MetadataProvider, session::SessionStore};

/// Shared application state
///
/// The movie store is immutable after startup; only session state changes
/// while serving requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MovieStore>,
    pub provider: Arc<dyn MetadataProvider>,
    pub sessions: SessionStore,
    /// Base URL that poster paths are appended to
    pub image_base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        store: MovieStore,
        provider: Arc<dyn MetadataProvider>,
        sessions: SessionStore,
        image_base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            provider,
            sessions,
            image_base_url: image_base_url.into(),
        }
    }
}
