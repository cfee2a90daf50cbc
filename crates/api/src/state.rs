//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::DirectoryStore;
use crate::error::AppError;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store is absent when the
/// database is not configured; data handlers then fail closed.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Option<Arc<dyn DirectoryStore>>,
}

impl AppState {
    /// Create state backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store: Some(store) }),
        }
    }

    /// Create state without a store.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            inner: Arc::new(AppStateInner { store: None }),
        }
    }

    /// Get the directory store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if no store is configured.
    pub fn store(&self) -> Result<&Arc<dyn DirectoryStore>, AppError> {
        self.inner.store.as_ref().ok_or(AppError::Configuration)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configured", &self.inner.store.is_some())
            .finish()
    }
}
