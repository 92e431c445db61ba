//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers. The store sits behind a mutex so that each handler's
//! check-then-write sequence runs without interleaving with another
//! request's.

use filedocs_store::DocStore;
use tokio::sync::Mutex;

/// Shared state accessible from every Axum handler.
pub struct AppState {
    /// The document store and its index.
    pub store: Mutex<DocStore>,
}

impl AppState {
    pub fn new(store: DocStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}
