//! Web interface for filedocs.
//!
//! This crate exposes a [`DocStore`](filedocs_store::DocStore) over a small
//! HTTP/JSON API rooted at `/api`:
//!
//! - A readiness probe at `/api`.
//! - Directory listing, creation and renaming under `/api/dirs`.
//! - Document read, creation and update under `/api/dirs/{dir}/docs`.
//!
//! Every response carries permissive CORS headers.

pub mod api;
pub mod server;
pub mod state;

use std::path::PathBuf;

pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
    /// Folder holding one subfolder per directory.
    pub root: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 5000,
            root: PathBuf::from("files"),
        }
    }
}
