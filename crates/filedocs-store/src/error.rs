//! Error types for the filedocs-store crate.
//!
//! All store operations return [`StoreError`] via [`StoreResult`].
//! Validation variants carry the title that was rejected so the web layer
//! can echo it back to the client.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request body carried no usable `title`.
    #[error("Title not specified!")]
    TitleNotSpecified,

    /// The title cannot be used as a single visible path segment.
    #[error("Invalid title <{title}>!")]
    InvalidTitle { title: String },

    /// A directory with this title is already indexed.
    ///
    /// Older deployments spelled the leading `A` as Cyrillic U+0410 in this
    /// message and in [`StoreError::DocumentExists`].
    #[error("A directory with the title <{title}> already exists!")]
    DirectoryExists { title: String },

    /// No directory with this title is indexed.
    #[error("Directory <{title}> not found!")]
    DirectoryNotFound { title: String },

    /// A document with this title is already indexed in the directory.
    #[error("A doc with the title <{title}> already exists!")]
    DocumentExists { title: String },

    /// The document is not indexed in the directory.
    #[error("File not found!")]
    DocumentNotFound { dir: String, title: String },

    /// A filesystem operation failed.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Attach a path to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error was caused by the client's request rather than by
    /// the storage backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Json(_))
    }
}
