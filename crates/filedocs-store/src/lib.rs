//! # filedocs-store
//!
//! Storage engine for filedocs.
//!
//! Documents are JSON objects persisted one per file under a root folder,
//! grouped into directories that are plain subfolders:
//!
//! ```text
//! <root>/
//! ├── notes/
//! │   ├── a.json
//! │   └── b.json
//! └── journal/
//!     └── monday.json
//! ```
//!
//! [`DocStore`] owns the root path and an in-memory [`DirIndex`] built once
//! at open time. All reads consult the index before touching the disk, and
//! every mutation keeps the two in step.
//!
//! ## Quick start
//!
//! ```ignore
//! use filedocs_store::DocStore;
//! use serde_json::json;
//!
//! let mut store = DocStore::open("files").await?;
//! store.create_dir("notes").await?;
//! store.create_doc("notes", &json!({"title": "a", "x": 1})).await?;
//! let doc = store.read_doc("notes", "a").await?;
//! ```

pub mod error;
pub mod index;
pub mod store;
pub mod title;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{StoreError, StoreResult};
pub use index::{DirIndex, scan};
pub use store::DocStore;
