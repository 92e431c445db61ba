//! The document store: one folder per directory, one `.json` file per
//! document, mirrored by an in-memory [`DirIndex`].
//!
//! Every mutating operation validates against the index first, performs its
//! filesystem steps, and only then updates the index. When a later
//! filesystem step fails the earlier ones are undone on a best-effort basis,
//! so the index never records a change the disk did not receive.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::index::{self, DirIndex};
use crate::title::{self, DOC_EXTENSION};

/// Filesystem-backed store of JSON documents grouped into directories.
#[derive(Debug)]
pub struct DocStore {
    root: PathBuf,
    index: DirIndex,
}

impl DocStore {
    /// Open the store rooted at `root`, creating the folder if needed and
    /// building the index from its current contents.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        let index = index::scan(&root).await?;
        info!(
            root = %root.display(),
            dirs = index.len(),
            "document store opened"
        );
        Ok(Self { root, index })
    }

    /// The storage root folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The current directory/document index.
    pub fn index(&self) -> &DirIndex {
        &self.index
    }

    fn dir_path(&self, dir: &str) -> PathBuf {
        self.root.join(dir)
    }

    fn doc_path(&self, dir: &str, doc: &str) -> PathBuf {
        self.dir_path(dir).join(format!("{doc}.{DOC_EXTENSION}"))
    }

    fn require_dir(&self, dir: &str) -> StoreResult<()> {
        if self.index.contains_dir(dir) {
            Ok(())
        } else {
            Err(StoreError::DirectoryNotFound {
                title: dir.to_owned(),
            })
        }
    }

    // -- Directories ---------------------------------------------------------

    /// Create an empty directory named `title`.
    pub async fn create_dir(&mut self, title: &str) -> StoreResult<()> {
        title::validate(title)?;
        if self.index.contains_dir(title) {
            return Err(StoreError::DirectoryExists {
                title: title.to_owned(),
            });
        }

        let path = self.dir_path(title);
        tokio::fs::create_dir(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        self.index.insert_dir(title);
        info!(dir = %title, "created directory");
        Ok(())
    }

    /// Rename directory `from` to `to`, keeping its documents.
    pub async fn rename_dir(&mut self, from: &str, to: &str) -> StoreResult<()> {
        title::validate(to)?;
        if self.index.contains_dir(to) {
            return Err(StoreError::DirectoryExists {
                title: to.to_owned(),
            });
        }
        self.require_dir(from)?;

        let old_path = self.dir_path(from);
        let new_path = self.dir_path(to);
        tokio::fs::rename(&old_path, &new_path)
            .await
            .map_err(|e| StoreError::io(&old_path, e))?;

        self.index.rename_dir(from, to);
        info!(from = %from, to = %to, "renamed directory");
        Ok(())
    }

    // -- Documents -----------------------------------------------------------

    /// Read and parse the document `doc` of directory `dir`.
    pub async fn read_doc(&self, dir: &str, doc: &str) -> StoreResult<Value> {
        self.require_dir(dir)?;
        if !self.index.contains_doc(dir, doc) {
            return Err(StoreError::DocumentNotFound {
                dir: dir.to_owned(),
                title: doc.to_owned(),
            });
        }

        let path = self.doc_path(dir, doc);
        debug!(path = %path.display(), "reading document");
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Persist `body` as a new document of `dir`, titled by its `title`
    /// field. Returns the title.
    ///
    /// The file is created exclusively: an unindexed file already sitting
    /// at the target path is reported as an I/O error, never overwritten.
    pub async fn create_doc(&mut self, dir: &str, body: &Value) -> StoreResult<String> {
        self.create_doc_with(dir, body, write_file).await
    }

    async fn create_doc_with<W, Fut>(
        &mut self,
        dir: &str,
        body: &Value,
        write: W,
    ) -> StoreResult<String>
    where
        W: FnOnce(PathBuf, Vec<u8>) -> Fut,
        Fut: Future<Output = io::Result<()>>,
    {
        self.require_dir(dir)?;
        let doc = title::title_from_body(body)?;
        title::validate(doc)?;
        if self.index.contains_doc(dir, doc) {
            return Err(StoreError::DocumentExists {
                title: doc.to_owned(),
            });
        }

        let bytes = serde_json::to_vec(body)?;
        let path = self.doc_path(dir, doc);
        create_exclusive(&path, bytes, write).await?;

        self.index.push_doc(dir, doc);
        info!(dir = %dir, doc = %doc, "created document");
        Ok(doc.to_owned())
    }

    /// Overwrite document `doc` of `dir` with `body`, renaming it first when
    /// the body's `title` differs from `doc`. Returns the resulting title.
    pub async fn update_doc(&mut self, dir: &str, doc: &str, body: &Value) -> StoreResult<String> {
        self.update_doc_with(dir, doc, body, write_file).await
    }

    async fn update_doc_with<W, Fut>(
        &mut self,
        dir: &str,
        doc: &str,
        body: &Value,
        write: W,
    ) -> StoreResult<String>
    where
        W: FnOnce(PathBuf, Vec<u8>) -> Fut,
        Fut: Future<Output = io::Result<()>>,
    {
        self.require_dir(dir)?;
        let new_doc = title::title_from_body(body)?;
        title::validate(new_doc)?;
        if !self.index.contains_doc(dir, doc) {
            return Err(StoreError::DocumentNotFound {
                dir: dir.to_owned(),
                title: doc.to_owned(),
            });
        }
        let renaming = new_doc != doc;
        if renaming && self.index.contains_doc(dir, new_doc) {
            return Err(StoreError::DocumentExists {
                title: new_doc.to_owned(),
            });
        }

        let bytes = serde_json::to_vec(body)?;
        let old_path = self.doc_path(dir, doc);
        let new_path = self.doc_path(dir, new_doc);
        rename_then_write(&old_path, &new_path, bytes, write).await?;

        if renaming {
            self.index.rename_doc(dir, doc, new_doc);
            info!(dir = %dir, from = %doc, to = %new_doc, "renamed document");
        }
        info!(dir = %dir, doc = %new_doc, "updated document");
        Ok(new_doc.to_owned())
    }
}

// -- Filesystem steps ---------------------------------------------------------

/// Replace the contents of `path` with `bytes`.
async fn write_file(path: PathBuf, bytes: Vec<u8>) -> io::Result<()> {
    tokio::fs::write(path, bytes).await
}

/// Create `path`, failing if it exists, then fill it through `write`.
/// The file is removed again when `write` fails.
async fn create_exclusive<W, Fut>(path: &Path, bytes: Vec<u8>, write: W) -> StoreResult<()>
where
    W: FnOnce(PathBuf, Vec<u8>) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    if let Err(e) = write(path.to_path_buf(), bytes).await {
        undo("remove partial document", tokio::fs::remove_file(path).await);
        return Err(StoreError::io(path, e));
    }
    Ok(())
}

/// Move `from` to `to` (when they differ), then fill `to` through `write`.
/// The move is reverted when `write` fails.
async fn rename_then_write<W, Fut>(
    from: &Path,
    to: &Path,
    bytes: Vec<u8>,
    write: W,
) -> StoreResult<()>
where
    W: FnOnce(PathBuf, Vec<u8>) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let renaming = from != to;
    if renaming {
        tokio::fs::rename(from, to)
            .await
            .map_err(|e| StoreError::io(from, e))?;
    }

    if let Err(e) = write(to.to_path_buf(), bytes).await {
        if renaming {
            undo("restore document name", tokio::fs::rename(to, from).await);
        }
        return Err(StoreError::io(to, e));
    }
    Ok(())
}

/// Log a failed rollback step; the caller still reports its original error.
fn undo(action: &str, result: io::Result<()>) {
    if let Err(e) = result {
        warn!(action, error = %e, "rollback step failed");
    }
}
