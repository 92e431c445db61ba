//! In-memory index of directories and the documents they contain.
//!
//! The index is derived from disk once by [`scan`] and then kept in step
//! with every mutation made through [`DocStore`](crate::DocStore). Directory
//! keys are kept sorted; each directory's document list keeps the order in
//! which titles were discovered or appended.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::title::{DOC_EXTENSION, is_hidden};

/// Directory title -> ordered document titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirIndex {
    dirs: BTreeMap<String, Vec<String>>,
}

impl DirIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed directories.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn contains_dir(&self, dir: &str) -> bool {
        self.dirs.contains_key(dir)
    }

    /// Document titles of `dir`, or `None` if the directory is not indexed.
    pub fn docs(&self, dir: &str) -> Option<&[String]> {
        self.dirs.get(dir).map(Vec::as_slice)
    }

    pub fn contains_doc(&self, dir: &str, doc: &str) -> bool {
        self.docs(dir)
            .is_some_and(|docs| docs.iter().any(|d| d == doc))
    }

    /// Iterate over `(directory, documents)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.dirs.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Register an empty directory. Returns `false` if it was already present.
    pub fn insert_dir(&mut self, dir: impl Into<String>) -> bool {
        let dir = dir.into();
        if self.dirs.contains_key(&dir) {
            return false;
        }
        self.dirs.insert(dir, Vec::new());
        true
    }

    /// Move the document list of `from` to the key `to`.
    ///
    /// Returns `false` (and leaves the index untouched) if `from` is absent.
    pub fn rename_dir(&mut self, from: &str, to: impl Into<String>) -> bool {
        match self.dirs.remove(from) {
            Some(docs) => {
                self.dirs.insert(to.into(), docs);
                true
            }
            None => false,
        }
    }

    /// Append a document title to `dir`. Returns `false` if `dir` is absent.
    pub fn push_doc(&mut self, dir: &str, doc: impl Into<String>) -> bool {
        match self.dirs.get_mut(dir) {
            Some(docs) => {
                docs.push(doc.into());
                true
            }
            None => false,
        }
    }

    /// Replace every occurrence of `from` with `to` in `dir`, keeping its
    /// position. Returns `false` if `dir` is absent.
    pub fn rename_doc(&mut self, dir: &str, from: &str, to: &str) -> bool {
        match self.dirs.get_mut(dir) {
            Some(docs) => {
                for doc in docs.iter_mut().filter(|d| d.as_str() == from) {
                    to.clone_into(doc);
                }
                true
            }
            None => false,
        }
    }
}

/// Build the index from the folders and `.json` files under `root`.
///
/// Creates `root` (and its parents) when it does not exist, yielding an
/// empty index. Hidden entries, non-folders at the top level, and anything
/// that is not a regular `.json` file inside a folder are skipped.
pub async fn scan(root: &Path) -> StoreResult<DirIndex> {
    let mut index = DirIndex::new();

    if !tokio::fs::try_exists(root)
        .await
        .map_err(|e| StoreError::io(root, e))?
    {
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|e| StoreError::io(root, e))?;
        info!(root = %root.display(), "created empty storage root");
        return Ok(index);
    }

    info!(root = %root.display(), "scanning storage root");

    let mut entries = tokio::fs::read_dir(root)
        .await
        .map_err(|e| StoreError::io(root, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StoreError::io(root, e))?
    {
        let path = entry.path();
        let Some(dir_title) = utf8_name(&path) else {
            continue;
        };
        if is_hidden(dir_title) {
            continue;
        }
        // Follow symlinks the same way a plain `is_dir` check would.
        let is_dir = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        let docs = scan_dir(&path).await?;
        info!(dir = %dir_title, docs = docs.len(), "indexed directory");

        index.insert_dir(dir_title);
        for doc in docs {
            index.push_doc(dir_title, doc);
        }
    }

    Ok(index)
}

/// Titles of the visible `.json` regular files directly inside `dir`.
async fn scan_dir(dir: &Path) -> StoreResult<Vec<String>> {
    let mut docs = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| StoreError::io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StoreError::io(dir, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(DOC_EXTENSION) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "skipping document with non UTF-8 name");
            continue;
        };
        if is_hidden(stem) {
            continue;
        }
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        debug!(doc = %stem, "indexed document");
        docs.push(stem.to_owned());
    }

    Ok(docs)
}

fn utf8_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(name) => Some(name),
        None => {
            warn!(path = %path.display(), "skipping entry with non UTF-8 name");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirIndex {
        let mut index = DirIndex::new();
        index.insert_dir("notes");
        index.push_doc("notes", "a");
        index.push_doc("notes", "b");
        index.push_doc("notes", "c");
        index
    }

    #[test]
    fn insert_dir_is_unique() {
        let mut index = DirIndex::new();
        assert!(index.insert_dir("notes"));
        assert!(!index.insert_dir("notes"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn rename_dir_moves_documents() {
        let mut index = sample();
        assert!(index.rename_dir("notes", "journal"));
        assert!(!index.contains_dir("notes"));
        assert_eq!(index.docs("journal").unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn rename_missing_dir_is_noop() {
        let mut index = sample();
        assert!(!index.rename_dir("missing", "other"));
        assert_eq!(index, sample());
    }

    #[test]
    fn rename_doc_keeps_position() {
        let mut index = sample();
        assert!(index.rename_doc("notes", "b", "z"));
        assert_eq!(index.docs("notes").unwrap(), ["a", "z", "c"]);
        assert!(!index.contains_doc("notes", "b"));
    }

    #[test]
    fn push_doc_to_missing_dir_fails() {
        let mut index = DirIndex::new();
        assert!(!index.push_doc("missing", "a"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut index = sample();
        index.insert_dir("empty");
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"empty": [], "notes": ["a", "b", "c"]})
        );
    }

    #[tokio::test]
    async fn scan_creates_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested").join("files");

        let index = scan(&root).await.unwrap();
        assert!(index.is_empty());
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn scan_skips_hidden_and_foreign_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        std::fs::create_dir(root.join("notes")).unwrap();
        std::fs::create_dir(root.join(".git")).unwrap();
        std::fs::create_dir(root.join("notes").join("sub.json")).unwrap();
        std::fs::write(root.join("loose.json"), "{}").unwrap();
        std::fs::write(root.join("notes").join("a.json"), "{}").unwrap();
        std::fs::write(root.join("notes").join("b.v2.json"), "{}").unwrap();
        std::fs::write(root.join("notes").join(".hidden.json"), "{}").unwrap();
        std::fs::write(root.join("notes").join("readme.md"), "").unwrap();
        std::fs::write(root.join("notes").join("noext"), "").unwrap();

        let index = scan(root).await.unwrap();

        assert_eq!(index.len(), 1);
        let mut docs = index.docs("notes").unwrap().to_vec();
        docs.sort();
        assert_eq!(docs, ["a", "b.v2"]);
    }
}
