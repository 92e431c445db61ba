//! Title extraction and validation.
//!
//! Directory and document titles double as path segments, so a title must
//! be a single visible segment: no separators, no NUL, no leading `.`.

use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Prefix marking an entry as hidden; hidden entries are never indexed.
pub const HIDDEN_MARKER: char = '.';

/// Extension (without the dot) of persisted documents.
pub const DOC_EXTENSION: &str = "json";

/// Extract the `title` field from a request body.
///
/// A body that is not an object, or whose `title` is absent, not a string,
/// or empty, yields [`StoreError::TitleNotSpecified`].
pub fn title_from_body(body: &Value) -> StoreResult<&str> {
    body.get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or(StoreError::TitleNotSpecified)
}

/// Reject titles that would be hidden or would escape their folder.
pub fn validate(title: &str) -> StoreResult<()> {
    if title.is_empty() {
        return Err(StoreError::TitleNotSpecified);
    }

    let hidden = title.starts_with(HIDDEN_MARKER);
    let escapes = title.contains(['/', '\\', '\0']);

    if hidden || escapes {
        return Err(StoreError::InvalidTitle {
            title: title.to_owned(),
        });
    }

    Ok(())
}

/// Whether a directory entry name is hidden.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}
