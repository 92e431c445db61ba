//! Plain-text rendering of a [`DirIndex`].

use filedocs_store::DirIndex;

/// Render the index as an indented listing, one directory per block:
///
/// ```text
/// notes/
///   a.json
///   b.json
/// ```
pub fn render(index: &DirIndex) -> String {
    let mut out = String::new();
    for (dir, docs) in index.iter() {
        out.push_str(&format!("{dir}/\n"));
        for doc in docs {
            out.push_str(&format!("  {doc}.json\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_directories_and_documents() {
        let mut index = DirIndex::new();
        index.insert_dir("notes");
        index.push_doc("notes", "a");
        index.push_doc("notes", "b");
        index.insert_dir("empty");

        assert_eq!(render(&index), "empty/\nnotes/\n  a.json\n  b.json\n");
    }

    #[test]
    fn empty_index_renders_nothing() {
        assert_eq!(render(&DirIndex::new()), "");
    }
}
