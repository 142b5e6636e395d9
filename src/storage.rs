//! Block document files.
//!
//! A document is stored as a JSON array of block records, the same shape the
//! change callback delivers. Ids from disk are discarded on load and
//! reassigned from the session counter so the uniqueness invariant cannot be
//! violated by hand-edited files.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::block::{Block, fresh_id};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid block document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a block document from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid block
/// document.
pub fn load_blocks(path: &Path) -> Result<Vec<Block>, StorageError> {
    let text = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut blocks: Vec<Block> = serde_json::from_str(&text)?;
    for block in &mut blocks {
        block.id = fresh_id();
    }
    Ok(blocks)
}

/// Write a block document to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_blocks(path: &Path, blocks: &[Block]) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(blocks)?;
    fs::write(path, format!("{json}\n")).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::block::BlockTag;

    #[test]
    fn test_load_accepts_original_document_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 7, "tag": "h1", "contents": "Title"},
                {"tag": "a", "contents": "here", "attributes": {"href": "https://example.com", "target": "_blank"}}
            ]"#,
        )
        .unwrap();

        let blocks = load_blocks(&path).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tag, BlockTag::Heading(1));
        assert_eq!(blocks[1].tag, BlockTag::Link);
        assert_eq!(
            blocks[1].attributes["href"].as_text(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_load_reassigns_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "contents": "a"}, {"id": 1, "contents": "b"}]"#,
        )
        .unwrap();

        let blocks = load_blocks(&path).unwrap();
        assert_ne!(blocks[0].id, blocks[1].id);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_blocks(&path), Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load_blocks(&path), Err(StorageError::Read { .. })));
    }
}
