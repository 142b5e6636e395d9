use std::collections::HashSet;

use blockpad::block::{Block, BlockTag};
use blockpad::storage::{load_blocks, save_blocks};

#[test]
fn test_save_then_load_round_trips_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");

    let mut heading = Block::paragraph("Title");
    heading.tag = BlockTag::Heading(1);
    heading.style.insert("color".to_string(), "#ff0000".into());
    let mut link = Block::paragraph("click");
    link.tag = BlockTag::Link;
    link.attributes
        .insert("href".to_string(), "https://example.com".into());
    link.attributes.insert("target".to_string(), "_blank".into());
    let blocks = vec![heading, link, Block::paragraph("plain text")];

    save_blocks(&path, &blocks).unwrap();
    let loaded = load_blocks(&path).unwrap();

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].tag, BlockTag::Heading(1));
    assert_eq!(loaded[0].contents, "Title");
    assert_eq!(loaded[0].style["color"].as_text(), Some("#ff0000"));
    assert_eq!(loaded[1].tag, BlockTag::Link);
    assert_eq!(
        loaded[1].attributes["href"].as_text(),
        Some("https://example.com")
    );
    assert_eq!(loaded[2].contents, "plain text");
}

#[test]
fn test_loaded_ids_are_pairwise_unique() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");

    // Hand-written documents may repeat ids; the loader must not trust them.
    std::fs::write(
        &path,
        r#"[
            {"id": 3, "tag": "p", "contents": "one"},
            {"id": 3, "tag": "p", "contents": "two"},
            {"id": 3, "tag": "p", "contents": "three"}
        ]"#,
    )
    .unwrap();

    let loaded = load_blocks(&path).unwrap();
    let ids: HashSet<u64> = loaded.iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), loaded.len());
}

#[test]
fn test_saved_file_is_valid_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");

    save_blocks(&path, &[Block::paragraph("hello")]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["contents"], "hello");
    assert_eq!(value[0]["tag"], "p");
}

#[test]
fn test_load_rejects_non_array_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, r#"{"contents": "not a list"}"#).unwrap();
    assert!(load_blocks(&path).is_err());
}
