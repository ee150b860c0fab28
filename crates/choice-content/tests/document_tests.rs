//! Tests for ConfigDocument

use choice_content::{ConfigDocument, Error, KeyPath};
use choice_store::{FileStore, MemoryStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"mode:
  selection: fast
  fast: 10
  slow:
    value: 20
    selection: a
    a: 1
    b: 2
name: demo
"#;

fn sample_file(temp: &TempDir) -> std::path::PathBuf {
    let path = temp.path().join("config.yaml");
    fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn test_read_top_level_key() {
    let temp = TempDir::new().unwrap();
    let doc = ConfigDocument::new(FileStore::new(sample_file(&temp)).unwrap());

    assert_eq!(doc.read("name").unwrap(), Some(json!("demo")));
}

#[test]
fn test_read_nested_path() {
    let temp = TempDir::new().unwrap();
    let doc = ConfigDocument::new(FileStore::new(sample_file(&temp)).unwrap());

    assert_eq!(doc.read(["mode", "slow", "value"]).unwrap(), Some(json!(20)));
}

#[test]
fn test_read_missing_key_is_no_value() {
    let temp = TempDir::new().unwrap();
    let doc = ConfigDocument::new(FileStore::new(sample_file(&temp)).unwrap());

    assert_eq!(doc.read("missing").unwrap(), None);
    assert_eq!(doc.read(["mode", "fast", "deeper"]).unwrap(), None);
}

#[test]
fn test_read_from_absent_file_is_no_value() {
    let temp = TempDir::new().unwrap();
    let doc = ConfigDocument::new(FileStore::new(temp.path().join("absent.yaml")).unwrap());

    assert_eq!(doc.read("mode").unwrap(), None);
}

#[test]
fn test_read_unparseable_file_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.yaml");
    fs::write(&path, "mode: {selection: [").unwrap();
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    assert!(matches!(doc.read("mode"), Err(Error::Store(_))));
}

#[test]
fn test_write_nested_persists_and_keeps_siblings() {
    let temp = TempDir::new().unwrap();
    let path = sample_file(&temp);
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    doc.write(["mode", "selection"], "slow").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, SAMPLE.replace("selection: fast", "selection: slow"));
}

#[test]
fn test_write_single_key() {
    let temp = TempDir::new().unwrap();
    let path = sample_file(&temp);
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    doc.write("name", "renamed").unwrap();
    doc.write("added", true).unwrap();

    assert_eq!(doc.read("name").unwrap(), Some(json!("renamed")));
    assert_eq!(doc.read("added").unwrap(), Some(json!(true)));
    assert_eq!(doc.read(["mode", "fast"]).unwrap(), Some(json!(10)));
}

#[test]
fn test_write_new_leaf_under_existing_group() {
    let store = MemoryStore::from_value(json!({"mode": {"selection": "fast", "fast": 10}}));
    let doc = ConfigDocument::new(&store);

    doc.write(["mode", "medium"], 15).unwrap();

    assert_eq!(
        store.snapshot(),
        json!({"mode": {"selection": "fast", "fast": 10, "medium": 15}})
    );
}

#[test]
fn test_write_through_terminal_leaves_file_untouched() {
    let temp = TempDir::new().unwrap();
    let path = sample_file(&temp);
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    let err = doc.write(["mode", "fast", "selection"], "x").unwrap_err();

    match err {
        Error::InvalidPath { path: bad, .. } => {
            assert_eq!(bad, KeyPath::from(["mode", "fast", "selection"]));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
}

#[test]
fn test_write_missing_parent_is_rejected() {
    let store = MemoryStore::from_value(json!({"mode": {"selection": "fast"}}));
    let doc = ConfigDocument::new(&store);

    let err = doc.write(["colour", "selection"], "red").unwrap_err();

    assert!(matches!(err, Error::InvalidPath { .. }));
    assert_eq!(store.saves(), 0);
    assert_eq!(store.snapshot(), json!({"mode": {"selection": "fast"}}));
}

#[test]
fn test_write_empty_path_is_rejected() {
    let store = MemoryStore::default();
    let doc = ConfigDocument::new(&store);

    let err = doc.write(KeyPath::new(), 1).unwrap_err();

    assert!(matches!(err, Error::InvalidPath { .. }));
    assert_eq!(store.saves(), 0);
}

#[test]
fn test_each_write_reloads_the_store() {
    let temp = TempDir::new().unwrap();
    let path = sample_file(&temp);
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    // Another process edits the file between calls
    fs::write(&path, SAMPLE.replace("name: demo", "name: edited\nextra: 1")).unwrap();
    doc.write(["mode", "selection"], "slow").unwrap();

    assert_eq!(doc.read("name").unwrap(), Some(json!("edited")));
    assert_eq!(doc.read("extra").unwrap(), Some(json!(1)));
    assert_eq!(doc.read(["mode", "selection"]).unwrap(), Some(json!("slow")));
}

#[test]
fn test_write_to_json_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"{"mode": {"selection": "fast", "fast": 10, "slow": 20}}"#).unwrap();
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    doc.write(["mode", "selection"], "slow").unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, json!({"mode": {"selection": "slow", "fast": 10, "slow": 20}}));
}

#[test]
fn test_write_refuses_document_it_cannot_save_faithfully() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yaml");
    let original = "ratio: .nan\nmode:\n  selection: fast\n  fast: 10\n  slow: 20\n";
    fs::write(&path, original).unwrap();
    let doc = ConfigDocument::new(FileStore::new(&path).unwrap());

    let err = doc.write(["mode", "selection"], "slow").unwrap_err();

    assert!(matches!(
        err,
        Error::Store(choice_store::Error::ConfigParse { .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
