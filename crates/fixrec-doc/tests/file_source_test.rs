//! Integration tests for reading documents from disk

use std::io::Write;

use fixrec_doc::{DocumentSource, SourceError, YamlFileSource};
use tempfile::{NamedTempFile, TempDir};

fn create_yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".yml").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_fetch_sequence_document() -> anyhow::Result<()> {
    let file = create_yaml_file(
        "- name: Albion Research Ltd.\n  url: https://www.albionresearch.com/\n- name: BBC\n  url: https://www.bbc.co.uk/\n",
    );
    let source = YamlFileSource::new();
    let doc = source.fetch(&file.path().to_string_lossy())?;

    let items = doc.as_sequence().expect("sequence document");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["name"].as_str(), Some("BBC"));
    Ok(())
}

#[test]
fn test_fetch_relative_to_root() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("pages.yml"), "home:\n  title: Home\n")?;

    let source = YamlFileSource::with_root(dir.path());
    let doc = source.fetch("pages.yml")?;
    assert_eq!(doc["home"]["title"].as_str(), Some("Home"));
    Ok(())
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let source = YamlFileSource::with_root(dir.path());

    match source.fetch("missing_file.yml").unwrap_err() {
        SourceError::NotFound { path } => assert!(path.ends_with("missing_file.yml")),
        e => panic!("Expected NotFound error, got {:?}", e),
    }
}

#[test]
fn test_malformed_file_reports_base_name_only() {
    let file = create_yaml_file("name: TEST\nversion: [");
    let source = YamlFileSource::new();

    let err = source.fetch(&file.path().to_string_lossy()).unwrap_err();
    let base = file.path().file_name().unwrap().to_string_lossy().into_owned();
    let message = err.to_string();

    assert!(message.starts_with(&format!("SyntaxError {base}: ")), "{message}");
    let dir = file.path().parent().unwrap().to_string_lossy().into_owned();
    assert!(!message.contains(&dir), "{message}");
}
