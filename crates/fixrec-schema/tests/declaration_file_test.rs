//! Loading schema declarations from disk

use std::io::Write;

use fixrec_schema::{ConfigError, Container, Schema, SchemaDecl};
use tempfile::NamedTempFile;

fn create_decl_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_declaration_file() -> anyhow::Result<()> {
    let file = create_decl_file("required:\n  - name\n  - company\nsingleton: true\n");
    let schema: Schema = SchemaDecl::from_file(file.path())?.try_into()?;

    assert!(schema.is_singleton());
    assert_eq!(schema.container(), Container::Singleton);
    assert!(schema.required().contains("company"));
    Ok(())
}

#[test]
fn test_missing_declaration_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = SchemaDecl::from_file(&dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_declaration_file() {
    let file = create_decl_file("required: [name\n");
    let err = SchemaDecl::from_file(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Invalid schema declaration: YAML parse error"));
}
