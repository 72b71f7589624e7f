#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # fixrec-doc
//!
//! Document sources for fixed-record data files.
//!
//! A [`DocumentSource`] turns a data file name into a parsed YAML tree
//! ([`Document`]). Sources know nothing about schemas; they only report
//! whether the document exists and whether it parses.

/// YAML documents read from the filesystem.
pub mod file;
/// YAML documents held in memory, e.g. embedded with `include_str!`.
pub mod memory;

pub use file::YamlFileSource;
pub use memory::MemorySource;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A parsed document tree: mappings, sequences and scalars.
pub type Document = serde_yaml::Value;

/// Name reported for YAML syntax failures.
pub const SYNTAX_ERROR: &str = "SyntaxError";

/// Errors raised while fetching a document
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{}: no such file", .path.display())]
    NotFound { path: PathBuf },

    #[error("{error_name} {file}: {details}")]
    Parse {
        /// Base name of the offending file
        file: String,
        /// Name of the originating parser error
        error_name: &'static str,
        details: String,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Build a not-found error for a path or source name.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Build a parse error, keeping only the base name of `path`.
    pub fn parse(path: impl AsRef<Path>, error_name: &'static str, details: impl Into<String>) -> Self {
        Self::Parse {
            file: base_name(path.as_ref()),
            error_name,
            details: details.into(),
        }
    }

    /// Whether the source reported a missing document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Crate-local result type for document sources.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Something that can produce a parsed document for a name.
///
/// Implementations must be safe to share across threads; a table may be
/// queried from several threads before its first load completes.
pub trait DocumentSource: Send + Sync {
    /// Fetch and parse the document called `name`.
    fn fetch(&self, name: &str) -> Result<Document>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for std::sync::Arc<S> {
    fn fetch(&self, name: &str) -> Result<Document> {
        (**self).fetch(name)
    }
}

/// Parse YAML text that came from `origin`.
///
/// Merge keys (`<<: *anchor`) are resolved, so items may share defaults.
pub fn parse_yaml(origin: impl AsRef<Path>, text: &str) -> Result<Document> {
    let origin = origin.as_ref();
    let mut document: Document = serde_yaml::from_str(text)
        .map_err(|e| SourceError::parse(origin, SYNTAX_ERROR, e.to_string()))?;
    document
        .apply_merge()
        .map_err(|e| SourceError::parse(origin, SYNTAX_ERROR, e.to_string()))?;
    Ok(document)
}

/// Final component of `path`, or the whole path when it has none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Short name of a value's node type, used in error messages.
pub fn node_kind(value: &Document) -> &'static str {
    match value {
        Document::Null => "null",
        Document::Bool(_) => "boolean",
        Document::Number(_) => "number",
        Document::String(_) => "string",
        Document::Sequence(_) => "sequence",
        Document::Mapping(_) => "mapping",
        Document::Tagged(_) => "tagged value",
    }
}
