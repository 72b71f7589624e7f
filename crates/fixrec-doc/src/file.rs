//! YAML file source

use crate::{Document, DocumentSource, Result, SourceError, parse_yaml};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Reads documents from YAML files, relative to an optional root directory
#[derive(Debug, Clone, Default)]
pub struct YamlFileSource {
    root: Option<PathBuf>,
}

impl YamlFileSource {
    /// Resolve names as given (absolute, or relative to the working directory)
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative names against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Path a name resolves to
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentSource for YamlFileSource {
    fn fetch(&self, name: &str) -> Result<Document> {
        let path = self.resolve(name);
        trace!("Reading document from {:?}", path);

        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::not_found(&path),
            _ => SourceError::Io {
                path: path.clone(),
                source: e,
            },
        })?;

        parse_yaml(&path, &text)
    }
}
