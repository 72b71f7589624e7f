//! In-memory YAML source

use crate::{Document, DocumentSource, Result, SourceError, parse_yaml};
use std::collections::HashMap;

/// Serves YAML text registered under a name.
///
/// Useful for data compiled into the binary:
///
/// ```rust
/// use fixrec_doc::{DocumentSource, MemorySource};
///
/// let source = MemorySource::new().with("links.yml", "- name: BBC\n  url: https://www.bbc.co.uk/\n");
/// assert!(source.fetch("links.yml").unwrap().is_sequence());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` under `name`, builder style
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Register `text` under `name`, replacing any previous text
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(name.into(), text.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<Document> {
        let text = self
            .documents
            .get(name)
            .ok_or_else(|| SourceError::not_found(name))?;
        parse_yaml(name, text)
    }
}
