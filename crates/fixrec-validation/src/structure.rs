//! Top-level document shape
//!
//! The only place a document is probed for its shape. Everything after
//! classification works on a [`Shape`].

use crate::{Result, ValidationError};
use fixrec_doc::{Document, node_kind};
use fixrec_schema::{Container, Mode};
use serde_yaml::Mapping;

/// A document whose top level matches its declared container
#[derive(Debug, Clone)]
pub enum Shape {
    /// Non-empty list of mappings
    Sequence(Vec<Document>),
    /// Non-empty list of (key, mapping) pairs in document order
    Keyed(Vec<(String, Document)>),
    /// One mapping
    Singleton(Mapping),
}

impl Shape {
    pub fn mode(&self) -> Mode {
        match self {
            Shape::Sequence(_) => Mode::Sequence,
            Shape::Keyed(_) => Mode::Keyed,
            Shape::Singleton(_) => Mode::Singleton,
        }
    }
}

/// Check the top level of `document` against `container`
pub fn classify(document: Document, container: Container) -> Result<Shape> {
    match container {
        Container::Singleton => match document {
            Document::Mapping(mapping) => Ok(Shape::Singleton(mapping)),
            other => Err(ValidationError::structure(format!(
                "document should be a mapping of field names to values, found {}",
                node_kind(&other)
            ))),
        },
        Container::Sequence => sequence(document),
        Container::Keyed => keyed(document),
        Container::Any => match document {
            Document::Sequence(_) => sequence(document),
            Document::Mapping(_) => keyed(document),
            other => Err(ValidationError::structure(format!(
                "document does not contain a sequence or mapping of items, found {}",
                node_kind(&other)
            ))),
        },
    }
}

fn sequence(document: Document) -> Result<Shape> {
    let items = match document {
        Document::Sequence(items) => items,
        other => {
            return Err(ValidationError::structure(format!(
                "document does not contain a sequence of items, found {}",
                node_kind(&other)
            )));
        }
    };

    if items.is_empty() {
        return Err(ValidationError::structure("document contains no items"));
    }

    if let Some((index, item)) = items.iter().enumerate().find(|(_, item)| !item.is_mapping()) {
        return Err(ValidationError::structure(format!(
            "item at index {} should be a mapping, found {}",
            index,
            node_kind(item)
        )));
    }

    Ok(Shape::Sequence(items))
}

fn keyed(document: Document) -> Result<Shape> {
    let mapping = match document {
        Document::Mapping(mapping) => mapping,
        other => {
            return Err(ValidationError::structure(format!(
                "document does not contain a mapping of items, found {}",
                node_kind(&other)
            )));
        }
    };

    if mapping.is_empty() {
        return Err(ValidationError::structure("document contains no items"));
    }

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, item) in mapping {
        let key = match key {
            Document::String(key) => key,
            other => {
                return Err(ValidationError::structure(format!(
                    "item keys should be strings, found {}",
                    node_kind(&other)
                )));
            }
        };
        if !item.is_mapping() {
            return Err(ValidationError::structure(format!(
                "item '{}' should be a mapping, found {}",
                key,
                node_kind(&item)
            )));
        }
        entries.push((key, item));
    }

    Ok(Shape::Keyed(entries))
}
