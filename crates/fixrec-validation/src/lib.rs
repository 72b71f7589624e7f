#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # fixrec-validation
//!
//! Validation of parsed documents against a [`Schema`](fixrec_schema::Schema).
//!
//! Validation runs in a fixed order and stops at the first problem:
//!
//! 1. [`structure`] checks the top-level shape against the declared container.
//! 2. [`resolver`] infers the field set from the first item when none was declared.
//! 3. [`synthesis`] injects the `key` field into keyed items.
//! 4. [`item`] checks every item's fields and runs the caller's [`ItemCheck`].
//!
//! ## Example Usage
//!
//! ```rust
//! use fixrec_schema::Schema;
//! use fixrec_validation::{Items, ValidationEngine};
//!
//! let doc = fixrec_doc::parse_yaml("links.yml", "- name: BBC\n  url: https://www.bbc.co.uk/\n").unwrap();
//! let validated = ValidationEngine::new(Schema::inferred()).validate(doc).unwrap();
//! match validated.items {
//!     Items::Sequence(items) => assert_eq!(items[0]["name"].as_str(), Some("BBC")),
//!     _ => unreachable!(),
//! }
//! ```

pub mod check;
pub mod engine;
pub mod item;
pub mod resolver;
pub mod structure;
pub mod synthesis;

pub use check::{CheckError, CheckResult, ItemCheck};
pub use engine::{Items, Validated, ValidationEngine};
pub use item::validate_item;
pub use structure::{Shape, classify};

use indexmap::IndexMap;
use thiserror::Error;

/// Field values of one validated item, in document order.
pub type Fields = IndexMap<String, serde_yaml::Value>;

/// Identifies an item in validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLabel {
    /// 0-based position in a sequence document
    Index(usize),
    /// Map key in a keyed document
    Key(String),
    /// The document itself, for singletons
    Document,
}

impl std::fmt::Display for ItemLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemLabel::Index(index) => write!(f, "index {}", index),
            ItemLabel::Key(key) => write!(f, "key '{}'", key),
            ItemLabel::Document => write!(f, "document"),
        }
    }
}

/// Errors found in a document's data
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    Structure(String),

    #[error("{label} should be a mapping of field names to values, found {found}")]
    ItemType { label: ItemLabel, found: &'static str },

    #[error("{label} is missing value for '{field}'")]
    MissingField { label: ItemLabel, field: String },

    #[error("{label} has unexpected field '{field}'")]
    UnexpectedField { label: ItemLabel, field: String },

    #[error("{label} failed validation: {source}")]
    Check {
        label: ItemLabel,
        #[source]
        source: CheckError,
    },
}

impl ValidationError {
    /// Build a structure error
    pub fn structure(reason: impl Into<String>) -> Self {
        Self::Structure(reason.into())
    }

    /// Build a missing-field error
    pub fn missing_field(label: ItemLabel, field: impl Into<String>) -> Self {
        Self::MissingField {
            label,
            field: field.into(),
        }
    }

    /// Build an unexpected-field error
    pub fn unexpected_field(label: ItemLabel, field: impl Into<String>) -> Self {
        Self::UnexpectedField {
            label,
            field: field.into(),
        }
    }

    /// Label of the offending item, if the error concerns one
    pub fn label(&self) -> Option<&ItemLabel> {
        match self {
            Self::Structure(_) => None,
            Self::ItemType { label, .. }
            | Self::MissingField { label, .. }
            | Self::UnexpectedField { label, .. }
            | Self::Check { label, .. } => Some(label),
        }
    }

    /// Offending field name, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::UnexpectedField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Crate-local result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(ItemLabel::Index(2).to_string(), "index 2");
        assert_eq!(ItemLabel::Key("StaticPage#first".into()).to_string(), "key 'StaticPage#first'");
        assert_eq!(ItemLabel::Document.to_string(), "document");
    }

    #[test]
    fn test_error_messages_name_label_and_field() {
        let err = ValidationError::missing_field(ItemLabel::Index(1), "url");
        assert_eq!(err.to_string(), "index 1 is missing value for 'url'");
        assert_eq!(err.field(), Some("url"));
        assert_eq!(err.label(), Some(&ItemLabel::Index(1)));

        let err = ValidationError::unexpected_field(ItemLabel::Key("home".into()), "country");
        assert_eq!(err.to_string(), "key 'home' has unexpected field 'country'");
    }

    #[test]
    fn test_structure_error_has_no_label() {
        let err = ValidationError::structure("document contains no items");
        assert!(err.label().is_none());
        assert!(err.field().is_none());
    }
}
