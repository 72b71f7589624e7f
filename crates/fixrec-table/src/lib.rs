#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # fixrec-table
//!
//! Read-only tables of validated records, loaded lazily from YAML data files.
//!
//! A [`Table`] owns a schema declaration and a document source. The first
//! query reads the document, validates every item, and caches the resulting
//! [`RecordStore`]; later queries read the cache. A failed load caches
//! nothing, so the next query tries again.
//!
//! ## Example Usage
//!
//! ```rust
//! use fixrec_doc::MemorySource;
//! use fixrec_table::Table;
//!
//! let source = MemorySource::new().with(
//!     "links.yml",
//!     "- name: Albion Research Ltd.\n  url: https://www.albionresearch.com/\n\
//!      - name: BBC\n  url: https://www.bbc.co.uk/\n",
//! );
//! let links = Table::inferred("links.yml").with_source(source);
//!
//! assert_eq!(links.count().unwrap(), 2);
//! let bbc = links.at(1).unwrap().unwrap();
//! assert_eq!(bbc.get_as::<String>("name").unwrap().as_deref(), Some("BBC"));
//! ```

pub mod catalog;
pub mod record;
pub mod store;
pub mod table;

pub use catalog::Catalog;
pub use record::Record;
pub use store::{Keyed, RecordStore, Sequence, Singleton};
pub use table::Table;

pub use fixrec_schema::{ConfigError, Container, Mode, ResolvedSchema, Schema, SchemaDecl};
pub use fixrec_validation::{CheckError, CheckResult, Fields, ItemCheck, ItemLabel};

use fixrec_doc::SourceError;
use fixrec_validation::ValidationError;
use thiserror::Error;

/// Errors raised while loading or querying a table
#[derive(Error, Debug)]
pub enum Error {
    /// The document could not be fetched or parsed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The document's data does not match the schema
    #[error("{file}: {source}")]
    Invalid {
        file: String,
        #[source]
        source: ValidationError,
    },

    /// A field name outside the schema was used
    #[error("{file}: unknown field '{field}'")]
    UnknownKey { file: String, field: String },

    /// A query for one container mode was made on a table of another
    #[error("{file}: expected a {expected} table, loaded a {actual} table")]
    WrongMode {
        file: String,
        expected: Mode,
        actual: Mode,
    },

    /// A stored value could not be converted to the requested type
    #[error("{file}: cannot read {target}: {message}")]
    FieldType {
        file: String,
        /// Field name, or `record` for whole-record conversion
        target: String,
        message: String,
    },
}

/// Flat classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Io,
    Structure,
    ItemType,
    MissingField,
    UnexpectedField,
    Check,
    UnknownKey,
    WrongMode,
    FieldType,
}

impl Error {
    /// Build an invalid-data error for `file`
    pub fn invalid(file: impl Into<String>, source: ValidationError) -> Self {
        Self::Invalid {
            file: file.into(),
            source,
        }
    }

    /// Build an unknown-field error
    pub fn unknown_key(file: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownKey {
            file: file.into(),
            field: field.into(),
        }
    }

    /// Build a conversion error
    pub fn field_type(
        file: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FieldType {
            file: file.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Source(SourceError::NotFound { .. }) => ErrorKind::NotFound,
            Error::Source(SourceError::Parse { .. }) => ErrorKind::Parse,
            Error::Source(SourceError::Io { .. }) => ErrorKind::Io,
            Error::Invalid { source, .. } => match source {
                ValidationError::Structure(_) => ErrorKind::Structure,
                ValidationError::ItemType { .. } => ErrorKind::ItemType,
                ValidationError::MissingField { .. } => ErrorKind::MissingField,
                ValidationError::UnexpectedField { .. } => ErrorKind::UnexpectedField,
                ValidationError::Check { .. } => ErrorKind::Check,
            },
            Error::UnknownKey { .. } => ErrorKind::UnknownKey,
            Error::WrongMode { .. } => ErrorKind::WrongMode,
            Error::FieldType { .. } => ErrorKind::FieldType,
        }
    }

    /// The validation failure behind an invalid-data error
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Crate-local result type for table operations.
pub type Result<T> = std::result::Result<T, Error>;
