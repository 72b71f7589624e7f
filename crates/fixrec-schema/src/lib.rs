#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # fixrec-schema
//!
//! Schema model for fixed-record tables.
//!
//! A [`Schema`] is declared once by the owner of a data file: which fields
//! every item must carry, which it may carry, and whether the file holds a
//! single mapping. Leaving both key sets empty asks the loader to infer
//! the schema from the first item. Once the document has been inspected
//! the schema is frozen into a [`ResolvedSchema`].

pub mod decl;
pub mod model;
pub mod resolved;

pub use decl::SchemaDecl;
pub use model::{Container, Mode, Schema, SchemaBuilder};
pub use resolved::ResolvedSchema;

use thiserror::Error;

/// Name of the field injected into keyed items.
pub const KEY_FIELD: &str = "key";

/// Errors in a schema declaration. These are programming mistakes, raised
/// before any data file is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Fields declared both required and optional: {}", .keys.join(", "))]
    Overlap { keys: Vec<String> },

    #[error("Field names must not be empty")]
    EmptyFieldName,

    #[error("Invalid schema declaration: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Build an overlap error from the offending names.
    pub fn overlap<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Overlap {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Crate-local result type for schema declaration.
pub type Result<T> = std::result::Result<T, ConfigError>;
