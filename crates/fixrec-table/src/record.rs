//! Immutable records

use crate::{Error, Result};
use fixrec_schema::{KEY_FIELD, ResolvedSchema};
use fixrec_validation::Fields;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::sync::Arc;

/// One validated item.
///
/// Every field the schema allows can be read; a valid field the item does
/// not carry reads as `None`. Naming a field outside the schema is an
/// [`Error::UnknownKey`].
#[derive(Debug, Clone)]
pub struct Record {
    file: Arc<str>,
    schema: Arc<ResolvedSchema>,
    fields: Fields,
}

impl Record {
    pub(crate) fn new(file: Arc<str>, schema: Arc<ResolvedSchema>, fields: Fields) -> Self {
        Self {
            file,
            schema,
            fields,
        }
    }

    /// Value of `field`, or `None` if the item leaves an optional field out
    pub fn get(&self, field: &str) -> Result<Option<&Value>> {
        self.ensure_valid(field)?;
        Ok(self.fields.get(field))
    }

    /// Whether the item carries `field`
    pub fn is_present(&self, field: &str) -> Result<bool> {
        self.ensure_valid(field)?;
        Ok(self.fields.contains_key(field))
    }

    /// Value of `field` deserialized into `T`
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>> {
        match self.get(field)? {
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::field_type(&*self.file, field, e.to_string())),
            None => Ok(None),
        }
    }

    /// The whole record deserialized into `T`.
    ///
    /// Absent optional fields deserialize as missing, so they suit
    /// `Option` fields or `#[serde(default)]`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(Value::Mapping(self.to_mapping()))
            .map_err(|e| Error::field_type(&*self.file, "record", e.to_string()))
    }

    /// The `key` field, when the record has one holding a string.
    ///
    /// Synthesized keys are always strings. A declared `key` with any other
    /// value reads as `None` here; use [`Record::get`] for the raw value.
    pub fn key(&self) -> Option<&str> {
        self.fields.get(KEY_FIELD).and_then(Value::as_str)
    }

    /// Present fields in document order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of present fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn schema(&self) -> &ResolvedSchema {
        &self.schema
    }

    /// Name of the document the record was loaded from
    pub fn file(&self) -> &str {
        &self.file
    }

    fn ensure_valid(&self, field: &str) -> Result<()> {
        if self.schema.is_valid(field) {
            Ok(())
        } else {
            Err(Error::unknown_key(&*self.file, field))
        }
    }

    fn to_mapping(&self) -> Mapping {
        self.fields
            .iter()
            .map(|(name, value)| (Value::String(name.clone()), value.clone()))
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields && self.schema == other.schema
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
