//! Loaded record stores

use crate::record::Record;
use crate::{Error, Result};
use fixrec_schema::{Mode, ResolvedSchema};
use fixrec_validation::{Fields, Items, Validated};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_yaml::Value;
use std::sync::Arc;

/// Records of a sequence document, in document order
#[derive(Debug, Clone)]
pub struct Sequence {
    schema: Arc<ResolvedSchema>,
    records: Vec<Record>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Records of a keyed document, by key, in document order
#[derive(Debug, Clone)]
pub struct Keyed {
    schema: Arc<ResolvedSchema>,
    records: IndexMap<String, Record>,
}

impl Keyed {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record stored under `key`; unknown keys are simply absent
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn first(&self) -> Option<(&str, &Record)> {
        self.records.first().map(|(key, record)| (key.as_str(), record))
    }

    /// (key, record) pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }
}

/// The record of a singleton document
#[derive(Debug, Clone)]
pub struct Singleton {
    record: Record,
}

impl Singleton {
    /// Value of `field`.
    ///
    /// Field names come from the schema, not the data, so a name outside
    /// the schema is an [`Error::UnknownKey`] rather than a miss.
    pub fn lookup(&self, field: &str) -> Result<Option<&Value>> {
        self.record.get(field)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// A loaded table, tagged by container mode
#[derive(Debug, Clone)]
pub enum RecordStore {
    Sequence(Sequence),
    Keyed(Keyed),
    Singleton(Singleton),
}

impl RecordStore {
    /// Build the store for a validated document loaded from `file`
    pub fn new(file: &str, validated: Validated) -> Self {
        let file: Arc<str> = Arc::from(file);
        let schema = Arc::new(validated.schema);
        let record = |fields: Fields| Record::new(Arc::clone(&file), Arc::clone(&schema), fields);

        match validated.items {
            Items::Sequence(items) => RecordStore::Sequence(Sequence {
                schema: Arc::clone(&schema),
                records: items.into_iter().map(record).collect(),
            }),
            Items::Keyed(entries) => RecordStore::Keyed(Keyed {
                schema: Arc::clone(&schema),
                records: entries
                    .into_iter()
                    .map(|(key, fields)| (key, record(fields)))
                    .collect(),
            }),
            Items::Singleton(fields) => RecordStore::Singleton(Singleton {
                record: record(fields),
            }),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            RecordStore::Sequence(_) => Mode::Sequence,
            RecordStore::Keyed(_) => Mode::Keyed,
            RecordStore::Singleton(_) => Mode::Singleton,
        }
    }

    /// Number of records; a singleton counts as one
    pub fn len(&self) -> usize {
        match self {
            RecordStore::Sequence(sequence) => sequence.len(),
            RecordStore::Keyed(keyed) => keyed.len(),
            RecordStore::Singleton(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in document order, whatever the mode
    pub fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        match self {
            RecordStore::Sequence(sequence) => Box::new(sequence.iter()),
            RecordStore::Keyed(keyed) => Box::new(keyed.records()),
            RecordStore::Singleton(singleton) => Box::new(std::iter::once(&singleton.record)),
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            RecordStore::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&Keyed> {
        match self {
            RecordStore::Keyed(keyed) => Some(keyed),
            _ => None,
        }
    }

    pub fn as_singleton(&self) -> Option<&Singleton> {
        match self {
            RecordStore::Singleton(singleton) => Some(singleton),
            _ => None,
        }
    }

    /// The sequence, or a [`Error::WrongMode`] naming `file`
    pub fn sequence(&self, file: &str) -> Result<&Sequence> {
        self.as_sequence().ok_or_else(|| self.wrong_mode(file, Mode::Sequence))
    }

    /// The keyed map, or a [`Error::WrongMode`] naming `file`
    pub fn keyed(&self, file: &str) -> Result<&Keyed> {
        self.as_keyed().ok_or_else(|| self.wrong_mode(file, Mode::Keyed))
    }

    /// The singleton, or a [`Error::WrongMode`] naming `file`
    pub fn singleton(&self, file: &str) -> Result<&Singleton> {
        self.as_singleton().ok_or_else(|| self.wrong_mode(file, Mode::Singleton))
    }

    /// Schema the records were validated against
    pub fn schema(&self) -> &ResolvedSchema {
        match self {
            RecordStore::Sequence(sequence) => &sequence.schema,
            RecordStore::Keyed(keyed) => &keyed.schema,
            RecordStore::Singleton(singleton) => singleton.record.schema(),
        }
    }

    fn wrong_mode(&self, file: &str, expected: Mode) -> Error {
        Error::WrongMode {
            file: file.to_string(),
            expected,
            actual: self.mode(),
        }
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl Serialize for Keyed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (key, record) in &self.records {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

impl Serialize for Singleton {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl Serialize for RecordStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RecordStore::Sequence(sequence) => sequence.serialize(serializer),
            RecordStore::Keyed(keyed) => keyed.serialize(serializer),
            RecordStore::Singleton(singleton) => singleton.serialize(serializer),
        }
    }
}
