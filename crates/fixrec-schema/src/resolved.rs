//! Frozen schema produced once a document has been inspected

use crate::model::{Mode, Schema};
use crate::KEY_FIELD;
use indexmap::IndexSet;

/// The schema a table's records are validated and accessed against.
///
/// Built exactly once per load, either from the declaration or by
/// inference from the document, and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    mode: Mode,
    required: IndexSet<String>,
    optional: IndexSet<String>,
    valid: IndexSet<String>,
    synthesized_key: bool,
}

impl ResolvedSchema {
    /// Freeze a declared schema for a document of `mode`
    pub fn declared(schema: &Schema, mode: Mode) -> Self {
        Self {
            mode,
            required: schema.required().clone(),
            optional: schema.optional().clone(),
            valid: schema.valid_keys(),
            synthesized_key: false,
        }
    }

    /// Freeze an inferred schema: every inferred field is required
    pub fn inferred<I>(keys: I, mode: Mode) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let required: IndexSet<String> = keys.into_iter().map(Into::into).collect();
        Self {
            mode,
            valid: required.clone(),
            required,
            optional: IndexSet::new(),
            synthesized_key: false,
        }
    }

    /// Add the synthetic `key` field, unless the schema already names it
    pub fn with_synthesized_key(mut self) -> Self {
        if !self.valid.contains(KEY_FIELD) {
            self.valid.insert(KEY_FIELD.to_string());
            self.synthesized_key = true;
        }
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn required(&self) -> &IndexSet<String> {
        &self.required
    }

    pub fn optional(&self) -> &IndexSet<String> {
        &self.optional
    }

    /// Every field a record may expose
    pub fn valid_keys(&self) -> &IndexSet<String> {
        &self.valid
    }

    pub fn is_valid(&self, field: &str) -> bool {
        self.valid.contains(field)
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.contains(field)
    }

    /// Whether `key` was injected from the document's map keys
    pub fn synthesizes_key(&self) -> bool {
        self.synthesized_key
    }
}
