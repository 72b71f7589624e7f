//! Schema declarations and container modes

use crate::{ConfigError, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Container shape requested by a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// Sequence or keyed, decided by the document's top-level shape
    #[default]
    Any,
    /// Ordered list of item mappings
    Sequence,
    /// Mapping of item keys to item mappings
    Keyed,
    /// The whole document is one mapping
    Singleton,
}

/// Container shape of a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sequence,
    Keyed,
    Singleton,
}

impl Container {
    /// Whether a document of `mode` satisfies this declaration
    pub fn accepts(self, mode: Mode) -> bool {
        match self {
            Container::Any => mode != Mode::Singleton,
            Container::Sequence => mode == Mode::Sequence,
            Container::Keyed => mode == Mode::Keyed,
            Container::Singleton => mode == Mode::Singleton,
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Any => write!(f, "sequence or keyed mapping"),
            Container::Sequence => write!(f, "sequence"),
            Container::Keyed => write!(f, "keyed mapping"),
            Container::Singleton => write!(f, "singleton"),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Sequence => write!(f, "sequence"),
            Mode::Keyed => write!(f, "keyed"),
            Mode::Singleton => write!(f, "singleton"),
        }
    }
}

/// A declared schema: required fields, optional fields, and container shape.
///
/// Required and optional fields are disjoint. When both are empty the
/// schema is inferred from the document at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    required: IndexSet<String>,
    optional: IndexSet<String>,
    container: Container,
}

impl Schema {
    /// Declare a schema, checking that no field is both required and optional
    pub fn new<R, O>(required: R, optional: O, singleton: bool) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self::builder()
            .required(required)
            .optional(optional)
            .singleton(singleton)
            .build()
    }

    /// A schema inferred entirely from the document
    pub fn inferred() -> Self {
        Self {
            required: IndexSet::new(),
            optional: IndexSet::new(),
            container: Container::Any,
        }
    }

    /// Start a declaration
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Required fields in declaration order
    pub fn required(&self) -> &IndexSet<String> {
        &self.required
    }

    /// Optional fields in declaration order
    pub fn optional(&self) -> &IndexSet<String> {
        &self.optional
    }

    /// Required followed by optional fields
    pub fn valid_keys(&self) -> IndexSet<String> {
        self.required.union(&self.optional).cloned().collect()
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn is_singleton(&self) -> bool {
        self.container == Container::Singleton
    }

    /// Whether no fields were declared, so they must be inferred
    pub fn is_inferred(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::inferred()
    }
}

/// Builder for [`Schema`]
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    required: Vec<String>,
    optional: Vec<String>,
    container: Container,
}

impl SchemaBuilder {
    /// Add required fields
    pub fn required<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.required.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add optional fields
    pub fn optional<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.optional.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Treat the whole document as one mapping
    pub fn singleton(mut self, singleton: bool) -> Self {
        if singleton {
            self.container = Container::Singleton;
        } else if self.container == Container::Singleton {
            self.container = Container::Any;
        }
        self
    }

    /// Pin the container shape instead of following the document
    pub fn container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Finish the declaration
    pub fn build(self) -> Result<Schema> {
        if self
            .required
            .iter()
            .chain(&self.optional)
            .any(|k| k.is_empty())
        {
            return Err(ConfigError::EmptyFieldName);
        }

        let required: IndexSet<String> = self.required.into_iter().collect();
        let optional: IndexSet<String> = self.optional.into_iter().collect();

        let overlap: Vec<&String> = required.intersection(&optional).collect();
        if !overlap.is_empty() {
            return Err(ConfigError::overlap(overlap.into_iter().cloned()));
        }

        Ok(Schema {
            required,
            optional,
            container: self.container,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_required_and_optional() {
        let schema = Schema::new(["name", "url"], ["country"], false).unwrap();
        assert_eq!(schema.required().len(), 2);
        assert!(schema.optional().contains("country"));
        let valid_keys = schema.valid_keys();
        let valid: Vec<&str> = valid_keys.iter().map(String::as_str).collect();
        assert_eq!(valid, vec!["name", "url", "country"]);
        assert!(!schema.is_inferred());
        assert_eq!(schema.container(), Container::Any);
    }

    #[test]
    fn test_overlap_is_config_error() {
        let err = Schema::new(["name"], ["name"], false).unwrap_err();
        match err {
            ConfigError::Overlap { keys } => assert_eq!(keys, vec!["name".to_string()]),
            e => panic!("Expected Overlap error, got {:?}", e),
        }
    }

    #[test]
    fn test_overlap_message_lists_fields() {
        let err = Schema::builder()
            .required(["name", "url"])
            .optional(["url", "name", "notes"])
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fields declared both required and optional: name, url"
        );
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = Schema::new([""], Vec::<String>::new(), false).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFieldName));
    }

    #[test]
    fn test_inferred_schema() {
        let schema = Schema::inferred();
        assert!(schema.is_inferred());
        assert!(schema.valid_keys().is_empty());
        assert_eq!(Schema::default(), schema);
    }

    #[test]
    fn test_singleton_flag() {
        let schema = Schema::new(["name", "company"], Vec::<String>::new(), true).unwrap();
        assert!(schema.is_singleton());

        let schema = Schema::builder().singleton(true).singleton(false).build().unwrap();
        assert_eq!(schema.container(), Container::Any);
    }

    #[test]
    fn test_container_accepts() {
        assert!(Container::Any.accepts(Mode::Sequence));
        assert!(Container::Any.accepts(Mode::Keyed));
        assert!(!Container::Any.accepts(Mode::Singleton));
        assert!(Container::Keyed.accepts(Mode::Keyed));
        assert!(!Container::Keyed.accepts(Mode::Sequence));
        assert!(Container::Singleton.accepts(Mode::Singleton));
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let schema = Schema::new(["name", "name"], Vec::<String>::new(), false).unwrap();
        assert_eq!(schema.required().len(), 1);
    }
}
