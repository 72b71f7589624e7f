//! Schema declaration files
//!
//! A declaration can live next to its data file:
//!
//! ```yaml
//! required: [name, url]
//! optional: [country]
//! singleton: false
//! ```

use crate::model::{Container, Schema};
use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// Serializable form of a [`Schema`] declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDecl {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    #[serde(default)]
    pub singleton: bool,
    /// Pin the collection shape; ignored for singletons
    #[serde(default)]
    pub container: Container,
}

impl SchemaDecl {
    /// Parse a declaration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::InvalidFormat(format!("YAML parse error: {}", e)))
    }

    /// Read a declaration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        trace!("Loading schema declaration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Validate the declaration and turn it into a [`Schema`]
    pub fn into_schema(self) -> Result<Schema> {
        let container = if self.singleton {
            Container::Singleton
        } else {
            self.container
        };
        Schema::builder()
            .required(self.required)
            .optional(self.optional)
            .container(container)
            .build()
    }
}

impl TryFrom<SchemaDecl> for Schema {
    type Error = ConfigError;

    fn try_from(decl: SchemaDecl) -> Result<Self> {
        decl.into_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_full() {
        let decl = SchemaDecl::from_yaml("required: [name, url]\noptional: [country]\n").unwrap();
        assert_eq!(decl.required, vec!["name", "url"]);
        assert_eq!(decl.optional, vec!["country"]);
        assert!(!decl.singleton);

        let schema = decl.into_schema().unwrap();
        assert_eq!(schema.valid_keys().len(), 3);
    }

    #[test]
    fn test_from_yaml_defaults_to_inference() {
        let decl = SchemaDecl::from_yaml("{}").unwrap();
        let schema = Schema::try_from(decl).unwrap();
        assert!(schema.is_inferred());
        assert_eq!(schema.container(), Container::Any);
    }

    #[test]
    fn test_singleton_overrides_container() {
        let decl = SchemaDecl::from_yaml("singleton: true\ncontainer: keyed\n").unwrap();
        assert!(decl.into_schema().unwrap().is_singleton());
    }

    #[test]
    fn test_pinned_container() {
        let decl = SchemaDecl::from_yaml("container: sequence\n").unwrap();
        assert_eq!(decl.into_schema().unwrap().container(), Container::Sequence);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SchemaDecl::from_yaml("requird: [name]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_overlap_in_declaration() {
        let decl = SchemaDecl::from_yaml("required: [name]\noptional: [name]\n").unwrap();
        assert!(matches!(decl.into_schema(), Err(ConfigError::Overlap { .. })));
    }
}
