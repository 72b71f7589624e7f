//! Freezing the schema for a classified document

use crate::structure::Shape;
use crate::{Result, ValidationError};
use fixrec_doc::{Document, node_kind};
use fixrec_schema::{ResolvedSchema, Schema};
use serde_yaml::Mapping;
use tracing::debug;

/// Resolve `schema` against `shape`.
///
/// A declared schema is frozen as is. An undeclared one takes its fields
/// from the first item (or from the document, for singletons), and every
/// inferred field is required.
pub fn resolve(schema: &Schema, shape: &Shape) -> Result<ResolvedSchema> {
    let mode = shape.mode();
    if !schema.is_inferred() {
        return Ok(ResolvedSchema::declared(schema, mode));
    }

    let template = match shape {
        Shape::Singleton(mapping) => Some(mapping),
        Shape::Sequence(items) => items.first().and_then(Document::as_mapping),
        Shape::Keyed(entries) => entries.first().and_then(|(_, item)| item.as_mapping()),
    }
    .ok_or_else(|| ValidationError::structure("document contains no items"))?;

    let keys = field_names(template)?;
    debug!("Inferred {} schema from first item: {:?}", mode, keys);
    Ok(ResolvedSchema::inferred(keys, mode))
}

fn field_names(mapping: &Mapping) -> Result<Vec<String>> {
    mapping
        .keys()
        .map(|key| match key {
            Document::String(name) => Ok(name.clone()),
            other => Err(ValidationError::structure(format!(
                "field names should be strings, found {}",
                node_kind(other)
            ))),
        })
        .collect()
}
