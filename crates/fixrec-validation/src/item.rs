//! Per-item field validation

use crate::check::ItemCheck;
use crate::{Fields, ItemLabel, Result, ValidationError};
use fixrec_doc::{Document, node_kind};
use fixrec_schema::ResolvedSchema;
use tracing::trace;

/// Validate one item and return its fields.
///
/// Checks, in order: the item is a mapping, every required field is
/// present, no field falls outside the schema, and `check` (if any)
/// accepts the item. The first failure is returned.
pub fn validate_item(
    schema: &ResolvedSchema,
    item: Document,
    label: &ItemLabel,
    check: Option<&dyn ItemCheck>,
) -> Result<Fields> {
    let mapping = match item {
        Document::Mapping(mapping) => mapping,
        other => {
            return Err(ValidationError::ItemType {
                label: label.clone(),
                found: node_kind(&other),
            });
        }
    };

    let mut fields = Fields::with_capacity(mapping.len());
    let mut unexpected = None;
    for (name, value) in mapping {
        match name {
            Document::String(name) => {
                if unexpected.is_none() && !schema.is_valid(&name) {
                    unexpected = Some(name.clone());
                }
                fields.insert(name, value);
            }
            other if unexpected.is_none() => unexpected = Some(render_name(&other)),
            _ => {}
        }
    }

    if let Some(missing) = schema
        .required()
        .iter()
        .find(|field| !fields.contains_key(field.as_str()))
    {
        return Err(ValidationError::missing_field(label.clone(), missing));
    }

    // First offender in document order, string or not
    if let Some(field) = unexpected {
        return Err(ValidationError::unexpected_field(label.clone(), field));
    }

    if let Some(check) = check {
        check
            .check(&fields, label)
            .map_err(|source| ValidationError::Check {
                label: label.clone(),
                source,
            })?;
    }

    trace!("Validated {} ({} fields)", label, fields.len());
    Ok(fields)
}

/// Render a non-string field name for an error message
fn render_name(name: &Document) -> String {
    match serde_yaml::to_string(name) {
        Ok(text) => text.trim_end().to_string(),
        Err(_) => node_kind(name).to_string(),
    }
}
