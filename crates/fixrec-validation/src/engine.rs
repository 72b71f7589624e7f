//! Validation engine

use crate::check::ItemCheck;
use crate::item::validate_item;
use crate::resolver::resolve;
use crate::structure::{Shape, classify};
use crate::synthesis::synthesize_keys;
use crate::{Fields, ItemLabel, Result};
use fixrec_doc::Document;
use fixrec_schema::{ResolvedSchema, Schema};
use std::sync::Arc;
use tracing::debug;

/// Validated items, tagged by container mode
#[derive(Debug, Clone)]
pub enum Items {
    Sequence(Vec<Fields>),
    Keyed(Vec<(String, Fields)>),
    Singleton(Fields),
}

impl Items {
    pub fn len(&self) -> usize {
        match self {
            Items::Sequence(items) => items.len(),
            Items::Keyed(entries) => entries.len(),
            Items::Singleton(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully validated document and the schema it was validated against
#[derive(Debug, Clone)]
pub struct Validated {
    pub schema: ResolvedSchema,
    pub items: Items,
}

/// Runs every validation stage over a document
#[derive(Clone)]
pub struct ValidationEngine {
    schema: Schema,
    check: Option<Arc<dyn ItemCheck>>,
}

impl ValidationEngine {
    /// Create an engine for a declared (or inferred) schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            check: None,
        }
    }

    /// Run `check` against every item after the field checks pass
    pub fn with_check(mut self, check: impl ItemCheck + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate `document`, stopping at the first error
    pub fn validate(&self, document: Document) -> Result<Validated> {
        let mut shape = classify(document, self.schema.container())?;
        let mut schema = resolve(&self.schema, &shape)?;

        if let Shape::Keyed(entries) = &mut shape {
            schema = synthesize_keys(schema, entries);
        }

        let check = self.check.as_deref();
        let items = match shape {
            Shape::Sequence(items) => Items::Sequence(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| validate_item(&schema, item, &ItemLabel::Index(index), check))
                    .collect::<Result<_>>()?,
            ),
            Shape::Keyed(entries) => Items::Keyed(
                entries
                    .into_iter()
                    .map(|(key, item)| {
                        let fields = validate_item(&schema, item, &ItemLabel::Key(key.clone()), check)?;
                        Ok((key, fields))
                    })
                    .collect::<Result<_>>()?,
            ),
            Shape::Singleton(mapping) => Items::Singleton(validate_item(
                &schema,
                Document::Mapping(mapping),
                &ItemLabel::Document,
                check,
            )?),
        };

        debug!("Validated {} {} items", items.len(), schema.mode());
        Ok(Validated { schema, items })
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("schema", &self.schema)
            .field("check", &self.check.is_some())
            .finish()
    }
}
