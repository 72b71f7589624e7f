//! Named collection of tables

use crate::table::Table;
use crate::Result;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Thread-safe registry of tables by name.
///
/// Register every data table once at startup, then look them up from
/// anywhere. Tables stay lazy until queried or [`Catalog::load_all`] is called.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: DashMap<String, Arc<Table>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `table` under `name`, returning the table it replaced
    pub fn register(&self, name: impl Into<String>, table: Table) -> Option<Arc<Table>> {
        let name = name.into();
        debug!("Registering table {} ({})", name, table.name());
        self.tables.insert(name, Arc::new(table))
    }

    /// Get a table by name
    pub fn get(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a table is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Load every registered table, in name order, stopping at the first failure
    pub fn load_all(&self) -> Result<()> {
        let names = self.names();
        for name in &names {
            if let Some(table) = self.get(name) {
                table.load()?;
            }
        }
        info!("Loaded {} tables", names.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use fixrec_doc::MemorySource;

    fn source() -> Arc<MemorySource> {
        Arc::new(
            MemorySource::new()
                .with("links.yml", "- name: BBC\n  url: https://www.bbc.co.uk/\n")
                .with("broken.yml", "- name: BBC\n- title: Home\n"),
        )
    }

    #[test]
    fn test_register_and_get() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        let previous = catalog.register("links", Table::inferred("links.yml").with_shared_source(source()));
        assert!(previous.is_none());

        let table = catalog.get("links").unwrap();
        assert_eq!(table.count().unwrap(), 1);
        assert!(catalog.contains("links"));
        assert!(catalog.get("pages").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let catalog = Catalog::new();
        catalog.register("links", Table::inferred("links.yml"));
        let previous = catalog.register("links", Table::inferred("other.yml"));
        assert_eq!(previous.unwrap().name(), "links.yml");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_all_reports_first_failure() {
        let catalog = Catalog::new();
        catalog.register("links", Table::inferred("links.yml").with_shared_source(source()));
        catalog.register("broken", Table::inferred("broken.yml").with_shared_source(source()));

        assert_eq!(catalog.names(), vec!["broken", "links"]);
        let err = catalog.load_all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert!(!catalog.get("links").unwrap().is_loaded());
    }
}
