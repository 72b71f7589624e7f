//! Lazily loaded tables

use crate::record::Record;
use crate::store::{Keyed, RecordStore, Sequence, Singleton};
use crate::{Error, Result};
use fixrec_doc::{DocumentSource, YamlFileSource};
use fixrec_schema::{ConfigError, Schema};
use fixrec_validation::{ItemCheck, ValidationEngine};
use serde_yaml::Value;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info, trace};

/// A data file bound to its schema.
///
/// Nothing is read until the first query. That query fetches the document,
/// validates it, and caches the [`RecordStore`]; every later query reads the
/// cache without locking. Concurrent first queries are serialized so the
/// document is fetched and validated once. A failed load is not cached.
pub struct Table {
    name: String,
    engine: ValidationEngine,
    source: Arc<dyn DocumentSource>,
    store: OnceLock<RecordStore>,
    load_guard: Mutex<()>,
}

impl Table {
    /// Bind the file `name` to `schema`, reading it from the filesystem
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            engine: ValidationEngine::new(schema),
            source: Arc::new(YamlFileSource::new()),
            store: OnceLock::new(),
            load_guard: Mutex::new(()),
        }
    }

    /// Bind `name` to a schema inferred from its first item
    pub fn inferred(name: impl Into<String>) -> Self {
        Self::new(name, Schema::inferred())
    }

    /// Declare the schema and bind it to `name` in one step.
    ///
    /// Fails before any file is read if a field is both required and optional.
    pub fn declare<R, O>(
        name: impl Into<String>,
        required: R,
        optional: O,
        singleton: bool,
    ) -> std::result::Result<Self, ConfigError>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Ok(Self::new(name, Schema::new(required, optional, singleton)?))
    }

    /// Read the document from `source` instead of the filesystem
    pub fn with_source(mut self, source: impl DocumentSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Read the document from a shared source
    pub fn with_shared_source(mut self, source: Arc<dyn DocumentSource>) -> Self {
        self.source = source;
        self
    }

    /// Run `check` on every item after its fields are validated
    pub fn with_check(mut self, check: impl ItemCheck + 'static) -> Self {
        self.engine = self.engine.with_check(check);
        self
    }

    /// Name of the data file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared schema
    pub fn schema(&self) -> &Schema {
        self.engine.schema()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.get().is_some()
    }

    /// The loaded store, loading it on first use
    pub fn load(&self) -> Result<&RecordStore> {
        if let Some(store) = self.store.get() {
            trace!("Table {} served from cache", self.name);
            return Ok(store);
        }

        let _guard = self.load_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = self.store.get() {
            debug!("Table {} was loaded while waiting", self.name);
            return Ok(store);
        }

        info!("Loading table: {}", self.name);
        let document = self.source.fetch(&self.name)?;
        let validated = self
            .engine
            .validate(document)
            .map_err(|e| Error::invalid(&self.name, e))?;
        let store = RecordStore::new(&self.name, validated);
        info!(
            "Loaded {} {} records from {}",
            store.len(),
            store.mode(),
            self.name
        );

        Ok(self.store.get_or_init(|| store))
    }

    /// Number of records; a singleton counts as one
    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Every record in document order
    pub fn records(&self) -> Result<impl Iterator<Item = &Record>> {
        Ok(self.load()?.records())
    }

    /// The records of a sequence table
    pub fn sequence(&self) -> Result<&Sequence> {
        self.load()?.sequence(&self.name)
    }

    /// The records of a keyed table
    pub fn keyed(&self) -> Result<&Keyed> {
        self.load()?.keyed(&self.name)
    }

    /// The record of a singleton table
    pub fn singleton(&self) -> Result<&Singleton> {
        self.load()?.singleton(&self.name)
    }

    /// First record in document order; a singleton's only record
    pub fn first(&self) -> Result<Option<&Record>> {
        Ok(self.load()?.records().next())
    }

    /// Record at `index` of a sequence table
    pub fn at(&self, index: usize) -> Result<Option<&Record>> {
        Ok(self.sequence()?.get(index))
    }

    /// Record stored under `key` in a keyed table; unknown keys are `None`
    pub fn get(&self, key: &str) -> Result<Option<&Record>> {
        Ok(self.keyed()?.get(key))
    }

    /// Whether a keyed table has a record under `key`
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.keyed()?.contains_key(key))
    }

    /// Field of a singleton table; names outside the schema are errors
    pub fn lookup(&self, field: &str) -> Result<Option<&Value>> {
        self.singleton()?.lookup(field)
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("engine", &self.engine)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
