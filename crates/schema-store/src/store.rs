//! Schema store over a pluggable backend.

use crate::backend::{JsonFileBackend, MemoryBackend, SchemaBackend, SchemaEntry, SchemaMap};
use record_core::{FieldMap, Schema, SchemaError};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Error type for schema store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error reading or writing the schema file
    #[error("Schema file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file is not valid JSON of the expected shape
    #[error("Schema file is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected input
    #[error(transparent)]
    Invalid(#[from] SchemaError),

    /// A previous writer panicked while holding the store lock
    #[error("Schema store lock poisoned")]
    Poisoned,
}

/// Named schema storage.
///
/// The backend is read lazily on first access. Mutations are serialized by
/// an internal lock and persist the complete store before the in-memory
/// copy is updated, so a failed save leaves the store unchanged.
pub struct SchemaStore {
    backend: Box<dyn SchemaBackend>,
    cache: Mutex<Option<SchemaMap>>,
}

impl SchemaStore {
    pub fn new(backend: impl SchemaBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            cache: Mutex::new(None),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend)
    }

    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileBackend::new(path))
    }

    /// File-backed when a path is given, in-memory otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::json_file(path),
            None => Self::in_memory(),
        }
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Lock the cache, loading it from the backend if still cold.
    fn loaded(&self) -> Result<MutexGuard<'_, Option<SchemaMap>>, StoreError> {
        let mut guard = self.cache.lock().map_err(|_| StoreError::Poisoned)?;
        if guard.is_none() {
            let schemas = self.backend.load()?;
            tracing::debug!(
                "Loaded {} schema(s) from {}",
                schemas.len(),
                self.backend.describe()
            );
            *guard = Some(schemas);
        }
        Ok(guard)
    }

    /// Apply a mutation to a copy, persist it, then commit it.
    fn mutate<T>(&self, f: impl FnOnce(&mut SchemaMap) -> T) -> Result<T, StoreError> {
        let mut guard = self.loaded()?;
        let mut next = guard.clone().unwrap_or_default();
        let result = f(&mut next);
        self.backend.save(&next)?;
        *guard = Some(next);
        Ok(result)
    }

    /// Create or replace a schema.
    pub fn put(
        &self,
        name: impl Into<String>,
        fields: FieldMap,
        count: usize,
    ) -> Result<Schema, StoreError> {
        let schema = Schema::new(name, fields, count)?;
        self.put_schema(schema.clone())?;
        Ok(schema)
    }

    /// Create or replace an already validated schema.
    pub fn put_schema(&self, schema: Schema) -> Result<(), StoreError> {
        let Schema {
            name,
            fields,
            count,
        } = schema;
        self.mutate(|schemas| {
            schemas.insert(name, SchemaEntry { fields, count });
        })
    }

    /// Look up a schema. Entries read from a hand-edited file go through the
    /// same validation as new ones.
    pub fn get(&self, name: &str) -> Result<Option<Schema>, StoreError> {
        let guard = self.loaded()?;
        match guard.as_ref().and_then(|schemas| schemas.get(name)) {
            Some(entry) => Ok(Some(Schema::new(name, entry.fields.clone(), entry.count)?)),
            None => Ok(None),
        }
    }

    /// Remove a schema. Returns whether it existed.
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        {
            let guard = self.loaded()?;
            let exists = guard
                .as_ref()
                .is_some_and(|schemas| schemas.contains_key(name));
            if !exists {
                return Ok(false);
            }
        }
        self.mutate(|schemas| schemas.remove(name).is_some())
    }

    /// Schema names in sorted order.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let guard = self.loaded()?;
        Ok(guard
            .as_ref()
            .map(|schemas| schemas.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fields() -> FieldMap {
        FieldMap::from_pairs([("Email", "email_address"), ("Name", "full_name")])
    }

    #[test]
    fn test_put_get_roundtrip() {
        let store = SchemaStore::in_memory();
        let stored = store.put("s", fields(), 5).unwrap();

        assert_eq!(store.get("s").unwrap(), Some(stored));
    }

    #[test]
    fn test_delete_then_get_absent() {
        let store = SchemaStore::in_memory();
        store.put("s", fields(), 5).unwrap();

        assert!(store.delete("s").unwrap());
        assert_eq!(store.get("s").unwrap(), None);
        assert!(!store.delete("s").unwrap());
    }

    #[test]
    fn test_put_replaces() {
        let store = SchemaStore::in_memory();
        store.put("s", fields(), 5).unwrap();
        store
            .put("s", FieldMap::from_pairs([("Flag", "boolean")]), 2)
            .unwrap();

        let schema = store.get("s").unwrap().unwrap();
        assert_eq!(schema.count, 2);
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(store.list().unwrap(), vec!["s".to_string()]);
    }

    #[test]
    fn test_put_rejects_invalid() {
        let store = SchemaStore::in_memory();
        assert!(matches!(
            store.put("s", fields(), 0),
            Err(StoreError::Invalid(SchemaError::InvalidCount(_)))
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted() {
        let store = SchemaStore::in_memory();
        for name in ["zeta", "alpha", "mid"] {
            store.put(name, fields(), 1).unwrap();
        }
        assert_eq!(store.list().unwrap(), vec!["alpha", "mid", "zeta"]);
    }

    /// Backend that counts loads and fails saves on demand.
    struct CountingBackend {
        loads: Arc<AtomicUsize>,
        fail_saves: bool,
    }

    impl SchemaBackend for CountingBackend {
        fn load(&self) -> Result<SchemaMap, StoreError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(SchemaMap::new())
        }

        fn save(&self, _schemas: &SchemaMap) -> Result<(), StoreError> {
            if self.fail_saves {
                Err(StoreError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn test_backend_loaded_once_lazily() {
        let loads = Arc::new(AtomicUsize::new(0));
        let store = SchemaStore::new(CountingBackend {
            loads: loads.clone(),
            fail_saves: false,
        });
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        store.list().unwrap();
        store.put("s", fields(), 1).unwrap();
        store.get("s").unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let store = SchemaStore::new(CountingBackend {
            loads: Arc::new(AtomicUsize::new(0)),
            fail_saves: true,
        });

        assert!(matches!(store.put("s", fields(), 1), Err(StoreError::Io(_))));
        assert_eq!(store.get("s").unwrap(), None);
    }
}
