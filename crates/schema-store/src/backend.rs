//! Persistence backends for the schema store.

use crate::store::StoreError;
use record_core::FieldMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Stored value for one schema name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub fields: FieldMap,
    pub count: usize,
}

/// Whole-store contents keyed by schema name.
pub type SchemaMap = BTreeMap<String, SchemaEntry>;

/// Trait for schema persistence.
///
/// Backends always read and write the complete store; there is no partial
/// update.
pub trait SchemaBackend: Send + Sync {
    /// Load the complete store. A backend with no persisted state returns an
    /// empty map.
    fn load(&self) -> Result<SchemaMap, StoreError>;

    /// Replace the persisted store with `schemas`.
    fn save(&self, schemas: &SchemaMap) -> Result<(), StoreError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Backend that keeps nothing beyond the store's own cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

impl SchemaBackend for MemoryBackend {
    fn load(&self) -> Result<SchemaMap, StoreError> {
        Ok(SchemaMap::new())
    }

    fn save(&self, _schemas: &SchemaMap) -> Result<(), StoreError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Backend that stores every schema in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SchemaBackend for JsonFileBackend {
    fn load(&self) -> Result<SchemaMap, StoreError> {
        if !self.path.exists() {
            return Ok(SchemaMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SchemaMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, schemas: &SchemaMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write the whole store next to the target, then swap it in.
        let temp = self.temp_path();
        std::fs::write(&temp, serde_json::to_string_pretty(schemas)?)?;
        std::fs::rename(&temp, &self.path)?;
        tracing::debug!(
            "Saved {} schema(s) to {}",
            schemas.len(),
            self.path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry() -> SchemaEntry {
        SchemaEntry {
            fields: FieldMap::from_pairs([("Email", "email_address"), ("Country", "alpha2")]),
            count: 5,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("schemas.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemas.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonFileBackend::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested").join("schemas.json"));

        let mut schemas = SchemaMap::new();
        schemas.insert("demo".to_string(), entry());
        backend.save(&schemas).unwrap();

        assert_eq!(backend.load().unwrap(), schemas);
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemas.json");
        let backend = JsonFileBackend::new(&path);

        let mut schemas = SchemaMap::new();
        schemas.insert("demo".to_string(), entry());
        backend.save(&schemas).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["demo"]["count"], 5);
        assert_eq!(raw["demo"]["fields"]["Email"], "email_address");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemas.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileBackend::new(path).load(),
            Err(StoreError::Json(_))
        ));
    }
}
