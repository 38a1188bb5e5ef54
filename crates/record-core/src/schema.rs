//! Schema definitions for the record-shipper pipeline.
//!
//! A [`Schema`] binds a name to an ordered [`FieldMap`] and a default record
//! count. Schemas arrive from three places (the HTTP front door, the CLI and
//! the shipper loop), so all of them go through the same validation here.
//!
//! ## Wire format
//!
//! ```json
//! {
//!     "name": "demo",
//!     "fields": { "Email": "email_address", "Country": "alpha2" },
//!     "count": 3
//! }
//! ```
//!
//! Field order in `fields` is significant: generated records carry their
//! fields in the same order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Largest record count one schema may request.
pub const MAX_COUNT: usize = 10_000;

// ============================================================================
// Error Types
// ============================================================================

/// Validation errors for schema input.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SchemaError {
    /// Schema name missing or blank
    #[error("Schema name must be a non-empty string")]
    EmptyName,

    /// No fields were supplied
    #[error("Schema '{0}' must define at least one field")]
    NoFields(String),

    /// Count missing, non-integer or not positive
    #[error("Count must be a positive integer, got {0}")]
    InvalidCount(String),

    /// Count larger than [`MAX_COUNT`]
    #[error("Count {0} exceeds the limit of {max}", max = MAX_COUNT)]
    CountTooLarge(usize),

    /// Fields payload is not an object of strings
    #[error("Fields must be an object mapping field name to type name: {0}")]
    InvalidFields(String),

    /// A `name=type` field spec could not be parsed
    #[error("Invalid field spec '{0}': expected NAME=TYPE")]
    InvalidFieldSpec(String),

    /// The payload is not an object or is missing keys
    #[error("Malformed schema payload: {0}")]
    Malformed(String),
}

// ============================================================================
// FieldMap
// ============================================================================

/// Ordered mapping of output field name to field type identifier.
///
/// Serialized as a JSON object. Insertion order is preserved and a repeated
/// name replaces the earlier type in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field map from `(name, type)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (name, field_type) in pairs {
            map.insert(name, field_type);
        }
        map
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, field_type: impl Into<String>) {
        let name = name.into();
        let field_type = field_type.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = field_type,
            None => self.entries.push((name, field_type)),
        }
    }

    /// Get the type identifier of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.as_str())
    }

    /// Iterate over `(name, type)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a field map from a JSON value, rejecting anything that is not an
    /// object of strings.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SchemaError> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::InvalidFields(format!("expected object, got {value}")))?;

        let mut map = Self::new();
        for (name, field_type) in object {
            let field_type = field_type.as_str().ok_or_else(|| {
                SchemaError::InvalidFields(format!("type of '{name}' must be a string"))
            })?;
            map.insert(name.clone(), field_type);
        }
        Ok(map)
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, field_type) in &self.entries {
            map.serialize_entry(name, field_type)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping field name to type name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
                let mut map = FieldMap::new();
                while let Some((name, field_type)) = access.next_entry::<String, String>()? {
                    map.insert(name, field_type);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

/// Parse a `NAME=TYPE` field spec as used on the command line.
///
/// The split happens on the last `=` so field names may contain `=`.
pub fn parse_field_spec(spec: &str) -> Result<(String, String), SchemaError> {
    let (name, field_type) = spec
        .rsplit_once('=')
        .ok_or_else(|| SchemaError::InvalidFieldSpec(spec.to_string()))?;
    let name = name.trim();
    let field_type = field_type.trim();
    if name.is_empty() || field_type.is_empty() {
        return Err(SchemaError::InvalidFieldSpec(spec.to_string()));
    }
    Ok((name.to_string(), field_type.to_string()))
}

// ============================================================================
// Schema
// ============================================================================

/// A named field map with its default record count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema name
    pub name: String,

    /// Output field name -> field type identifier
    pub fields: FieldMap,

    /// Number of records generated per request
    pub count: usize,
}

impl Schema {
    /// Create a validated schema.
    pub fn new(name: impl Into<String>, fields: FieldMap, count: usize) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if fields.is_empty() {
            return Err(SchemaError::NoFields(name));
        }
        if count == 0 {
            return Err(SchemaError::InvalidCount("0".to_string()));
        }
        if count > MAX_COUNT {
            return Err(SchemaError::CountTooLarge(count));
        }
        Ok(Self {
            name,
            fields,
            count,
        })
    }

    /// Validate an untrusted JSON payload of shape `{name, fields, count}`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SchemaError> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::Malformed("expected a JSON object".to_string()))?;

        let name = match object.get("name") {
            Some(serde_json::Value::String(name)) => name.clone(),
            Some(_) | None => return Err(SchemaError::EmptyName),
        };

        let fields = object
            .get("fields")
            .ok_or_else(|| SchemaError::InvalidFields("missing 'fields'".to_string()))
            .and_then(FieldMap::from_json)?;

        let count = match object.get("count") {
            Some(raw) => match raw.as_u64() {
                Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
                _ => return Err(SchemaError::InvalidCount(raw.to_string())),
            },
            None => return Err(SchemaError::InvalidCount("missing".to_string())),
        };

        Self::new(name, fields, count)
    }
}
