//! Core types for the record-shipper pipeline.
//!
//! This crate provides the foundational types shared by the generator,
//! the schema store, the sink client and the shipper loop:
//!
//! - [`FieldMap`] - Ordered mapping of output field name to field type identifier
//! - [`Schema`] - Named field map plus default record count
//! - [`Record`] - One generated record (ordered JSON object)
//! - [`LocaleContext`] - Locale tag and region code shared by one record
//! - [`OutputFormat`] - NDJSON / pretty JSON export
//!
//! # Architecture
//!
//! ```text
//! record-core (this crate)
//!    │
//!    ├─── record-generator  (FieldMap -> Vec<Record>)
//!    ├─── schema-store      (persists Schema by name)
//!    └─── search-sink       (ships Record batches in bulk)
//! ```
//!
//! # Example
//!
//! ```rust
//! use record_core::{FieldMap, Schema};
//!
//! let fields = FieldMap::from_pairs([("Email", "email_address")]);
//! let schema = Schema::new("demo", fields, 3).unwrap();
//! assert_eq!(schema.count, 3);
//! ```

pub mod export;
pub mod schema;
pub mod values;

// Re-exports for convenience
pub use export::{write_records, OutputFormat};
pub use schema::{parse_field_spec, FieldMap, Schema, SchemaError, MAX_COUNT};
pub use values::{
    stamp_ingested_at, LocaleContext, Record, INGESTED_AT_FIELD, SUPPORTED_LOCALES,
};
