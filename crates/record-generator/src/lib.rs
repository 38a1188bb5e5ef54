//! Synthetic record generator for the record-shipper pipeline.
//!
//! This crate provides the [`RecordGenerator`] which turns an ordered
//! [`FieldMap`](record_core::FieldMap) into records. Field type identifiers
//! are resolved through the [`registry`]; values come from a
//! [`ValueProvider`].
//!
//! # Architecture
//!
//! ```text
//! FieldMap { "Email": "email_address", "Country": "alpha2", ... }
//!        │
//!        ▼
//! ┌───────────────────┐      ┌──────────────────┐
//! │  RecordGenerator  │─────▶│  registry        │  "alpha2" -> FieldKind::RegionCode
//! │                   │      └──────────────────┘
//! │  - rng (StdRng)   │      ┌──────────────────┐
//! │  - provider       │─────▶│  ValueProvider   │  name, email, phone, address, ...
//! └────────┬──────────┘      └──────────────────┘
//!          │   one LocaleContext drawn per record
//!          ▼
//!    Record { "Email": "...", "Country": "GB", ... }
//! ```
//!
//! # Example
//!
//! ```rust
//! use record_core::FieldMap;
//! use record_generator::RecordGenerator;
//!
//! let fields = FieldMap::from_pairs([
//!     ("Email", "email_address"),
//!     ("Address", "full_address"),
//!     ("Country", "alpha2"),
//! ]);
//!
//! let mut generator = RecordGenerator::new(42);
//! let records = generator.generate(&fields, 3);
//! assert_eq!(records.len(), 3);
//! ```
//!
//! # Field types
//!
//! See [`registry::FieldKind`] for the full list. Locale-bound kinds
//! (`full_address`, `address_object`, `alpha2`, `locale`, `phone_number`,
//! `phone_number_int`) always use the locale drawn for the current record.
//! Unknown identifiers produce an `invalid: ...` string instead of failing.

pub mod generator;
pub mod generators;
pub mod provider;
pub mod registry;

// Re-exports for convenience
pub use generator::{GeneratorError, RecordGenerator, RecordIterator};
pub use provider::{AgeRange, FakeProvider, ValueProvider};
pub use registry::{resolve, FieldKind};
