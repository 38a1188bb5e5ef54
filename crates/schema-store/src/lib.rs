//! Named schema storage.
//!
//! A [`SchemaStore`] maps schema names to their field map and default
//! count. Persistence is delegated to a [`SchemaBackend`]:
//!
//! - [`MemoryBackend`] - lives until process exit
//! - [`JsonFileBackend`] - one JSON object keyed by schema name, rewritten
//!   wholesale on every mutation
//!
//! # File Format
//!
//! ```json
//! {
//!     "demo": {
//!         "fields": { "Email": "email_address" },
//!         "count": 3
//!     }
//! }
//! ```

mod backend;
mod store;

pub use backend::{JsonFileBackend, MemoryBackend, SchemaBackend, SchemaEntry, SchemaMap};
pub use store::{SchemaStore, StoreError};
