//! Bulk-indexing sink abstraction.
//!
//! This crate defines the [`SearchSink`] trait used by the shipper loop and
//! an Elasticsearch-compatible HTTP implementation, [`ElasticSink`].
//!
//! Sink operations report structured outcomes instead of returning errors:
//! a failed bulk chunk stops the current write and is described in the
//! returned [`BulkReport`], but never propagates up and ends the shipper.

mod bulk;
mod elastic;
mod traits;

pub use bulk::{build_bulk_body, parse_bulk_response, truncate_body, BulkAck};
pub use elastic::{ElasticSink, ElasticSinkConfig, SinkError};
pub use traits::{BulkReport, BulkStop, CollectionStatus, SearchSink};
