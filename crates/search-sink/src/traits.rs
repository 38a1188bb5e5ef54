//! SearchSink trait definition.

use record_core::Record;
use std::fmt;

/// Outcome of making sure the target collection exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Collection was already there
    Exists,
    /// Collection was missing and has been created
    Created,
    /// Probe or creation failed; later writes will report their own failure
    Failed(String),
}

/// Why a bulk write stopped before sending every chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkStop {
    /// The sink rejected the credential; no further chunk was sent
    Unauthorized,
    /// Transport error, timeout, error status or malformed response
    Failed(String),
}

impl fmt::Display for BulkStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "credential rejected"),
            Self::Failed(reason) => write!(f, "{reason}"),
        }
    }
}

/// Result of one bulk write call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// Per-document results acknowledged by the sink across all chunks
    pub delivered: usize,
    /// Acknowledged results that carried an error status
    pub rejected: usize,
    /// Requests issued
    pub requests: usize,
    /// Set when the write stopped early
    pub stopped: Option<BulkStop>,
}

impl BulkReport {
    /// Every chunk was sent and answered.
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }
}

/// Trait for delivering records to a bulk-indexable store.
///
/// The shipper loop is generic over this trait so tests and alternative
/// stores can stand in for the HTTP implementation.
#[async_trait::async_trait]
pub trait SearchSink: Send + Sync {
    /// Idempotently make sure `target` exists, creating it with default
    /// settings when absent. Never fails; problems are reported in the
    /// returned status.
    async fn ensure_collection(&self, target: &str) -> CollectionStatus;

    /// Deliver `documents` to `target` in consecutive chunks of at most
    /// `chunk_size` documents, one request per chunk.
    ///
    /// An empty `documents` slice issues no request. A rejected credential
    /// or any other request failure stops the remaining chunks; counts from
    /// chunks already answered are kept.
    async fn bulk_write(&self, target: &str, documents: &[Record], chunk_size: usize)
        -> BulkReport;
}
