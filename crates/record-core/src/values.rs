//! Value representations for generated records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// One generated record: output field name -> value, in schema field order.
pub type Record = serde_json::Map<String, Value>;

/// Field added to every record when the shipper receives a batch.
pub const INGESTED_AT_FIELD: &str = "ingested_at";

/// Locale tag and region code shared by every locale-dependent field of
/// one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocaleContext {
    /// Language tag, e.g. `en_GB`
    pub tag: &'static str,
    /// Two-letter region code, e.g. `GB`
    pub region: &'static str,
}

impl LocaleContext {
    pub const fn new(tag: &'static str, region: &'static str) -> Self {
        Self { tag, region }
    }

    /// Look up a supported locale by its region code.
    pub fn for_region(region: &str) -> Option<Self> {
        SUPPORTED_LOCALES
            .iter()
            .copied()
            .find(|locale| locale.region == region)
    }
}

/// Locales a record may be generated in.
pub const SUPPORTED_LOCALES: &[LocaleContext] = &[
    LocaleContext::new("en_US", "US"),
    LocaleContext::new("en_GB", "GB"),
    LocaleContext::new("fr_FR", "FR"),
    LocaleContext::new("de_DE", "DE"),
    LocaleContext::new("en_CA", "CA"),
];

/// Stamp a freshly received batch with its ingestion time.
///
/// Every record gets the same `ingested_at` value (UTC, RFC 3339). Elements
/// that are not JSON objects are dropped.
pub fn stamp_ingested_at(batch: Vec<Value>, received_at: DateTime<Utc>) -> Vec<Record> {
    let stamp = received_at.to_rfc3339_opts(SecondsFormat::Micros, true);
    batch
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(mut record) => {
                record.insert(INGESTED_AT_FIELD.to_string(), Value::String(stamp.clone()));
                Some(record)
            }
            _ => None,
        })
        .collect()
}
