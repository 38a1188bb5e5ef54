//! Bulk request bodies and responses.

use record_core::Record;
use serde_json::{json, Value};

/// Acknowledgement parsed from a bulk response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkAck {
    /// Number of per-document results in the response
    pub items: usize,
    /// Results whose status was not 2xx
    pub failed: usize,
}

/// Build the newline-delimited body for one chunk: an index action line
/// followed by the document line, for every document.
pub fn build_bulk_body(target: &str, documents: &[Record]) -> Result<String, serde_json::Error> {
    let action = serde_json::to_string(&json!({"index": {"_index": target}}))?;
    let mut body = String::new();
    for document in documents {
        body.push_str(&action);
        body.push('\n');
        body.push_str(&serde_json::to_string(document)?);
        body.push('\n');
    }
    Ok(body)
}

/// Parse a bulk response. The `items` array is required; its length is the
/// delivered count.
pub fn parse_bulk_response(body: &str) -> Result<BulkAck, String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("invalid bulk response JSON: {e}"))?;
    let items = value
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| "bulk response has no 'items' array".to_string())?;

    let failed = items
        .iter()
        .filter(|item| {
            item.as_object()
                .and_then(|actions| actions.values().next())
                .and_then(|result| result.get("status"))
                .and_then(Value::as_u64)
                .is_some_and(|status| !(200..300).contains(&status))
        })
        .count();

    Ok(BulkAck {
        items: items.len(),
        failed,
    })
}

/// Cut a response body down for logging.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
