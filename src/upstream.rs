//! Client for the upstream generator service.
//!
//! The service exposes `POST /schemas` to register a schema and
//! `GET /schemas/{name}/data` to generate records for it.

use record_core::Schema;
use reqwest::{Client, StatusCode, Url};
use search_sink::truncate_body;
use serde_json::Value;
use std::time::Duration;

/// Characters of a response body kept in error messages.
const ERROR_BODY_CHARS: usize = 200;

/// Error type for upstream calls.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Base URL cannot be used to build request URLs
    #[error("Invalid upstream base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Transport failure or timeout
    #[error("{operation} request to {url} failed: {source}")]
    Request {
        operation: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with an error status
    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Response body is not JSON
    #[error("{operation} returned invalid JSON: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP client for the generator service.
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a client whose every request uses `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| UpstreamError::InvalidBaseUrl(base_url.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Register or replace a schema upstream.
    pub async fn register_schema(&self, schema: &Schema) -> Result<(), UpstreamError> {
        const OPERATION: &str = "register schema";
        let url = self.url(&["schemas"]);

        let response = self
            .client
            .post(url.clone())
            .json(schema)
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                operation: OPERATION,
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                operation: OPERATION,
                status,
                body: truncate_body(&body, ERROR_BODY_CHARS),
            });
        }
        Ok(())
    }

    /// Fetch generated records for a schema as raw JSON.
    ///
    /// A successful call normally yields an array; callers must check.
    pub async fn fetch_records(&self, schema_name: &str) -> Result<Value, UpstreamError> {
        const OPERATION: &str = "fetch data";
        let url = self.url(&["schemas", schema_name, "data"]);

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                operation: OPERATION,
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| UpstreamError::Request {
            operation: OPERATION,
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                operation: OPERATION,
                status,
                body: truncate_body(&body, ERROR_BODY_CHARS),
            });
        }

        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
            operation: OPERATION,
            source,
        })
    }
}
