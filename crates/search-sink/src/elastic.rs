//! Elasticsearch-compatible HTTP sink.

use crate::bulk::{build_bulk_body, parse_bulk_response, truncate_body};
use crate::traits::{BulkReport, BulkStop, CollectionStatus, SearchSink};
use record_core::Record;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Characters of a response body kept in log messages.
const LOG_BODY_CHARS: usize = 200;

/// Error type for building the sink client.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The API key cannot be sent as a header value
    #[error("Sink API key contains characters not allowed in a header")]
    InvalidApiKey,

    /// The base URL does not parse or cannot carry a path
    #[error("Invalid sink URL: {0}")]
    InvalidBaseUrl(String),

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Connection settings for [`ElasticSink`].
#[derive(Debug, Clone)]
pub struct ElasticSinkConfig {
    /// Base URL, e.g. `http://localhost:9200`
    pub base_url: String,
    /// Sent as `Authorization: ApiKey <key>` when set
    pub api_key: Option<String>,
    /// Timeout for probe and create requests
    pub timeout: Duration,
    /// Timeout for each bulk request
    pub bulk_timeout: Duration,
}

impl ElasticSinkConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
            bulk_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bulk_timeout(mut self, bulk_timeout: Duration) -> Self {
        self.bulk_timeout = bulk_timeout;
        self
    }
}

/// Sink speaking the Elasticsearch index and `_bulk` APIs.
pub struct ElasticSink {
    client: Client,
    base_url: Url,
    config: ElasticSinkConfig,
}

enum ChunkOutcome {
    Acknowledged { items: usize, failed: usize },
    Stop(BulkStop),
}

impl ElasticSink {
    pub fn new(config: ElasticSinkConfig) -> Result<Self, SinkError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| SinkError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("ApiKey {key}"))
                .map_err(|_| SinkError::InvalidApiKey)?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &ElasticSinkConfig {
        &self.config
    }

    /// Append one escaped path segment to the base URL.
    fn url(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(segment);
        }
        url
    }

    async fn create_collection(&self, target: &str) -> CollectionStatus {
        let response = self
            .client
            .put(self.url(target))
            .json(&serde_json::json!({}))
            .timeout(self.config.timeout)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                info!("Created index {target}");
                CollectionStatus::Created
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                let reason = format!(
                    "create {target} returned {status}: {}",
                    truncate_body(&body, LOG_BODY_CHARS)
                );
                warn!("{reason}");
                CollectionStatus::Failed(reason)
            }
            Err(e) => {
                let reason = format!("create {target} failed: {e}");
                warn!("{reason}");
                CollectionStatus::Failed(reason)
            }
        }
    }

    async fn send_chunk(&self, body: String) -> ChunkOutcome {
        let response = self
            .client
            .post(self.url("_bulk"))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .timeout(self.config.bulk_timeout)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return ChunkOutcome::Stop(BulkStop::Failed(format!("bulk request failed: {e}"))),
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return ChunkOutcome::Stop(BulkStop::Unauthorized);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return ChunkOutcome::Stop(BulkStop::Failed(format!(
                    "reading bulk response failed: {e}"
                )))
            }
        };

        if !status.is_success() {
            return ChunkOutcome::Stop(BulkStop::Failed(format!(
                "bulk returned {status}: {}",
                truncate_body(&text, LOG_BODY_CHARS)
            )));
        }

        match parse_bulk_response(&text) {
            Ok(ack) => ChunkOutcome::Acknowledged {
                items: ack.items,
                failed: ack.failed,
            },
            Err(reason) => ChunkOutcome::Stop(BulkStop::Failed(reason)),
        }
    }
}

#[async_trait::async_trait]
impl SearchSink for ElasticSink {
    async fn ensure_collection(&self, target: &str) -> CollectionStatus {
        let probe = self
            .client
            .head(self.url(target))
            .timeout(self.config.timeout)
            .send()
            .await;

        match probe {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!("Index {target} exists");
                CollectionStatus::Exists
            }
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                self.create_collection(target).await
            }
            Ok(response) => {
                let reason = format!("HEAD /{target} returned {}", response.status());
                warn!("{reason}");
                CollectionStatus::Failed(reason)
            }
            Err(e) => {
                let reason = format!("HEAD /{target} failed: {e}");
                warn!("{reason}");
                CollectionStatus::Failed(reason)
            }
        }
    }

    async fn bulk_write(
        &self,
        target: &str,
        documents: &[Record],
        chunk_size: usize,
    ) -> BulkReport {
        let mut report = BulkReport::default();
        if documents.is_empty() {
            return report;
        }

        let chunk_size = chunk_size.max(1);
        for (index, chunk) in documents.chunks(chunk_size).enumerate() {
            let body = match build_bulk_body(target, chunk) {
                Ok(body) => body,
                Err(e) => {
                    report.stopped = Some(BulkStop::Failed(format!("encoding chunk failed: {e}")));
                    break;
                }
            };

            report.requests += 1;
            match self.send_chunk(body).await {
                ChunkOutcome::Acknowledged { items, failed } => {
                    debug!(
                        "Chunk {} acknowledged {items}/{} documents ({failed} rejected)",
                        index + 1,
                        chunk.len()
                    );
                    if items != chunk.len() {
                        warn!(
                            "Chunk {} sent {} documents but sink acknowledged {items}",
                            index + 1,
                            chunk.len()
                        );
                    }
                    report.delivered += items;
                    report.rejected += failed;
                }
                ChunkOutcome::Stop(stop) => {
                    warn!("Bulk write to {target} stopped at chunk {}: {stop}", index + 1);
                    report.stopped = Some(stop);
                    break;
                }
            }
        }

        if report.rejected > 0 {
            warn!(
                "Sink rejected {} of {} acknowledged documents",
                report.rejected, report.delivered
            );
        }
        info!(
            "Indexed {} document(s) into {target} in {} request(s)",
            report.delivered, report.requests
        );
        report
    }
}
