//! The shipper loop.
//!
//! Every cycle registers the shipper's schema upstream with a freshly drawn
//! batch size, fetches the generated records, stamps them with the time
//! they were received and bulk-writes them to the sink. Failures are logged
//! and absorbed; only the shutdown signal ends the loop.

use crate::upstream::UpstreamClient;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use record_core::{stamp_ingested_at, FieldMap, Schema, SchemaError};
use search_sink::{BulkReport, BulkStop, CollectionStatus, SearchSink};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Field map registered when no fields file is given.
pub fn default_fields() -> FieldMap {
    FieldMap::from_pairs([
        ("Customer Name", "full_name"),
        ("Customer Phone (Int)", "phone_number_int"),
        ("Customer Address", "full_address"),
        ("Country", "alpha2"),
        ("Is Subscribed", "boolean"),
        ("Date Of Birth", "date_iso"),
        ("Music Genre", "music_genre"),
        ("Music Instrument", "music_instrument"),
        ("Music Genre Object", "music_genre"),
        ("Music Instrument Object", "music_instrument"),
        ("Artist Name", "artist_name"),
        ("Song Title", "song_title"),
        ("Album Title", "album_title"),
    ])
}

/// Inclusive range batch sizes are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    min: usize,
    max: usize,
}

impl BatchRange {
    /// Forces `min >= 1` and `max >= min`.
    pub fn new(min: usize, max: usize) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn draw<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min..=self.max)
    }
}

/// Settings for one shipper.
#[derive(Debug, Clone)]
pub struct ShipperConfig {
    pub schema_name: String,
    pub fields: FieldMap,
    pub batch: BatchRange,
    pub interval: Duration,
    /// Sink collection the records are written to
    pub target: String,
    /// Maximum documents per bulk request
    pub bulk_size: usize,
}

impl ShipperConfig {
    pub fn new(
        schema_name: impl Into<String>,
        fields: FieldMap,
        target: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let schema_name = schema_name.into();
        // Validate once up front so every cycle can build its schema.
        Schema::new(schema_name.clone(), fields.clone(), 1)?;
        Ok(Self {
            schema_name,
            fields,
            batch: BatchRange::new(80, 150),
            interval: Duration::from_secs(15),
            target: target.into(),
            bulk_size: 1000,
        })
    }

    pub fn with_batch(mut self, batch: BatchRange) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_bulk_size(mut self, bulk_size: usize) -> Self {
        self.bulk_size = bulk_size.max(1);
        self
    }
}

/// What happened during one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Batch size requested from upstream
    pub requested: usize,
    /// Whether schema registration succeeded
    pub registered: bool,
    /// Records received, `None` when delivery was skipped
    pub received: Option<usize>,
    /// Sink outcome, `None` when delivery was skipped
    pub bulk: Option<BulkReport>,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipperSummary {
    pub cycles: u64,
    pub delivered: u64,
}

/// Pulls batches from the generator service and pushes them into a sink.
pub struct Shipper<S> {
    upstream: UpstreamClient,
    sink: S,
    config: ShipperConfig,
    rng: StdRng,
}

impl<S: SearchSink> Shipper<S> {
    pub fn new(upstream: UpstreamClient, sink: S, config: ShipperConfig) -> Self {
        Self {
            upstream,
            sink,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for batch size draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &ShipperConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Make sure the target collection exists. Failure is logged only; the
    /// bulk writes that follow report their own errors.
    pub async fn prepare(&self) -> CollectionStatus {
        let status = self.sink.ensure_collection(&self.config.target).await;
        if let CollectionStatus::Failed(reason) = &status {
            warn!(
                "Could not ensure index {}: {reason}; continuing",
                self.config.target
            );
        }
        status
    }

    /// Run one register -> fetch -> stamp -> deliver cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let requested = self.config.batch.draw(&mut self.rng);
        let mut report = CycleReport {
            requested,
            ..Default::default()
        };

        let schema = match Schema::new(
            self.config.schema_name.clone(),
            self.config.fields.clone(),
            requested,
        ) {
            Ok(schema) => schema,
            Err(e) => {
                warn!("Skipping cycle: {e}");
                return report;
            }
        };

        match self.upstream.register_schema(&schema).await {
            Ok(()) => {
                report.registered = true;
                info!("Registered schema {} count={requested}", schema.name);
            }
            Err(e) => warn!("Schema registration failed: {e}"),
        }

        let batch = match self.upstream.fetch_records(&schema.name).await {
            Ok(Value::Array(batch)) => batch,
            Ok(other) => {
                warn!(
                    "Skipping delivery: upstream returned a non-array payload: {}",
                    search_sink::truncate_body(&other.to_string(), 200)
                );
                return report;
            }
            Err(e) => {
                warn!("Skipping delivery: {e}");
                return report;
            }
        };

        let documents = stamp_ingested_at(batch, Utc::now());
        report.received = Some(documents.len());
        debug!(
            "Batch preview: {}",
            serde_json::to_string(&documents.iter().take(2).collect::<Vec<_>>())
                .unwrap_or_default()
        );

        let bulk = self
            .sink
            .bulk_write(&self.config.target, &documents, self.config.bulk_size)
            .await;
        match &bulk.stopped {
            Some(BulkStop::Unauthorized) => {
                warn!("Sink rejected the credential; check the API key")
            }
            Some(BulkStop::Failed(reason)) => warn!("Delivery incomplete: {reason}"),
            None => {}
        }
        report.bulk = Some(bulk);
        report
    }

    /// Run cycles until `shutdown` fires or its sender is dropped.
    ///
    /// The signal is checked before each cycle and raced against both the
    /// cycle and the inter-cycle sleep. A cycle interrupted mid-request is
    /// abandoned; nothing it fetched is delivered.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> ShipperSummary {
        let mut summary = ShipperSummary::default();
        info!(
            "Shipping schema {} to {} every {:?} (batch {}-{})",
            self.config.schema_name,
            self.config.target,
            self.config.interval,
            self.config.batch.min(),
            self.config.batch.max()
        );

        self.prepare().await;

        loop {
            if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }

            let report = tokio::select! {
                _ = shutdown.recv() => break,
                report = self.run_cycle() => report,
            };
            summary.cycles += 1;
            if let Some(bulk) = &report.bulk {
                summary.delivered += bulk.delivered as u64;
            }

            tokio::select! {
                _ = shutdown.recv() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        info!(
            "Stopped after {} cycle(s), {} document(s) delivered",
            summary.cycles, summary.delivered
        );
        summary
    }
}
