//! The shipper command.

use crate::shipper::{default_fields, BatchRange, Shipper, ShipperConfig, ShipperSummary};
use crate::upstream::UpstreamClient;
use crate::{config, SinkOpts, UpstreamOpts};
use anyhow::Context;
use clap::Args;
use record_core::{FieldMap, MAX_COUNT};
use search_sink::{ElasticSink, ElasticSinkConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast;

/// Bulk requests carry whole chunks, so they never get less than this.
const MIN_BULK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Args, Clone, Debug)]
pub struct ShipArgs {
    #[command(flatten)]
    pub upstream: UpstreamOpts,

    #[command(flatten)]
    pub sink: SinkOpts,

    /// Time between cycles (e.g. 15, 15s, 2m, 1h)
    #[arg(long, default_value = "15s", env = "SHIPPER_INTERVAL", value_parser = config::parse_interval)]
    pub interval: Duration,

    /// Schema name registered upstream
    #[arg(long, default_value = "elasticshipper")]
    pub schema_name: String,

    /// Smallest batch requested per cycle
    #[arg(long, default_value = "80")]
    pub min_count: usize,

    /// Largest batch requested per cycle
    #[arg(long, default_value = "150")]
    pub max_count: usize,

    /// JSON object of field name to field type, replacing the built-in set
    #[arg(long, value_name = "PATH")]
    pub fields_file: Option<PathBuf>,

    /// Seed for batch size draws
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ShipArgs {
    pub fn batch_range(&self) -> anyhow::Result<BatchRange> {
        if self.min_count == 0 {
            anyhow::bail!("--min-count must be at least 1");
        }
        if self.max_count > MAX_COUNT {
            anyhow::bail!("--max-count ({}) must be <= {MAX_COUNT}", self.max_count);
        }
        if self.max_count < self.min_count {
            anyhow::bail!(
                "--max-count ({}) must be >= --min-count ({})",
                self.max_count,
                self.min_count
            );
        }
        Ok(BatchRange::new(self.min_count, self.max_count))
    }
}

/// Read a `{"Field Name": "field_type", ...}` file.
pub fn load_fields_file(path: &Path) -> anyhow::Result<FieldMap> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fields file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Fields file {} is not valid JSON", path.display()))?;
    FieldMap::from_json(&value)
        .with_context(|| format!("Fields file {} is invalid", path.display()))
}

/// Build the shipper from arguments and run it until `shutdown` fires.
pub async fn run_ship(
    args: ShipArgs,
    shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<ShipperSummary> {
    let fields = match &args.fields_file {
        Some(path) => load_fields_file(path)?,
        None => default_fields(),
    };

    let config = ShipperConfig::new(&args.schema_name, fields, &args.sink.sink_index)?
        .with_batch(args.batch_range()?)
        .with_interval(args.interval)
        .with_bulk_size(args.sink.bulk_size);

    let upstream = UpstreamClient::new(&args.upstream.api_base, args.upstream.timeout)?;

    let sink = ElasticSink::new(
        ElasticSinkConfig::new(&args.sink.sink_url)
            .with_api_key(args.sink.sink_api_key.clone())
            .with_timeout(args.upstream.timeout)
            .with_bulk_timeout(args.upstream.timeout.max(MIN_BULK_TIMEOUT)),
    )?;

    tracing::info!(
        "Upstream: {}  Sink: {} (api key {})",
        upstream.base_url(),
        args.sink.sink_url,
        if args.sink.sink_api_key.is_some() { "set" } else { "not set" }
    );

    let mut shipper = Shipper::new(upstream, sink, config);
    if let Some(seed) = args.seed {
        shipper = shipper.with_seed(seed);
    }
    Ok(shipper.run(shutdown).await)
}
