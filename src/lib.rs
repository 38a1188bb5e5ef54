//! record-shipper library
//!
//! Generates synthetic records from named schemas and ships them to an
//! Elasticsearch-compatible search sink.
//!
//! # Components
//!
//! - `record_core` - schemas, field maps and record values
//! - `record_generator` - field type registry and locale-coherent generation
//! - `schema_store` - named schema storage (in memory or a JSON file)
//! - `search_sink` - chunked bulk writes to the sink
//! - [`server`] - HTTP front door serving generated data
//! - [`shipper`] - register -> fetch -> stamp -> deliver loop
//!
//! # CLI Usage
//!
//! ```bash
//! # Run the generator service
//! record-shipper serve --listen 0.0.0.0:5000 --schema-file schemas.json
//!
//! # Ship batches from it into a sink every 15 seconds
//! record-shipper ship --api-base http://localhost:5000 --sink-url http://localhost:9200
//!
//! # One-shot generation
//! record-shipper generate --field "Email=email_address" --count 3
//! ```

use clap::Parser;
use record_generator::AgeRange;
use std::path::PathBuf;
use std::time::Duration;

pub mod commands;
pub mod config;
pub mod server;
pub mod shipper;
pub mod upstream;

#[derive(Parser, Clone, Debug)]
pub struct UpstreamOpts {
    /// Base URL of the generator service
    #[arg(long, default_value = "http://localhost:5000", env = "SHIPPER_API_BASE")]
    pub api_base: String,

    /// Timeout for each upstream request (e.g. 10, 10s, 1m)
    #[arg(long, default_value = "10s", value_parser = config::parse_interval)]
    pub timeout: Duration,
}

#[derive(Parser, Clone, Debug)]
pub struct SinkOpts {
    /// Search sink base URL
    #[arg(long, default_value = "http://localhost:9200", env = "SINK_URL")]
    pub sink_url: String,

    /// Target index
    #[arg(long, default_value = "elasticshipper", env = "SINK_INDEX")]
    pub sink_index: String,

    /// API key sent as `Authorization: ApiKey <key>`
    #[arg(long, env = "SINK_API_KEY", hide_env_values = true)]
    pub sink_api_key: Option<String>,

    /// Maximum documents per bulk request
    #[arg(long, default_value = "1000")]
    pub bulk_size: usize,
}

#[derive(Parser, Clone, Debug)]
pub struct StoreOpts {
    /// JSON file holding schemas; schemas live in memory when omitted
    #[arg(long, value_name = "PATH")]
    pub schema_file: Option<PathBuf>,
}

#[derive(Parser, Clone, Copy, Debug)]
pub struct AgeOpts {
    /// Minimum age for generated birth dates
    #[arg(long, default_value = "18")]
    pub min_age: u32,

    /// Maximum age for generated birth dates
    #[arg(long, default_value = "90")]
    pub max_age: u32,
}

impl AgeOpts {
    pub fn age_range(&self) -> anyhow::Result<AgeRange> {
        Ok(AgeRange::new(self.min_age, self.max_age)?)
    }
}
