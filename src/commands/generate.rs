//! One-shot record generation.

use super::fields_from_specs;
use crate::{AgeOpts, StoreOpts};
use anyhow::Context;
use clap::Args;
use record_core::{write_records, OutputFormat, Schema};
use record_generator::{FakeProvider, RecordGenerator};
use schema_store::SchemaStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Count used when neither `--count` nor a stored schema gives one.
const DEFAULT_COUNT: usize = 10;

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Output field as NAME=TYPE (repeatable, order is kept)
    #[arg(long = "field", value_name = "NAME=TYPE")]
    pub fields: Vec<String>,

    /// Generate from a stored schema instead of --field
    #[arg(long, conflicts_with = "fields", requires = "schema_file")]
    pub schema: Option<String>,

    #[command(flatten)]
    pub store: StoreOpts,

    /// Number of records (defaults to the stored schema's count, or 10)
    #[arg(long)]
    pub count: Option<usize>,

    /// Output format: ndjson or json
    #[arg(long, default_value = "ndjson")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub ages: AgeOpts,
}

impl GenerateArgs {
    /// Resolve the schema to generate from, validating all inputs.
    pub fn resolve_schema(&self) -> anyhow::Result<Schema> {
        let schema = match &self.schema {
            Some(name) => {
                let store = SchemaStore::from_path(self.store.schema_file.clone());
                let stored = store
                    .get(name)?
                    .with_context(|| format!("Schema '{name}' not found in {}", store.describe()))?;
                let count = self.count.unwrap_or(stored.count);
                Schema::new(stored.name, stored.fields, count)?
            }
            None => {
                if self.fields.is_empty() {
                    anyhow::bail!("No fields given; use --field NAME=TYPE or --schema NAME");
                }
                let fields = fields_from_specs(&self.fields)?;
                Schema::new("generate", fields, self.count.unwrap_or(DEFAULT_COUNT))?
            }
        };
        Ok(schema)
    }
}

/// Generate records and write them to the output.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let schema = args.resolve_schema()?;
    let provider = FakeProvider::new().with_age_range(args.ages.age_range()?);
    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Generating {} record(s) with {} field(s) (seed={seed})",
        schema.count,
        schema.fields.len()
    );
    let mut generator = RecordGenerator::with_provider(provider, seed);
    let records = generator.generate_schema(&schema);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    write_records(&mut writer, &records, args.format).context("Failed to write records")?;

    if let Some(path) = &args.output {
        tracing::info!(
            "Wrote {} record(s) as {} to {}",
            records.len(),
            args.format,
            path.display()
        );
    }
    Ok(())
}
