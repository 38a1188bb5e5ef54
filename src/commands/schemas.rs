//! Schema management against a schema file.

use super::fields_from_specs;
use anyhow::Context;
use clap::{Args, Subcommand};
use schema_store::SchemaStore;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct SchemasArgs {
    /// JSON file holding schemas
    #[arg(long, value_name = "PATH")]
    pub schema_file: PathBuf,

    #[command(subcommand)]
    pub action: SchemaAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum SchemaAction {
    /// List schema names
    List,

    /// Print one schema as JSON
    Show { name: String },

    /// Create or replace a schema
    Put {
        name: String,

        /// Output field as NAME=TYPE (repeatable, order is kept)
        #[arg(long = "field", value_name = "NAME=TYPE", required = true)]
        fields: Vec<String>,

        /// Records generated per request
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Remove a schema
    Delete { name: String },
}

/// Run a schema action, writing its output to `out`.
pub fn run_schemas<W: Write>(args: SchemasArgs, out: &mut W) -> anyhow::Result<()> {
    let store = SchemaStore::json_file(&args.schema_file);

    match args.action {
        SchemaAction::List => {
            for name in store.list()? {
                writeln!(out, "{name}")?;
            }
        }
        SchemaAction::Show { name } => {
            let schema = store
                .get(&name)?
                .with_context(|| format!("Schema '{name}' not found in {}", store.describe()))?;
            serde_json::to_writer_pretty(&mut *out, &schema)?;
            writeln!(out)?;
        }
        SchemaAction::Put {
            name,
            fields,
            count,
        } => {
            let fields = fields_from_specs(&fields)?;
            let schema = store.put(name, fields, count)?;
            tracing::info!(
                "Stored schema {} with {} field(s) in {}",
                schema.name,
                schema.fields.len(),
                store.describe()
            );
            writeln!(out, "Schema '{}' stored", schema.name)?;
        }
        SchemaAction::Delete { name } => {
            if !store.delete(&name)? {
                anyhow::bail!("Schema '{name}' not found in {}", store.describe());
            }
            writeln!(out, "Schema '{name}' deleted")?;
        }
    }
    Ok(())
}
