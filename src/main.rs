//! Command-line interface for record-shipper
//!
//! # Usage Examples
//!
//! ## Generator service
//! ```bash
//! record-shipper serve --listen 0.0.0.0:5000 --schema-file schemas.json
//! ```
//!
//! ## Shipper
//! ```bash
//! # Ship the built-in customer/music field set every 15 seconds
//! record-shipper ship \
//!   --api-base http://localhost:5000 \
//!   --sink-url http://localhost:9200 --sink-index customers \
//!   --interval 15s --min-count 80 --max-count 150
//!
//! # Ship a custom field set with an API key from the environment
//! SINK_API_KEY=... record-shipper ship --fields-file fields.json
//! ```
//!
//! ## Local generation and schema management
//! ```bash
//! record-shipper generate --field "Email=email_address" --field "Country=alpha2" --count 3
//! record-shipper schemas --schema-file schemas.json put demo --field "Email=email_address" --count 3
//! record-shipper schemas --schema-file schemas.json list
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`) and goes to stderr.

use clap::{Parser, Subcommand};
use record_shipper::commands::{
    run_generate, run_schemas, run_serve, run_ship, GenerateArgs, SchemasArgs, ServeArgs,
    ShipArgs,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "record-shipper")]
#[command(about = "Generate schema-described synthetic records and ship them to a search sink")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the generator service (HTTP front door)
    Serve {
        #[command(flatten)]
        args: ServeArgs,
    },

    /// Periodically pull batches from the generator service into the sink
    Ship {
        #[command(flatten)]
        args: ShipArgs,
    },

    /// Generate records once and write them out
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Manage schemas stored in a schema file
    Schemas {
        #[command(flatten)]
        args: SchemasArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for generated data
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { args } => run_serve(args, setup_shutdown_handler()).await,
        Commands::Ship { args } => run_ship(args, setup_shutdown_handler()).await.map(|_| ()),
        Commands::Generate { args } => run_generate(args),
        Commands::Schemas { args } => run_schemas(args, &mut std::io::stdout().lock()),
    }
}

/// Sets up a shutdown signal handler
fn setup_shutdown_handler() -> tokio::sync::broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {e}");
            // Keep the sender alive so receivers don't see a closed channel.
            std::future::pending::<()>().await;
        }

        info!("Received interrupt signal (Ctrl+C), shutting down");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}
