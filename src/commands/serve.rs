//! Generator service front door.

use crate::server::{self, AppState};
use crate::{AgeOpts, StoreOpts};
use anyhow::Context;
use clap::Args;
use schema_store::SchemaStore;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:5000", env = "GENERATOR_LISTEN")]
    pub listen: SocketAddr,

    #[command(flatten)]
    pub store: StoreOpts,

    #[command(flatten)]
    pub ages: AgeOpts,
}

/// Serve until `shutdown` fires.
pub async fn run_serve(
    args: ServeArgs,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let state = AppState::new(
        SchemaStore::from_path(args.store.schema_file),
        args.ages.age_range()?,
    );
    // Fail at startup rather than on the first request.
    state.store().list().context("Failed to load schemas")?;

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;

    server::serve(listener, state, async move {
        let _ = shutdown.recv().await;
    })
    .await
    .context("Generator service failed")?;

    tracing::info!("Generator service stopped");
    Ok(())
}
