//! Cinderbin server binary.
//!
//! # Usage
//!
//! ```bash
//! # Durable store (default path: cinderbin.redb)
//! cinderbin-server --bind 127.0.0.1:3001
//!
//! # Ephemeral in-memory store (development)
//! cinderbin-server --in-memory
//! ```

use std::{path::PathBuf, time::Duration};

use cinderbin_core::PasteStore;
use cinderbin_server::{
    MemoryStore, PasteService, RedbStore, ServerConfig, Sweeper, SystemClock, build_router,
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Cinderbin paste server
#[derive(Parser, Debug)]
#[command(name = "cinderbin-server")]
#[command(about = "Zero-knowledge encrypted pastebin server")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1:3001")]
    bind: String,

    /// Path to the paste database
    #[arg(long, default_value = "cinderbin.redb")]
    db: PathBuf,

    /// Keep pastes in memory only (lost on restart)
    #[arg(long)]
    in_memory: bool,

    /// Seconds between expiry sweeps
    #[arg(long, default_value = "60")]
    sweep_interval_secs: u64,

    /// Seconds a storage call may take before the request fails
    #[arg(long, default_value = "5")]
    store_timeout_secs: u64,

    /// Maximum request body size in MiB
    #[arg(long, default_value = "64")]
    max_body_mib: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Cinderbin server starting");

    let config = ServerConfig {
        bind_address: args.bind,
        sweep_interval: Duration::from_secs(args.sweep_interval_secs),
        store_timeout: Duration::from_secs(args.store_timeout_secs),
        max_body_bytes: args.max_body_mib * 1024 * 1024,
    };

    if args.in_memory {
        tracing::warn!("In-memory store selected - all pastes are lost on restart");
        run(MemoryStore::new(), config).await
    } else {
        tracing::info!("Opening paste database at {}", args.db.display());
        let store = RedbStore::open(&args.db)?;
        run(store, config).await
    }
}

/// Serve requests over `store` until the listener fails.
async fn run<S: PasteStore>(
    store: S,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = PasteService::new(store, SystemClock::new(), config.store_timeout);
    let sweeper = Sweeper::start(service.clone(), config.sweep_interval);

    let router = build_router(service, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    sweeper.stop().await;

    Ok(())
}
