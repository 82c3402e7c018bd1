//! taskman, a terminal task tracker.
//!
//! Reads menu choices from stdin and talks to one storage backend chosen at
//! startup: PostgreSQL, or an in-memory store for demo use without a
//! database. The backend is constructed here once and injected into the
//! shell behind the storage port trait.

use std::sync::Arc;

use task_store::{MemoryStore, PgStore, TaskStore};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod shell;

use config::{Backend, Config};
use shell::Shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if dotenvy::dotenv().is_err() {
        eprintln!("No .env file found, using the process environment");
    }

    let config = Config::load()?;

    let log_level = match config.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("taskman={log_level},task_store={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.backend,
        "starting taskman"
    );

    // A failed connection here is the one fatal storage error.
    let store: Arc<dyn TaskStore> = match config.backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Postgres => Arc::new(PgStore::connect(&config.database_url()).await?),
    };

    let result = Shell::new(Arc::clone(&store)).run().await;

    // Release the pool on every exit path, including shell I/O errors.
    store.close().await;
    info!("shutting down");

    result.map_err(Into::into)
}
