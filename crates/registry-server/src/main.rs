//! registry-server binary.
//!
//! Reads `registry.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the registry API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use registry_server::{expand_tilde, load_config, mask::Masking};
use registry_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Civil registry and electoral roll server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "registry.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;

  // Initialise tracing.
  let writer =
    Masking::new(std::io::stdout, server_cfg.mask_logs).context("invalid log mask pattern")?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(writer)
    .init();

  let store_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = registry_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
