//! HTTP server wiring for the civil registry.
//!
//! Loads [`ServerConfig`], opens the SQLite store, and serves the JSON API
//! from `registry-api` under `/api`.

pub mod mask;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use registry_core::store::RegistryStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `registry.toml` and
/// `REGISTRY_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  /// Mask `token:` values in log output.
  pub mask_logs:     bool,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Layer defaults, the optional TOML file at `path`, then the environment.
/// A missing file is not an error.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("database_path", "registry.db")?
    .set_default("mask_logs", true)?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("REGISTRY"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// The full application: the API nested under `/api`, with request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RegistryStore + 'static,
{
  Router::new()
    .nest("/api", registry_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use registry_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn missing_config_file_falls_back_to_defaults() {
    let cfg = load_config(Path::new("/nonexistent/registry.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_path, PathBuf::from("registry.db"));
    assert!(cfg.mask_logs);
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("registry-test-{}.toml", std::process::id()));
    std::fs::write(&path, "port = 9090\nmask_logs = false\n").unwrap();
    let cfg = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.port, 9090);
    assert!(!cfg.mask_logs);
    assert_eq!(cfg.host, "127.0.0.1");
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/r.db")), PathBuf::from(home).join("r.db"));
    assert_eq!(expand_tilde(Path::new("/abs/r.db")), PathBuf::from("/abs/r.db"));
  }

  #[tokio::test]
  async fn api_is_served_under_prefix() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = router(Arc::new(store));

    let req = Request::builder().uri("/api/countries").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder().uri("/countries").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
