//! Connection settings for the backend and the catalog.
//!
//! Every field has a default, so an empty config file (or none) works against
//! the public deployments.

use std::{fmt, time::Duration};

use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str = "https://fitit-backend.onrender.com";
pub const DEFAULT_CATALOG_URL: &str = "https://www.exercisedb.dev/api/v1";
/// Key the public catalog accepts for anonymous use.
pub const DEFAULT_CATALOG_API_KEY: &str = "exercisedb";

/// The first-party backend (auth, profile, saved exercises, admin).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
  /// Base URL; endpoints live under `{url}/api`.
  pub url:                  String,
  pub timeout_secs:         u64,
  pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
  fn default() -> Self {
    Self {
      url:                  DEFAULT_BACKEND_URL.to_owned(),
      timeout_secs:         10,
      connect_timeout_secs: 5,
    }
  }
}

/// The external exercise catalog.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
  pub url:                  String,
  /// Sent as the `x-api-key` header on every request.
  pub api_key:              String,
  pub timeout_secs:         u64,
  pub connect_timeout_secs: u64,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      url:                  DEFAULT_CATALOG_URL.to_owned(),
      api_key:              DEFAULT_CATALOG_API_KEY.to_owned(),
      timeout_secs:         10,
      connect_timeout_secs: 5,
    }
  }
}

impl fmt::Debug for CatalogConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CatalogConfig")
      .field("url", &self.url)
      .field("api_key", &"[REDACTED]")
      .field("timeout_secs", &self.timeout_secs)
      .field("connect_timeout_secs", &self.connect_timeout_secs)
      .finish()
  }
}

pub(crate) fn timeouts(timeout_secs: u64, connect_secs: u64) -> (Duration, Duration) {
  (
    Duration::from_secs(timeout_secs.max(1)),
    Duration::from_secs(connect_secs.max(1)),
  )
}
