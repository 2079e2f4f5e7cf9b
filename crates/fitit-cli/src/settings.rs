//! Layered configuration: optional TOML file, then `FITIT_*` environment
//! variables (`__` separates sections, e.g. `FITIT_CATALOG__API_KEY`).

use std::{fmt, path::Path};

use anyhow::Context as _;
use fitit_client::{BackendConfig, CatalogConfig};
use fitit_core::hydrate::DEFAULT_MAX_IN_FLIGHT;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub backend: BackendConfig,
  pub catalog: CatalogConfig,
  pub session: SessionConfig,
  pub hydrate: HydrateConfig,
}

/// Credentials used to sign in before commands that need a session.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
  pub email:    Option<String>,
  pub password: Option<String>,
}

impl fmt::Debug for SessionConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SessionConfig")
      .field("email", &self.email)
      .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
      .finish()
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HydrateConfig {
  /// Concurrent catalog lookups per hydration.
  pub max_in_flight: usize,
}

impl Default for HydrateConfig {
  fn default() -> Self {
    Self {
      max_in_flight: DEFAULT_MAX_IN_FLIGHT,
    }
  }
}

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("FITIT")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .with_context(|| format!("failed to read config from {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}
