//! [`CatalogClient`] — the third-party exercise catalog.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/exercises/{id}` | 404 ⇒ `NotFound` |
//! | `GET`  | `/exercises/search?q=&limit=&offset=&threshold=` | Relevance order |
//! | `GET`  | `/muscles/{muscle}/exercises?limit=` | Capped locally at `limit` |

use std::fmt;

use fitit_core::{
  Error, ExerciseId, Result, exercise::CatalogExercise, store::ExerciseCatalog,
};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::{
  config::{CatalogConfig, timeouts},
  envelope::{decode_list, unwrap_single},
  error::ConfigError,
  http::{base_url, describe_transport, endpoint, error_message},
};

const API_KEY_HEADER: &str = "x-api-key";

/// Results requested by a text search when the caller has no preference.
pub const DEFAULT_SEARCH_LIMIT: usize = 30;
/// Fuzzy-match threshold sent with every search.
const SEARCH_THRESHOLD: f64 = 0.3;

/// Async HTTP client for the exercise catalog.
#[derive(Clone)]
pub struct CatalogClient {
  http:    Client,
  base:    Url,
  api_key: String,
}

impl fmt::Debug for CatalogClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CatalogClient")
      .field("base", &self.base.as_str())
      .field("api_key", &"[REDACTED]")
      .finish()
  }
}

impl CatalogClient {
  pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
    let base = base_url("catalog", &config.url)?;
    let (timeout, connect_timeout) =
      timeouts(config.timeout_secs, config.connect_timeout_secs);
    let http = Client::builder()
      .timeout(timeout)
      .connect_timeout(connect_timeout)
      .build()?;
    Ok(Self {
      http,
      base,
      api_key: config.api_key.clone(),
    })
  }

  /// GET `url` and return the JSON payload.
  ///
  /// 404 is `NotFound`; anything else that is not a success, including a
  /// rejected API key or rate limiting, is `CatalogUnavailable`.
  async fn fetch(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
    tracing::debug!(url = %url, ?query, "catalog request");

    let response = self
      .http
      .get(url.clone())
      .header(API_KEY_HEADER, &self.api_key)
      .query(query)
      .send()
      .await
      .map_err(|e| {
        Error::CatalogUnavailable(format!("{}: {}", url.path(), describe_transport(&e)))
      })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Err(Error::NotFound(format!("catalog has no {}", url.path())));
    }
    if !status.is_success() {
      let message = error_message(response).await;
      tracing::debug!(url = %url, %status, %message, "catalog error status");
      return Err(Error::CatalogUnavailable(format!("{status}: {message}")));
    }

    response.json().await.map_err(|e| {
      Error::CatalogUnavailable(format!("undecodable response from {}: {e}", url.path()))
    })
  }
}

impl ExerciseCatalog for CatalogClient {
  async fn get_by_id(&self, id: &ExerciseId) -> Result<CatalogExercise> {
    let url = endpoint(&self.base, &["exercises", id.as_str()]);
    let payload = self.fetch(url, &[]).await?;

    let (shape, item) = unwrap_single(payload)
      .ok_or_else(|| Error::NotFound(format!("catalog has no exercise {id}")))?;
    tracing::trace!(exercise_id = %id, ?shape, "unwrapped catalog item");

    serde_json::from_value(item).map_err(|e| {
      Error::CatalogUnavailable(format!("malformed exercise {id}: {e}"))
    })
  }

  async fn search_by_text(
    &self,
    query: &str,
    limit: usize,
  ) -> Result<Vec<CatalogExercise>> {
    let query = query.trim();
    if query.is_empty() {
      return Ok(Vec::new());
    }

    let url = endpoint(&self.base, &["exercises", "search"]);
    let payload = self
      .fetch(url, &[
        ("q", query.to_owned()),
        ("limit", limit.to_string()),
        ("offset", "0".to_owned()),
        ("threshold", SEARCH_THRESHOLD.to_string()),
      ])
      .await?;
    Ok(decode_list(payload))
  }

  async fn list_by_muscle_group(
    &self,
    muscle: &str,
    limit: usize,
  ) -> Result<Vec<CatalogExercise>> {
    let url = endpoint(&self.base, &["muscles", muscle, "exercises"]);
    let payload = self.fetch(url, &[("limit", limit.to_string())]).await?;

    let mut exercises = decode_list(payload);
    exercises.truncate(limit);
    Ok(exercises)
  }
}
