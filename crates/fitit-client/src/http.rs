//! Plumbing shared by both clients.

use reqwest::{Response, Url};
use serde_json::Value;

use crate::error::ConfigError;

/// Parse and validate a configured base URL.
pub(crate) fn base_url(which: &'static str, raw: &str) -> Result<Url, ConfigError> {
  let invalid = |reason: String| ConfigError::InvalidUrl {
    which,
    url: raw.to_owned(),
    reason,
  };

  let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
  if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
    return Err(invalid("expected an http(s) base url".to_owned()));
  }
  Ok(url)
}

/// Append `segments` to `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
  let mut url = base.clone();
  // Bases are validated in `base_url`, so this never fails.
  if let Ok(mut path) = url.path_segments_mut() {
    path.pop_if_empty().extend(segments);
  }
  url
}

/// Best-effort human-readable message from an error response.
///
/// Prefers a JSON `message` or `error` field, then the raw body, then the
/// status reason.
pub(crate) async fn error_message(response: Response) -> String {
  let status = response.status();
  let body = response.text().await.unwrap_or_default();

  let from_json = serde_json::from_str::<Value>(&body).ok().and_then(|v| {
    ["message", "error"]
      .iter()
      .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_owned))
  });

  from_json
    .or_else(|| {
      let trimmed = body.trim();
      (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
    })
    .unwrap_or_else(|| {
      status.canonical_reason().unwrap_or("request failed").to_owned()
    })
}

/// Describe a transport failure, calling out timeouts explicitly.
pub(crate) fn describe_transport(e: &reqwest::Error) -> String {
  if e.is_timeout() {
    format!("timed out: {e}")
  } else {
    e.to_string()
  }
}
