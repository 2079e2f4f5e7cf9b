//! [`BackendClient`] — the first-party backend over HTTP/JSON.

use fitit_core::{Error, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
  config::{BackendConfig, timeouts},
  error::ConfigError,
  http::{base_url, describe_transport, endpoint, error_message},
};

/// Async HTTP client for the FitIt backend.
///
/// Holds the session cookie set by sign-in; clones share it.
#[derive(Debug, Clone)]
pub struct BackendClient {
  http: Client,
  base: Url,
}

impl BackendClient {
  pub fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
    let base = base_url("backend", &config.url)?;
    let (timeout, connect_timeout) =
      timeouts(config.timeout_secs, config.connect_timeout_secs);
    let http = Client::builder()
      .cookie_store(true)
      .timeout(timeout)
      .connect_timeout(connect_timeout)
      .build()?;
    Ok(Self { http, base })
  }

  /// `{base}/api/{segments...}`
  pub(crate) fn url(&self, segments: &[&str]) -> Url {
    let mut all = Vec::with_capacity(segments.len() + 1);
    all.push("api");
    all.extend_from_slice(segments);
    endpoint(&self.base, &all)
  }

  pub(crate) fn http(&self) -> &Client { &self.http }

  /// Send `request` and map transport failures and error statuses onto the
  /// shared taxonomy.
  pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
    let request = request
      .build()
      .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
    let (method, url) = (request.method().clone(), request.url().clone());
    tracing::debug!(%method, url = %url, "backend request");

    let response = self.http.execute(request).await.map_err(|e| {
      tracing::debug!(%method, url = %url, error = %e, "backend transport failure");
      Error::StoreUnavailable(format!("{method} {}: {}", url.path(), describe_transport(&e)))
    })?;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }
    let message = error_message(response).await;
    tracing::debug!(%method, url = %url, %status, %message, "backend error status");
    Err(status_error(status, message))
  }

  /// [`Self::send`], then decode the JSON body.
  pub(crate) async fn send_json<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
  ) -> Result<T> {
    let response = self.send(request).await?;
    let path = response.url().path().to_owned();
    response.json().await.map_err(|e| {
      Error::StoreUnavailable(format!("undecodable response from {path}: {e}"))
    })
  }
}

/// Backend status ⇒ error taxonomy.
pub(crate) fn status_error(status: StatusCode, message: String) -> Error {
  match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized,
    StatusCode::NOT_FOUND => Error::NotFound(message),
    StatusCode::CONFLICT => Error::Conflict(message),
    s if s.is_server_error() => Error::StoreUnavailable(format!("{s}: {message}")),
    s => Error::Rejected {
      status: s.as_u16(),
      message,
    },
  }
}
