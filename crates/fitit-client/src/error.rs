//! Errors raised while building a client. Request failures use
//! [`fitit_core::Error`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid {which} url {url:?}: {reason}")]
  InvalidUrl {
    which:  &'static str,
    url:    String,
    reason: String,
  },

  #[error("failed to build HTTP client: {0}")]
  Http(#[from] reqwest::Error),
}
