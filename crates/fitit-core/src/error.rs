//! Error taxonomy shared by every collaborator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller's session is missing, invalid or expired.
  #[error("unauthorized: session is missing or expired")]
  Unauthorized,

  /// A saved reference for this (user, exercise) pair already exists.
  #[error("conflict: {0}")]
  Conflict(String),

  /// Missing saved reference, missing catalog entry, or missing user.
  #[error("not found: {0}")]
  NotFound(String),

  /// Transport failure, timeout or unusable response from the first-party
  /// backend.
  #[error("saved-exercise backend unavailable: {0}")]
  StoreUnavailable(String),

  /// Transport failure, timeout or unusable response from the catalog.
  #[error("exercise catalog unavailable: {0}")]
  CatalogUnavailable(String),

  /// Any other non-success answer from the backend (validation errors,
  /// bad credentials on sign-in, ...).
  #[error("request rejected ({status}): {message}")]
  Rejected { status: u16, message: String },
}

impl Error {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

  pub fn is_conflict(&self) -> bool { matches!(self, Self::Conflict(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
