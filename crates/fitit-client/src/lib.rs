//! HTTP implementations of the FitIt collaborator contracts.
//!
//! - [`BackendClient`] talks to the first-party backend: saved exercises
//!   (implementing [`fitit_core::store::FavoritesStore`]), sign-in and
//!   profile, and admin user management. It keeps a cookie store, so the
//!   session set by sign-in rides along on every later call.
//! - [`CatalogClient`] talks to the third-party exercise catalog
//!   (implementing [`fitit_core::store::ExerciseCatalog`]) with a static API
//!   key.
//!
//! Both clients are cheap to clone: the inner [`reqwest::Client`] is
//! `Arc`-based.

mod admin;
mod backend;
mod catalog;
mod http;
mod saved;
mod users;

pub mod config;
pub mod envelope;
pub mod error;

pub use backend::BackendClient;
pub use catalog::{CatalogClient, DEFAULT_SEARCH_LIMIT};
pub use config::{BackendConfig, CatalogConfig};
pub use error::ConfigError;
