//! Core types and trait definitions for FitIt.
//!
//! This crate is deliberately free of HTTP dependencies. The remote
//! collaborators (the saved-exercise backend and the exercise catalog) are
//! reached only through the traits in [`store`]; `fitit-client` provides the
//! HTTP implementations.

// Native `async fn` in traits; the trait methods spell out their `Send`
// futures explicitly.
#![allow(async_fn_in_trait)]

pub mod browse;
pub mod error;
pub mod exercise;
pub mod hydrate;
pub mod id;
pub mod memory;
pub mod saved;
pub mod store;
pub mod user;

pub use error::{Error, Result};
pub use id::{ExerciseId, RecordId, UserId};

#[cfg(test)]
mod tests;
