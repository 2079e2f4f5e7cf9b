//! The hydration coordinator: saved references in, display-ready favorites
//! out.
//!
//! A hydration cycle reads the user's reference list once, resolves every
//! referenced exercise against the catalog, and returns one
//! [`HydratedFavorite`] per reference in the store's order. The reference
//! list is mandatory; individual catalog lookups are not. A lookup that fails
//! for any reason becomes a placeholder entry and the cycle continues.
//!
//! Lookups run concurrently, at most [`Hydrator::max_in_flight`] at a time,
//! and are reassembled by exercise id before the output is built in reference
//! order, so completion order never shows in the result. Nothing is cached
//! between cycles: after a save or remove the caller hydrates again.
//!
//! Dropping the future returned by [`Hydrator::hydrate`] cancels all in-flight
//! lookups. They are plain reads, so nothing needs rolling back.

use std::collections::{HashMap, HashSet};

use futures_util::stream::{self, StreamExt as _};

use crate::{
  ExerciseId, Result, UserId,
  exercise::CatalogExercise,
  saved::HydratedFavorite,
  store::{ExerciseCatalog, FavoritesStore},
};

/// Default bound on concurrent catalog lookups per hydration cycle.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Joins a [`FavoritesStore`] with an [`ExerciseCatalog`].
///
/// Holds no mutable state; concurrent `hydrate` calls share nothing but the
/// two collaborators.
#[derive(Debug, Clone)]
pub struct Hydrator<F, C> {
  favorites:     F,
  catalog:       C,
  max_in_flight: usize,
}

impl<F, C> Hydrator<F, C>
where
  F: FavoritesStore,
  C: ExerciseCatalog,
{
  pub fn new(favorites: F, catalog: C) -> Self {
    Self {
      favorites,
      catalog,
      max_in_flight: DEFAULT_MAX_IN_FLIGHT,
    }
  }

  /// Bound the number of concurrent catalog lookups. `1` gives strictly
  /// sequential lookups; `0` is treated as `1`.
  pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
    self.max_in_flight = max_in_flight.max(1);
    self
  }

  pub fn max_in_flight(&self) -> usize { self.max_in_flight }

  /// Resolve every saved reference of `user` into a [`HydratedFavorite`].
  ///
  /// Fails only when the reference list cannot be read, with that error
  /// unchanged. Otherwise the output has exactly one entry per reference, in
  /// reference order; unresolved entries carry `exercise: None`.
  pub async fn hydrate(&self, user: &UserId) -> Result<Vec<HydratedFavorite>> {
    let references = self.favorites.list_by_user(user).await?;
    if references.is_empty() {
      return Ok(Vec::new());
    }

    // The store should never hold duplicates, but if it does each id is
    // looked up once and shared by every reference to it.
    let mut seen = HashSet::new();
    let unique: Vec<&ExerciseId> = references
      .iter()
      .map(|r| &r.exercise_id)
      .filter(|id| seen.insert(*id))
      .collect();

    tracing::debug!(
      user = %user,
      references = references.len(),
      lookups = unique.len(),
      "hydrating saved exercises"
    );

    let resolved: HashMap<&ExerciseId, Option<CatalogExercise>> =
      stream::iter(unique)
        .map(|id| async move { (id, self.resolve(id).await) })
        .buffered(self.max_in_flight)
        .collect()
        .await;

    let hydrated: Vec<HydratedFavorite> = references
      .iter()
      .map(|r| HydratedFavorite {
        record_id:   r.record_id.clone(),
        exercise_id: r.exercise_id.clone(),
        exercise:    resolved.get(&r.exercise_id).cloned().flatten(),
      })
      .collect();

    let placeholders = hydrated.iter().filter(|h| h.is_placeholder()).count();
    if placeholders > 0 {
      tracing::warn!(
        user = %user,
        placeholders,
        total = hydrated.len(),
        "hydration degraded to placeholders"
      );
    }

    Ok(hydrated)
  }

  /// One catalog lookup; every failure becomes `None`.
  async fn resolve(&self, id: &ExerciseId) -> Option<CatalogExercise> {
    match self.catalog.get_by_id(id).await {
      Ok(exercise) => Some(exercise),
      Err(e) => {
        tracing::warn!(exercise_id = %id, error = %e, "catalog lookup failed");
        None
      }
    }
  }
}
