//! The collaborator traits: [`FavoritesStore`] and [`ExerciseCatalog`].
//!
//! Implemented over HTTP by `fitit-client` and in-process by
//! [`crate::memory::MemoryFavorites`]. The [`crate::hydrate::Hydrator`]
//! depends on these abstractions only.
//!
//! All methods return `Send` futures so implementations can be driven from a
//! multi-threaded tokio runtime.

use std::future::Future;

use crate::{
  ExerciseId, Result, UserId, exercise::CatalogExercise, saved::SavedReference,
};

// ─── Favorites ───────────────────────────────────────────────────────────────

/// Access to the first-party saved-exercise relationships, keyed by
/// (user, exercise).
pub trait FavoritesStore: Send + Sync {
  /// All references saved by `user`, in the store's insertion order. That
  /// order is the canonical display order downstream.
  ///
  /// Fails with `StoreUnavailable` on transport failure and `Unauthorized`
  /// when the session is invalid. Neither is retried.
  fn list_by_user<'a>(
    &'a self,
    user: &'a UserId,
  ) -> impl Future<Output = Result<Vec<SavedReference>>> + Send + 'a;

  /// Save `exercise` for `user`. Fails with `Conflict` if the pair already
  /// exists; callers treat that as "already saved".
  fn create<'a>(
    &'a self,
    user: &'a UserId,
    exercise: &'a ExerciseId,
  ) -> impl Future<Output = Result<SavedReference>> + Send + 'a;

  /// Remove the (user, exercise) reference. A missing reference is reported
  /// as `NotFound`, not silently ignored.
  fn remove<'a>(
    &'a self,
    user: &'a UserId,
    exercise: &'a ExerciseId,
  ) -> impl Future<Output = Result<()>> + Send + 'a;
}

impl<T: FavoritesStore> FavoritesStore for &T {
  fn list_by_user<'a>(
    &'a self,
    user: &'a UserId,
  ) -> impl Future<Output = Result<Vec<SavedReference>>> + Send + 'a {
    (**self).list_by_user(user)
  }

  fn create<'a>(
    &'a self,
    user: &'a UserId,
    exercise: &'a ExerciseId,
  ) -> impl Future<Output = Result<SavedReference>> + Send + 'a {
    (**self).create(user, exercise)
  }

  fn remove<'a>(
    &'a self,
    user: &'a UserId,
    exercise: &'a ExerciseId,
  ) -> impl Future<Output = Result<()>> + Send + 'a {
    (**self).remove(user, exercise)
  }
}

/// Whether `user` currently has `exercise` saved.
pub async fn is_saved<S: FavoritesStore>(
  store: &S,
  user: &UserId,
  exercise: &ExerciseId,
) -> Result<bool> {
  let saved = store.list_by_user(user).await?;
  Ok(saved.iter().any(|r| &r.exercise_id == exercise))
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Read-only access to the external exercise catalog.
pub trait ExerciseCatalog: Send + Sync {
  /// Full detail for one exercise. `NotFound` is an expected outcome: catalog
  /// ids go stale. Transport failures are `CatalogUnavailable`.
  fn get_by_id<'a>(
    &'a self,
    id: &'a ExerciseId,
  ) -> impl Future<Output = Result<CatalogExercise>> + Send + 'a;

  /// Free-text search in catalog (relevance) order. A blank query yields an
  /// empty list without contacting the catalog.
  fn search_by_text<'a>(
    &'a self,
    query: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CatalogExercise>>> + Send + 'a;

  /// Exercises for a muscle group, in catalog order, never more than
  /// `limit` entries regardless of what the catalog returns.
  fn list_by_muscle_group<'a>(
    &'a self,
    muscle: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CatalogExercise>>> + Send + 'a;
}

impl<T: ExerciseCatalog> ExerciseCatalog for &T {
  fn get_by_id<'a>(
    &'a self,
    id: &'a ExerciseId,
  ) -> impl Future<Output = Result<CatalogExercise>> + Send + 'a {
    (**self).get_by_id(id)
  }

  fn search_by_text<'a>(
    &'a self,
    query: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CatalogExercise>>> + Send + 'a {
    (**self).search_by_text(query, limit)
  }

  fn list_by_muscle_group<'a>(
    &'a self,
    muscle: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CatalogExercise>>> + Send + 'a {
    (**self).list_by_muscle_group(muscle, limit)
  }
}
