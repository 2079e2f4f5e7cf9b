//! Saved references (favorites) and their hydrated form.

use serde::{Deserialize, Serialize};

use crate::{ExerciseId, RecordId, UserId, exercise::CatalogExercise};

/// One favorite relationship as held by the first-party store.
///
/// Created by an explicit save and destroyed by an explicit remove; no field
/// changes in between. At most one reference exists per
/// (`user_id`, `exercise_id`) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedReference {
  /// Assigned by the store at creation time.
  #[serde(rename = "_id", alias = "recordId")]
  pub record_id:   RecordId,
  #[serde(rename = "userId")]
  pub user_id:     UserId,
  /// Weak reference into the catalog; the entry may no longer exist there.
  #[serde(rename = "exerciseId")]
  pub exercise_id: ExerciseId,
}

/// Body of the create and remove calls: the (user, exercise) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedKey {
  pub user_id:     UserId,
  pub exercise_id: ExerciseId,
}

impl SavedKey {
  pub fn new(user_id: &UserId, exercise_id: &ExerciseId) -> Self {
    Self {
      user_id:     user_id.clone(),
      exercise_id: exercise_id.clone(),
    }
  }
}

/// A saved reference joined with its catalog detail for one hydration cycle.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedFavorite {
  pub record_id:   RecordId,
  pub exercise_id: ExerciseId,
  /// `None` is a placeholder: the catalog lookup failed for this entry.
  pub exercise:    Option<CatalogExercise>,
}

impl HydratedFavorite {
  pub fn is_placeholder(&self) -> bool { self.exercise.is_none() }
}
