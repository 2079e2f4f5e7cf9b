//! An in-process [`FavoritesStore`]: [`MemoryFavorites`].
//!
//! Used by tests and for running against a catalog without a backend. The
//! uniqueness check and the insert happen under one lock acquisition, so
//! racing duplicate saves produce exactly one record.

use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::{
  Error, ExerciseId, RecordId, Result, UserId, saved::SavedReference,
  store::FavoritesStore,
};

/// Saved references held in insertion order.
#[derive(Debug, Default)]
pub struct MemoryFavorites {
  records: Mutex<Vec<SavedReference>>,
}

impl MemoryFavorites {
  pub fn new() -> Self { Self::default() }

  /// Number of references across all users.
  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.lock().is_empty() }

  fn lock(&self) -> MutexGuard<'_, Vec<SavedReference>> {
    self.records.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl FavoritesStore for MemoryFavorites {
  async fn list_by_user(&self, user: &UserId) -> Result<Vec<SavedReference>> {
    Ok(
      self
        .lock()
        .iter()
        .filter(|r| &r.user_id == user)
        .cloned()
        .collect(),
    )
  }

  async fn create(
    &self,
    user: &UserId,
    exercise: &ExerciseId,
  ) -> Result<SavedReference> {
    let mut records = self.lock();
    if records
      .iter()
      .any(|r| &r.user_id == user && &r.exercise_id == exercise)
    {
      return Err(Error::Conflict(format!(
        "exercise {exercise} is already saved"
      )));
    }

    let record = SavedReference {
      record_id:   RecordId::new(Uuid::new_v4().simple().to_string()),
      user_id:     user.clone(),
      exercise_id: exercise.clone(),
    };
    records.push(record.clone());
    Ok(record)
  }

  async fn remove(&self, user: &UserId, exercise: &ExerciseId) -> Result<()> {
    let mut records = self.lock();
    let position = records
      .iter()
      .position(|r| &r.user_id == user && &r.exercise_id == exercise)
      .ok_or_else(|| {
        Error::NotFound(format!("exercise {exercise} is not saved"))
      })?;
    records.remove(position);
    Ok(())
  }
}
