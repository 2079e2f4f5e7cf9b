//! Saved-exercise endpoints.
//!
//! | Method   | Path                        | Notes |
//! |----------|-----------------------------|-------|
//! | `GET`    | `/api/saved/user/{userId}`  | Insertion order |
//! | `POST`   | `/api/saved`                | Body `{userId, exerciseId}`; 409 if already saved |
//! | `DELETE` | `/api/saved`                | Body `{userId, exerciseId}`; 404 if not saved |

use fitit_core::{
  Error, ExerciseId, Result, UserId,
  saved::{SavedKey, SavedReference},
  store::FavoritesStore,
};

use crate::BackendClient;

impl FavoritesStore for BackendClient {
  async fn list_by_user(&self, user: &UserId) -> Result<Vec<SavedReference>> {
    let url = self.url(&["saved", "user", user.as_str()]);
    self.send_json(self.http().get(url)).await
  }

  async fn create(
    &self,
    user: &UserId,
    exercise: &ExerciseId,
  ) -> Result<SavedReference> {
    let url = self.url(&["saved"]);
    let body = SavedKey::new(user, exercise);
    match self.send_json(self.http().post(url).json(&body)).await {
      Err(Error::Conflict(_)) => Err(Error::Conflict(format!(
        "exercise {exercise} is already saved"
      ))),
      other => other,
    }
  }

  async fn remove(&self, user: &UserId, exercise: &ExerciseId) -> Result<()> {
    let url = self.url(&["saved"]);
    let body = SavedKey::new(user, exercise);
    match self.send(self.http().delete(url).json(&body)).await {
      Ok(_) => Ok(()),
      Err(Error::NotFound(_)) => Err(Error::NotFound(format!(
        "exercise {exercise} is not saved"
      ))),
      Err(e) => Err(e),
    }
  }
}
