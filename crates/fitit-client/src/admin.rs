//! Admin user management under `/api/admin/users`. The backend rejects these
//! for non-admin sessions.

use fitit_core::{
  Result, UserId,
  user::{NewUser, User, UserUpdate},
};

use crate::BackendClient;

impl BackendClient {
  /// `GET /api/admin/users`
  pub async fn list_users(&self) -> Result<Vec<User>> {
    let url = self.url(&["admin", "users"]);
    self.send_json(self.http().get(url)).await
  }

  /// `POST /api/admin/users`
  pub async fn create_user(&self, new_user: &NewUser) -> Result<User> {
    let url = self.url(&["admin", "users"]);
    self.send_json(self.http().post(url).json(new_user)).await
  }

  /// `PUT /api/admin/users/{id}` — only the fields set in `update` are sent.
  pub async fn update_user(&self, id: &UserId, update: &UserUpdate) -> Result<()> {
    let url = self.url(&["admin", "users", id.as_str()]);
    self.send(self.http().put(url).json(update)).await?;
    Ok(())
  }

  /// `DELETE /api/admin/users/{id}`
  pub async fn delete_user(&self, id: &UserId) -> Result<()> {
    let url = self.url(&["admin", "users", id.as_str()]);
    self.send(self.http().delete(url)).await?;
    tracing::info!(user = %id, "deleted user");
    Ok(())
  }
}
