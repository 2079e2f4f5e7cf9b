//! Authentication and profile endpoints under `/api/users`.

use fitit_core::{
  Result,
  user::{Credentials, NewUser, ProfileUpdate, User},
};

use crate::BackendClient;

impl BackendClient {
  /// `POST /api/users/signin` — stores the session cookie on success.
  pub async fn signin(&self, credentials: &Credentials) -> Result<User> {
    let url = self.url(&["users", "signin"]);
    let user: User = self.send_json(self.http().post(url).json(credentials)).await?;
    tracing::info!(user = %user.id, username = %user.username, "signed in");
    Ok(user)
  }

  /// `POST /api/users/signup` — the backend signs the new user in.
  pub async fn signup(&self, new_user: &NewUser) -> Result<User> {
    let url = self.url(&["users", "signup"]);
    let user: User = self.send_json(self.http().post(url).json(new_user)).await?;
    tracing::info!(user = %user.id, username = %user.username, "signed up");
    Ok(user)
  }

  /// `POST /api/users/signout`
  pub async fn signout(&self) -> Result<()> {
    let url = self.url(&["users", "signout"]);
    self.send(self.http().post(url)).await?;
    tracing::info!("signed out");
    Ok(())
  }

  /// `GET /api/users/profile` — the signed-in user; `Unauthorized` without a
  /// session.
  pub async fn profile(&self) -> Result<User> {
    let url = self.url(&["users", "profile"]);
    self.send_json(self.http().get(url)).await
  }

  /// `PUT /api/users/profile` — returns the updated user.
  pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
    let url = self.url(&["users", "profile"]);
    self.send_json(self.http().put(url).json(update)).await
  }
}
