//! User accounts as served by the authentication/profile backend.
//!
//! The core only ever needs [`User::identity`]; the remaining fields exist so
//! the profile and admin commands can show and edit them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Account role. Unknown roles from the backend are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Admin,
  #[serde(untagged)]
  Other(String),
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::User => f.write_str("user"),
      Self::Admin => f.write_str("admin"),
      Self::Other(role) => f.write_str(role),
    }
  }
}

impl From<&str> for Role {
  fn from(value: &str) -> Self {
    match value {
      "user" => Self::User,
      "admin" => Self::Admin,
      other => Self::Other(other.to_owned()),
    }
  }
}

/// A backend user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  #[serde(rename = "_id")]
  pub id:       UserId,
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub role:     Role,
  #[serde(flatten)]
  pub profile:  ProfileFields,
}

impl User {
  /// The identity threaded into favorites and hydration calls.
  pub fn identity(&self) -> &UserId { &self.id }

  pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

/// Free-form profile attributes. The backend stores them as entered, so
/// numbers may come back as strings; they are kept as JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age:    Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub height: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub weight: Option<serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gender: Option<String>,
}

/// Body of `POST /users/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

/// Body of sign-up and of the admin create call.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
  pub username: String,
  pub email:    String,
  pub password: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role:     Option<Role>,
}

/// Partial profile edit; only fields that are set are sent.
pub type ProfileUpdate = ProfileFields;

/// Partial admin edit of another account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role:     Option<Role>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
}

impl UserUpdate {
  pub fn is_empty(&self) -> bool {
    self.username.is_none()
      && self.email.is_none()
      && self.role.is_none()
      && self.password.is_none()
  }
}
