//! String identifiers used across the workspace.
//!
//! All three are opaque: the core never parses, validates or mints them,
//! except [`RecordId`] inside [`crate::memory::MemoryFavorites`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

      pub fn as_str(&self) -> &str { &self.0 }

      pub fn into_inner(self) -> String { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<String> for $name {
      fn from(value: String) -> Self { Self(value) }
    }

    impl From<&str> for $name {
      fn from(value: &str) -> Self { Self(value.to_owned()) }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str { &self.0 }
    }
  };
}

string_id! {
  /// Identity of the signed-in user, supplied by the authentication backend.
  UserId
}

string_id! {
  /// Identifier into the external exercise catalog.
  ExerciseId
}

string_id! {
  /// Identifier the favorites store assigns to a saved reference.
  RecordId
}

impl ExerciseId {
  /// Deserialize an id that the catalog may send as a string or a number.
  pub fn deserialize_lenient<'de, D>(
    deserializer: D,
  ) -> std::result::Result<Option<Self>, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Text(String),
      Integer(i64),
      Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
      Raw::Text(s) => Self(s),
      Raw::Integer(n) => Self(n.to_string()),
      Raw::Float(n) => Self(n.to_string()),
    }))
  }
}
