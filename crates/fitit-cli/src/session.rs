//! Signing in for the duration of one command.
//!
//! The CLI keeps no session between invocations: commands that need one sign
//! in with the configured credentials, run, and sign out again.

use anyhow::{Context as _, Result, bail};
use fitit_client::BackendClient;
use fitit_core::{
  UserId,
  user::{Credentials, User},
};

use crate::settings::SessionConfig;

/// A signed-in user and the client carrying their session cookie.
pub struct Session<'a> {
  pub backend: &'a BackendClient,
  pub user:    User,
}

impl<'a> Session<'a> {
  /// Sign in with `config`, failing with a hint when no credentials are set.
  pub async fn open(backend: &'a BackendClient, config: &SessionConfig) -> Result<Self> {
    let (Some(email), Some(password)) = (&config.email, &config.password) else {
      bail!("this command needs a session: pass --email and --password (or set FITIT_EMAIL / FITIT_PASSWORD)");
    };

    let user = backend
      .signin(&Credentials {
        email:    email.clone(),
        password: password.clone(),
      })
      .await
      .context("sign-in failed")?;
    Ok(Self { backend, user })
  }

  /// Like [`Self::open`], but `None` when no credentials are configured.
  pub async fn try_open(
    backend: &'a BackendClient,
    config: &SessionConfig,
  ) -> Result<Option<Self>> {
    if config.email.is_none() || config.password.is_none() {
      return Ok(None);
    }
    Self::open(backend, config).await.map(Some)
  }

  pub fn user_id(&self) -> &UserId { self.user.identity() }

  /// Sign out; failures are logged, not returned.
  pub async fn close(self) {
    if let Err(e) = self.backend.signout().await {
      tracing::warn!(error = %e, "sign-out failed");
    }
  }
}
