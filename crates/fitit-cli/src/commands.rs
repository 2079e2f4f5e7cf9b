//! Command handlers: call the clients, then print text or JSON.

use anyhow::{Context as _, Result, bail};
use fitit_client::{BackendClient, CatalogClient};
use fitit_core::{
  Error, ExerciseId, UserId,
  browse::{DEFAULT_PER_SECTION, HOME_SECTIONS, LoadedSection, load_sections},
  exercise::CatalogExercise,
  hydrate::Hydrator,
  saved::HydratedFavorite,
  store::{ExerciseCatalog as _, FavoritesStore as _, is_saved},
  user::{NewUser, ProfileUpdate, Role, UserUpdate},
};
use serde::Serialize;

use crate::{
  AdminCommand, Command, ProfileArgs, SavedCommand, UsersCommand, render,
  session::Session, settings::Settings,
};

/// Saved exercises previewed on the home page.
const HOME_SAVED_PREVIEW: usize = 9;

/// Everything a command needs.
pub struct App {
  backend:  BackendClient,
  catalog:  CatalogClient,
  settings: Settings,
  json:     bool,
}

impl App {
  pub fn new(settings: Settings, json: bool) -> Result<Self> {
    let backend =
      BackendClient::new(&settings.backend).context("configuring backend client")?;
    let catalog =
      CatalogClient::new(&settings.catalog).context("configuring catalog client")?;
    Ok(Self {
      backend,
      catalog,
      settings,
      json,
    })
  }

  fn hydrator(&self) -> Hydrator<&BackendClient, &CatalogClient> {
    Hydrator::new(&self.backend, &self.catalog)
      .with_max_in_flight(self.settings.hydrate.max_in_flight)
  }

  async fn session(&self) -> Result<Session<'_>> {
    Session::open(&self.backend, &self.settings.session).await
  }

  /// Print `value` as JSON, or `text()` otherwise.
  fn emit<T: Serialize + ?Sized>(
    &self,
    value: &T,
    text: impl FnOnce() -> String,
  ) -> Result<()> {
    if self.json {
      println!("{}", render::json(value)?);
    } else {
      println!("{}", text());
    }
    Ok(())
  }

  fn say(&self, message: &str) -> Result<()> {
    self.emit(&serde_json::json!({ "message": message }), || message.to_owned())
  }
}

pub async fn run(app: &App, command: Command) -> Result<()> {
  match command {
    Command::Signup {
      username,
      email,
      password,
    } => signup(app, username, email, password).await,
    Command::Profile(args) => {
      let session = app.session().await?;
      let result = profile(app, &session, args).await;
      session.close().await;
      result
    }
    Command::Saved { action } => {
      let session = app.session().await?;
      let result = saved(app, &session, action).await;
      session.close().await;
      result
    }
    Command::Search { query, limit } => search(app, &query.join(" "), limit).await,
    Command::Muscle { muscle, limit } => muscle_group(app, &muscle, limit).await,
    Command::Details { exercise_id } => details(app, exercise_id.into()).await,
    Command::Home => home(app).await,
    Command::Admin {
      action: AdminCommand::Users { action },
    } => {
      let session = app.session().await?;
      let result = users(app, &session, action).await;
      session.close().await;
      result
    }
  }
}

// ─── Account ──────────────────────────────────────────────────────────────────

async fn signup(
  app: &App,
  username: String,
  email: String,
  password: String,
) -> Result<()> {
  let user = app
    .backend
    .signup(&NewUser {
      username,
      email,
      password,
      role: None,
    })
    .await
    .context("sign-up failed")?;
  app.emit(&user, || format!("Welcome, {}!", user.username))
}

async fn profile(app: &App, session: &Session<'_>, args: ProfileArgs) -> Result<()> {
  let ProfileArgs {
    name,
    age,
    height,
    weight,
    gender,
  } = args;

  let update = ProfileUpdate {
    name,
    age: age.map(Into::into),
    height: height.map(Into::into),
    weight: weight.map(Into::into),
    gender,
  };

  let user = if update == ProfileUpdate::default() {
    session.user.clone()
  } else {
    app
      .backend
      .update_profile(&update)
      .await
      .context("failed to update profile")?
  };
  app.emit(&user, || render::profile(&user))
}

// ─── Saved exercises ──────────────────────────────────────────────────────────

async fn saved(app: &App, session: &Session<'_>, action: SavedCommand) -> Result<()> {
  let user = session.user_id();
  match action {
    SavedCommand::List => {
      let hydrated = app
        .hydrator()
        .hydrate(user)
        .await
        .context("failed to load saved exercises")?;
      app.emit(&hydrated, || render::favorites(&hydrated))
    }
    SavedCommand::Add { exercise_id } => {
      let exercise = ExerciseId::from(exercise_id);
      match app.backend.create(user, &exercise).await {
        Ok(_) => app.say(&format!("Saved {exercise}.")),
        Err(Error::Conflict(_)) => app.say(&format!("{exercise} is already saved.")),
        Err(e) => Err(e).context("failed to save exercise"),
      }
    }
    SavedCommand::Remove { exercise_id } => {
      let exercise = ExerciseId::from(exercise_id);
      match app.backend.remove(user, &exercise).await {
        Ok(()) => app.say(&format!("Removed {exercise} from saved.")),
        Err(Error::NotFound(_)) => app.say(&format!("{exercise} was not saved.")),
        Err(e) => Err(e).context("failed to remove exercise"),
      }
    }
  }
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

async fn search(app: &App, query: &str, limit: usize) -> Result<()> {
  let results = app
    .catalog
    .search_by_text(query, limit)
    .await
    .context("search failed")?;
  app.emit(&results, || render::exercise_list(&results))
}

async fn muscle_group(app: &App, muscle: &str, limit: usize) -> Result<()> {
  let results = app
    .catalog
    .list_by_muscle_group(muscle, limit)
    .await
    .with_context(|| format!("failed to list exercises for {muscle}"))?;
  app.emit(&results, || render::exercise_list(&results))
}

#[derive(Serialize)]
struct DetailsOutput<'a> {
  exercise: &'a CatalogExercise,
  #[serde(skip_serializing_if = "Option::is_none")]
  saved:    Option<bool>,
}

async fn details(app: &App, id: ExerciseId) -> Result<()> {
  let exercise = app
    .catalog
    .get_by_id(&id)
    .await
    .with_context(|| format!("failed to load exercise {id}"))?;

  let saved = match Session::try_open(&app.backend, &app.settings.session).await? {
    Some(session) => {
      let saved = is_saved(&app.backend, session.user_id(), &id).await;
      session.close().await;
      Some(saved.context("failed to check saved state")?)
    }
    None => None,
  };

  app.emit(&DetailsOutput { exercise: &exercise, saved }, || {
    render::exercise_detail(&exercise, saved)
  })
}

#[derive(Serialize)]
struct HomePage {
  #[serde(skip_serializing_if = "Option::is_none")]
  saved:       Option<Vec<HydratedFavorite>>,
  /// Why the saved preview is missing although credentials are configured.
  #[serde(skip_serializing_if = "Option::is_none")]
  saved_error: Option<String>,
  sections:    Vec<LoadedSection>,
}

/// The first saved exercises, or `None` without credentials.
async fn saved_preview(app: &App) -> Result<Option<Vec<HydratedFavorite>>> {
  let Some(session) = Session::try_open(&app.backend, &app.settings.session).await?
  else {
    return Ok(None);
  };

  let hydrated = app.hydrator().hydrate(session.user_id()).await;
  session.close().await;
  let mut hydrated = hydrated.context("failed to load saved exercises")?;
  hydrated.truncate(HOME_SAVED_PREVIEW);
  Ok(Some(hydrated))
}

/// The saved preview degrades on its own; the shelves are always loaded.
async fn home_page(app: &App) -> HomePage {
  let (saved, saved_error) = match saved_preview(app).await {
    Ok(saved) => (saved, None),
    Err(e) => {
      let message = format!("{e:#}");
      tracing::warn!(error = %message, "home page without saved exercises");
      (None, Some(message))
    }
  };

  HomePage {
    saved,
    saved_error,
    sections: load_sections(&app.catalog, HOME_SECTIONS, DEFAULT_PER_SECTION).await,
  }
}

async fn home(app: &App) -> Result<()> {
  let page = home_page(app).await;
  app.emit(&page, || {
    render::home(page.saved.as_deref(), page.saved_error.as_deref(), &page.sections)
  })
}

// ─── Admin ────────────────────────────────────────────────────────────────────

async fn users(app: &App, session: &Session<'_>, action: UsersCommand) -> Result<()> {
  if !session.user.is_admin() {
    bail!("{} is not an admin", session.user.username);
  }

  match action {
    UsersCommand::List => {
      let users = app.backend.list_users().await.context("failed to list users")?;
      app.emit(&users, || {
        users.iter().map(render::user_line).collect::<Vec<_>>().join("\n")
      })
    }
    UsersCommand::Create {
      username,
      email,
      password,
      role,
    } => {
      let user = app
        .backend
        .create_user(&NewUser {
          username,
          email,
          password,
          role: Some(Role::from(role.as_str())),
        })
        .await
        .context("failed to create user")?;
      app.emit(&user, || render::user_line(&user))
    }
    UsersCommand::Update {
      id,
      username,
      email,
      role,
      password,
    } => {
      let update = UserUpdate {
        username,
        email,
        role: role.as_deref().map(Role::from),
        password,
      };
      if update.is_empty() {
        bail!("nothing to update: pass at least one of --username, --email, --role, --password");
      }
      let id = UserId::from(id);
      app
        .backend
        .update_user(&id, &update)
        .await
        .with_context(|| format!("failed to update user {id}"))?;
      app.say(&format!("Updated {id}."))
    }
    UsersCommand::Delete { id } => {
      let id = UserId::from(id);
      app
        .backend
        .delete_user(&id)
        .await
        .with_context(|| format!("failed to delete user {id}"))?;
      app.say(&format!("Deleted {id}."))
    }
  }
}

#[cfg(test)]
mod tests {
  use fitit_client::{BackendConfig, CatalogConfig};
  use mockito::{Matcher, Server, ServerGuard};

  use super::*;
  use crate::settings::SessionConfig;

  fn app(backend: &ServerGuard, catalog: &ServerGuard, signed_in: bool) -> App {
    let session = if signed_in {
      SessionConfig {
        email:    Some("ana@example.com".into()),
        password: Some("pw".into()),
      }
    } else {
      SessionConfig::default()
    };

    App::new(
      Settings {
        backend: BackendConfig {
          url: backend.url(),
          ..Default::default()
        },
        catalog: CatalogConfig {
          url: catalog.url(),
          ..Default::default()
        },
        session,
        ..Default::default()
      },
      false,
    )
    .unwrap()
  }

  async fn empty_shelves(catalog: &mut ServerGuard) -> mockito::Mock {
    catalog
      .mock("GET", Matcher::Regex(r"^/muscles/[^/]+/exercises$".into()))
      .match_query(Matcher::Any)
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body("[]")
      .expect(HOME_SECTIONS.len())
      .create_async()
      .await
  }

  fn assert_all_shelves(page: &HomePage) {
    let titles: Vec<_> = page.sections.iter().map(|s| s.title.as_str()).collect();
    let expected: Vec<_> = HOME_SECTIONS.iter().map(|s| s.title).collect();
    assert_eq!(titles, expected);
    assert!(page.sections.iter().all(|s| s.error.is_none()));
  }

  #[tokio::test]
  async fn home_shows_shelves_when_sign_in_fails() {
    let mut backend = Server::new_async().await;
    let mut catalog = Server::new_async().await;
    backend
      .mock("POST", "/api/users/signin")
      .with_status(503)
      .create_async()
      .await;
    let shelves = empty_shelves(&mut catalog).await;

    let page = home_page(&app(&backend, &catalog, true)).await;

    assert!(page.saved.is_none());
    assert!(page.saved_error.as_deref().unwrap().contains("sign-in failed"));
    assert_all_shelves(&page);
    shelves.assert_async().await;
  }

  #[tokio::test]
  async fn home_shows_shelves_when_saved_list_is_down() {
    let mut backend = Server::new_async().await;
    let mut catalog = Server::new_async().await;
    backend
      .mock("POST", "/api/users/signin")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"_id":"u1","username":"ana","email":"ana@example.com"}"#)
      .create_async()
      .await;
    backend
      .mock("GET", "/api/saved/user/u1")
      .with_status(502)
      .create_async()
      .await;
    let signout = backend
      .mock("POST", "/api/users/signout")
      .with_status(200)
      .expect(1)
      .create_async()
      .await;
    let shelves = empty_shelves(&mut catalog).await;

    let page = home_page(&app(&backend, &catalog, true)).await;

    assert!(page.saved.is_none());
    assert!(
      page
        .saved_error
        .as_deref()
        .unwrap()
        .contains("failed to load saved exercises")
    );
    assert_all_shelves(&page);
    signout.assert_async().await;
    shelves.assert_async().await;
  }

  #[tokio::test]
  async fn home_without_credentials_skips_the_backend() {
    let mut backend = Server::new_async().await;
    let mut catalog = Server::new_async().await;
    let untouched = backend
      .mock("GET", Matcher::Any)
      .expect(0)
      .create_async()
      .await;
    let shelves = empty_shelves(&mut catalog).await;

    let page = home_page(&app(&backend, &catalog, false)).await;

    assert!(page.saved.is_none());
    assert!(page.saved_error.is_none());
    assert_all_shelves(&page);
    untouched.assert_async().await;
    shelves.assert_async().await;
  }
}
