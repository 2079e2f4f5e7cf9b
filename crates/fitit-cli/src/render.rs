//! Text rendering for command output.

use fitit_core::{
  browse::LoadedSection, exercise::CatalogExercise, saved::HydratedFavorite,
  user::User,
};
use serde::Serialize;

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
  Ok(serde_json::to_string_pretty(value)?)
}

fn join(items: &[String]) -> String {
  if items.is_empty() { "-".to_owned() } else { items.join(", ") }
}

fn id_of(exercise: &CatalogExercise) -> &str {
  exercise.exercise_id.as_ref().map_or("?", |id| id.as_str())
}

/// `id  name  (targets)`
pub fn exercise_line(exercise: &CatalogExercise) -> String {
  format!(
    "{:<10}  {}  ({})",
    id_of(exercise),
    exercise.name,
    join(&exercise.target_muscles)
  )
}

pub fn exercise_list(exercises: &[CatalogExercise]) -> String {
  if exercises.is_empty() {
    return "No exercises found.".to_owned();
  }
  exercises
    .iter()
    .map(exercise_line)
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn exercise_detail(exercise: &CatalogExercise, saved: Option<bool>) -> String {
  let mut lines = vec![
    format!("{} [{}]", exercise.name, id_of(exercise)),
    format!("  Target muscles:    {}", join(&exercise.target_muscles)),
    format!("  Secondary muscles: {}", join(&exercise.secondary_muscles)),
    format!("  Body parts:        {}", join(&exercise.body_parts)),
    format!("  Equipment:         {}", join(&exercise.equipments)),
  ];
  if let Some(url) = &exercise.gif_url {
    lines.push(format!("  Demo:              {url}"));
  }
  if let Some(saved) = saved {
    lines.push(format!("  Saved:             {}", if saved { "yes" } else { "no" }));
  }
  if !exercise.instructions.is_empty() {
    lines.push(String::new());
    lines.push("How to perform:".to_owned());
    lines.extend(
      exercise
        .instructions
        .iter()
        .enumerate()
        .map(|(n, step)| format!("  {}. {step}", n + 1)),
    );
  }
  lines.join("\n")
}

/// Placeholders stay visible, marked unavailable.
pub fn favorite_line(favorite: &HydratedFavorite) -> String {
  match &favorite.exercise {
    Some(exercise) => exercise_line(exercise),
    None => format!(
      "{:<10}  (details unavailable)",
      favorite.exercise_id.as_str()
    ),
  }
}

pub fn favorites(favorites: &[HydratedFavorite]) -> String {
  if favorites.is_empty() {
    return "You haven't saved any exercises yet.".to_owned();
  }
  favorites
    .iter()
    .map(favorite_line)
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn sections(sections: &[LoadedSection]) -> String {
  let mut lines = Vec::new();
  for section in sections {
    lines.push(format!("== {}", section.title));
    match &section.error {
      Some(error) => lines.push(format!("  (could not load: {error})")),
      None if section.exercises.is_empty() => {
        lines.push("  (nothing here yet)".to_owned());
      }
      None => lines.extend(
        section
          .exercises
          .iter()
          .map(|exercise| format!("  {}", exercise_line(exercise))),
      ),
    }
  }
  lines.join("\n")
}

/// The saved preview (when signed in, or when loading it failed) above the
/// shelves.
pub fn home(
  saved: Option<&[HydratedFavorite]>,
  saved_error: Option<&str>,
  shelves: &[LoadedSection],
) -> String {
  let preview = match (saved, saved_error) {
    (_, Some(error)) => Some(format!("  (could not load: {error})")),
    (Some(saved), None) => Some(favorites(saved)),
    (None, None) => None,
  };

  match preview {
    Some(preview) => format!(
      "== Your saved exercises\n{preview}\n\n{}",
      sections(shelves)
    ),
    None => sections(shelves),
  }
}

pub fn user_line(user: &User) -> String {
  format!(
    "{:<26}  {:<16}  {:<28}  {}",
    user.id.as_str(),
    user.username,
    user.email,
    user.role
  )
}

pub fn profile(user: &User) -> String {
  fn value(v: &Option<serde_json::Value>) -> String {
    match v {
      Some(serde_json::Value::String(s)) => s.clone(),
      Some(other) => other.to_string(),
      None => "-".to_owned(),
    }
  }

  let p = &user.profile;
  [
    format!("{} <{}> ({})", user.username, user.email, user.role),
    format!("  Name:   {}", p.name.as_deref().unwrap_or("-")),
    format!("  Age:    {}", value(&p.age)),
    format!("  Height: {} cm", value(&p.height)),
    format!("  Weight: {} kg", value(&p.weight)),
    format!("  Gender: {}", p.gender.as_deref().unwrap_or("-")),
  ]
  .join("\n")
}
