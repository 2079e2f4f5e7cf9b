//! Home-page browse sections: fixed muscle-group shelves filled from the
//! catalog.

use futures_util::future;
use serde::Serialize;

use crate::{exercise::CatalogExercise, store::ExerciseCatalog};

/// Entries shown per section by default.
pub const DEFAULT_PER_SECTION: usize = 6;

/// A titled shelf backed by one muscle-group query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
  pub title:  &'static str,
  /// Muscle name sent to the catalog's muscle-group listing.
  pub muscle: &'static str,
}

/// The home page, top to bottom.
pub const HOME_SECTIONS: &[Section] = &[
  Section { title: "Chest", muscle: "pectorals" },
  Section { title: "Back", muscle: "lats" },
  Section { title: "Shoulders", muscle: "delts" },
  Section { title: "Quads", muscle: "quads" },
  Section { title: "Core", muscle: "abs" },
  Section { title: "Cardio", muscle: "cardiovascular system" },
  Section { title: "Shins", muscle: "shins" },
];

/// A section together with the exercises loaded for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedSection {
  pub title:     String,
  pub exercises: Vec<CatalogExercise>,
  /// Set when the catalog call failed and `exercises` is empty because of it.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:     Option<String>,
}

/// Fill every section concurrently, keeping the order of `sections`.
///
/// A failing section comes back empty with its error recorded; the others
/// are unaffected.
pub async fn load_sections<C: ExerciseCatalog>(
  catalog: &C,
  sections: &[Section],
  per_section: usize,
) -> Vec<LoadedSection> {
  future::join_all(sections.iter().map(|section| async move {
    match catalog.list_by_muscle_group(section.muscle, per_section).await {
      Ok(exercises) => LoadedSection {
        title: section.title.to_owned(),
        exercises,
        error: None,
      },
      Err(e) => {
        tracing::warn!(
          section = section.title,
          muscle = section.muscle,
          error = %e,
          "failed to load section"
        );
        LoadedSection {
          title:     section.title.to_owned(),
          exercises: Vec::new(),
          error:     Some(e.to_string()),
        }
      }
    }
  }))
  .await
}
