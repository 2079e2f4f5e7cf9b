//! Exercise detail as served by the external catalog.
//!
//! The catalog is third-party and its schema has drifted between versions
//! (`target` vs `targetMuscles`, `id` vs `exerciseId`, numeric ids). Decoding
//! goes through [`RawExercise`], which accepts every spelling we have seen and
//! folds it into one stable [`CatalogExercise`].

use serde::{Deserialize, Serialize};

use crate::ExerciseId;

// ─── CatalogExercise ─────────────────────────────────────────────────────────

/// Read-only exercise detail. Owned and versioned by the catalog; never
/// mutated or persisted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawExercise")]
pub struct CatalogExercise {
  pub exercise_id:       Option<ExerciseId>,
  pub name:              String,
  pub target_muscles:    Vec<String>,
  pub secondary_muscles: Vec<String>,
  pub body_parts:        Vec<String>,
  pub equipments:        Vec<String>,
  /// Animated demonstration, when the catalog has one.
  pub gif_url:           Option<String>,
  /// Ordered how-to steps.
  pub instructions:      Vec<String>,
}

// ─── Lenient decoding ────────────────────────────────────────────────────────

/// A list field that some catalog versions send as a bare string.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
  Many(Vec<String>),
  One(String),
  #[default]
  Missing,
}

impl OneOrMany {
  fn into_vec(self) -> Vec<String> {
    match self {
      Self::Many(items) => items,
      Self::One(item) => vec![item],
      Self::Missing => Vec::new(),
    }
  }

  /// Prefer `self`; fall back to `legacy` when `self` carried nothing.
  fn or_legacy(self, legacy: OneOrMany) -> Vec<String> {
    let primary = self.into_vec();
    if primary.is_empty() { legacy.into_vec() } else { primary }
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawExercise {
  #[serde(deserialize_with = "ExerciseId::deserialize_lenient")]
  exercise_id:       Option<ExerciseId>,
  #[serde(deserialize_with = "ExerciseId::deserialize_lenient")]
  id:                Option<ExerciseId>,
  name:              Option<String>,
  target_muscles:    OneOrMany,
  target:            OneOrMany,
  secondary_muscles: OneOrMany,
  body_parts:        OneOrMany,
  body_part:         OneOrMany,
  equipments:        OneOrMany,
  equipment:         OneOrMany,
  gif_url:           Option<String>,
  instructions:      OneOrMany,
}

impl From<RawExercise> for CatalogExercise {
  fn from(raw: RawExercise) -> Self {
    CatalogExercise {
      exercise_id:       raw.exercise_id.or(raw.id),
      name:              raw.name.unwrap_or_default(),
      target_muscles:    raw.target_muscles.or_legacy(raw.target),
      secondary_muscles: raw.secondary_muscles.into_vec(),
      body_parts:        raw.body_parts.or_legacy(raw.body_part),
      equipments:        raw.equipments.or_legacy(raw.equipment),
      gif_url:           raw.gif_url.filter(|url| !url.is_empty()),
      instructions:      raw.instructions.into_vec(),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn decodes_current_schema() {
    let ex: CatalogExercise = serde_json::from_value(json!({
      "exerciseId": "trmte8s",
      "name": "band shrug",
      "gifUrl": "https://static.exercisedb.dev/media/trmte8s.gif",
      "targetMuscles": ["traps"],
      "bodyParts": ["neck"],
      "equipments": ["band"],
      "secondaryMuscles": ["shoulders"],
      "instructions": ["Step:1 Stand.", "Step:2 Shrug."]
    }))
    .unwrap();

    assert_eq!(ex.exercise_id, Some(ExerciseId::from("trmte8s")));
    assert_eq!(ex.name, "band shrug");
    assert_eq!(ex.target_muscles, vec!["traps"]);
    assert_eq!(ex.body_parts, vec!["neck"]);
    assert_eq!(ex.equipments, vec!["band"]);
    assert_eq!(ex.instructions.len(), 2);
  }

  #[test]
  fn decodes_legacy_schema_with_numeric_id() {
    let ex: CatalogExercise = serde_json::from_value(json!({
      "id": 1512,
      "name": "all fours squad stretch",
      "bodyPart": "upper legs",
      "target": "quads",
      "equipment": "body weight",
      "gifUrl": ""
    }))
    .unwrap();

    assert_eq!(ex.exercise_id, Some(ExerciseId::from("1512")));
    assert_eq!(ex.target_muscles, vec!["quads"]);
    assert_eq!(ex.body_parts, vec!["upper legs"]);
    assert_eq!(ex.equipments, vec!["body weight"]);
    assert_eq!(ex.gif_url, None);
    assert!(ex.instructions.is_empty());
  }

  #[test]
  fn null_fields_decode_as_empty() {
    let ex: CatalogExercise = serde_json::from_value(json!({
      "exerciseId": null,
      "name": null,
      "targetMuscles": null
    }))
    .unwrap();

    assert_eq!(ex, CatalogExercise::default());
  }
}
