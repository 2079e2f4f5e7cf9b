//! Tests for the hydration coordinator, browse sections, and
//! `MemoryFavorites`, against in-process collaborators.

use std::{
  collections::HashMap,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use crate::{
  Error, ExerciseId, Result, UserId,
  browse::{HOME_SECTIONS, Section, load_sections},
  exercise::CatalogExercise,
  hydrate::Hydrator,
  memory::MemoryFavorites,
  saved::SavedReference,
  store::{ExerciseCatalog, FavoritesStore, is_saved},
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// How the fake catalog answers for one id.
#[derive(Clone)]
enum Answer {
  Found { delay_ms: u64 },
  Missing,
  Down,
}

#[derive(Default)]
struct FakeCatalog {
  answers:      HashMap<String, Answer>,
  muscle_lists: HashMap<String, usize>,
  calls:        AtomicUsize,
}

impl FakeCatalog {
  fn with(mut self, id: &str, answer: Answer) -> Self {
    self.answers.insert(id.to_owned(), answer);
    self
  }

  fn with_muscle(mut self, muscle: &str, entries: usize) -> Self {
    self.muscle_lists.insert(muscle.to_owned(), entries);
    self
  }

  fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

fn exercise(id: &str) -> CatalogExercise {
  CatalogExercise {
    exercise_id: Some(ExerciseId::from(id)),
    name: format!("exercise {id}"),
    ..Default::default()
  }
}

impl ExerciseCatalog for FakeCatalog {
  async fn get_by_id(&self, id: &ExerciseId) -> Result<CatalogExercise> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match self.answers.get(id.as_str()).cloned() {
      Some(Answer::Found { delay_ms }) => {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok(exercise(id.as_str()))
      }
      Some(Answer::Down) => {
        Err(Error::CatalogUnavailable("connection reset".into()))
      }
      Some(Answer::Missing) | None => Err(Error::NotFound(id.to_string())),
    }
  }

  async fn search_by_text(
    &self,
    _query: &str,
    _limit: usize,
  ) -> Result<Vec<CatalogExercise>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(Vec::new())
  }

  async fn list_by_muscle_group(
    &self,
    muscle: &str,
    limit: usize,
  ) -> Result<Vec<CatalogExercise>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let entries = self
      .muscle_lists
      .get(muscle)
      .copied()
      .ok_or_else(|| Error::CatalogUnavailable(format!("{muscle}: 503")))?;
    Ok(
      (0..entries)
        .map(|n| exercise(&format!("{muscle}-{n}")))
        .take(limit)
        .collect(),
    )
  }
}

/// A store whose reference list cannot be read.
struct DownStore;

impl FavoritesStore for DownStore {
  async fn list_by_user(&self, _user: &UserId) -> Result<Vec<SavedReference>> {
    Err(Error::StoreUnavailable("timed out".into()))
  }

  async fn create(
    &self,
    _user: &UserId,
    _exercise: &ExerciseId,
  ) -> Result<SavedReference> {
    Err(Error::StoreUnavailable("timed out".into()))
  }

  async fn remove(&self, _user: &UserId, _exercise: &ExerciseId) -> Result<()> {
    Err(Error::StoreUnavailable("timed out".into()))
  }
}

async fn store_with(user: &UserId, ids: &[&str]) -> MemoryFavorites {
  let store = MemoryFavorites::new();
  for id in ids {
    store.create(user, &ExerciseId::from(*id)).await.unwrap();
  }
  store
}

fn ids(hydrated: &[crate::saved::HydratedFavorite]) -> Vec<&str> {
  hydrated.iter().map(|h| h.exercise_id.as_str()).collect()
}

// ─── Hydration ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn hydrate_empty_list_skips_catalog() {
  let user = UserId::from("u1");
  let catalog = FakeCatalog::default();
  let hydrator = Hydrator::new(MemoryFavorites::new(), &catalog);

  let hydrated = hydrator.hydrate(&user).await.unwrap();
  assert!(hydrated.is_empty());
  assert_eq!(catalog.calls(), 0);
}

#[tokio::test]
async fn hydrate_substitutes_placeholder_for_missing_entry() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["A", "B", "C"]).await;
  let catalog = FakeCatalog::default()
    .with("A", Answer::Found { delay_ms: 0 })
    .with("B", Answer::Missing)
    .with("C", Answer::Found { delay_ms: 0 });

  let hydrated = Hydrator::new(&store, &catalog).hydrate(&user).await.unwrap();

  assert_eq!(ids(&hydrated), vec!["A", "B", "C"]);
  assert_eq!(hydrated[0].exercise, Some(exercise("A")));
  assert!(hydrated[1].is_placeholder());
  assert_eq!(hydrated[1].exercise_id, ExerciseId::from("B"));
  assert_eq!(hydrated[2].exercise, Some(exercise("C")));

  // Record ids come from the store, in the same order.
  let refs = store.list_by_user(&user).await.unwrap();
  let record_ids: Vec<_> = refs.iter().map(|r| r.record_id.clone()).collect();
  let hydrated_ids: Vec<_> =
    hydrated.iter().map(|h| h.record_id.clone()).collect();
  assert_eq!(record_ids, hydrated_ids);
}

#[tokio::test]
async fn hydrate_keeps_every_entry_when_all_lookups_fail() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["A", "B", "C", "D"]).await;
  let catalog = FakeCatalog::default()
    .with("A", Answer::Down)
    .with("B", Answer::Missing)
    .with("C", Answer::Down);

  let hydrated = Hydrator::new(&store, &catalog).hydrate(&user).await.unwrap();

  assert_eq!(ids(&hydrated), vec!["A", "B", "C", "D"]);
  assert!(hydrated.iter().all(|h| h.is_placeholder()));
}

#[tokio::test]
async fn hydrate_order_does_not_follow_completion_order() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["slow", "medium", "fast"]).await;
  let catalog = FakeCatalog::default()
    .with("slow", Answer::Found { delay_ms: 60 })
    .with("medium", Answer::Found { delay_ms: 30 })
    .with("fast", Answer::Found { delay_ms: 0 });

  let hydrated = Hydrator::new(&store, &catalog)
    .with_max_in_flight(3)
    .hydrate(&user)
    .await
    .unwrap();

  assert_eq!(ids(&hydrated), vec!["slow", "medium", "fast"]);
  assert!(hydrated.iter().all(|h| !h.is_placeholder()));
}

#[tokio::test]
async fn hydrate_sequential_matches_concurrent() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["A", "B", "C", "D", "E"]).await;
  let catalog = FakeCatalog::default()
    .with("A", Answer::Found { delay_ms: 5 })
    .with("C", Answer::Found { delay_ms: 1 })
    .with("D", Answer::Down)
    .with("E", Answer::Found { delay_ms: 0 });

  let sequential = Hydrator::new(&store, &catalog)
    .with_max_in_flight(0)
    .hydrate(&user)
    .await
    .unwrap();
  let concurrent = Hydrator::new(&store, &catalog)
    .with_max_in_flight(16)
    .hydrate(&user)
    .await
    .unwrap();

  assert_eq!(sequential, concurrent);
  assert_eq!(sequential.len(), 5);
}

#[tokio::test]
async fn hydrate_fails_when_reference_list_is_unavailable() {
  let catalog = FakeCatalog::default();
  let err = Hydrator::new(DownStore, &catalog)
    .hydrate(&UserId::from("u1"))
    .await
    .unwrap_err();

  assert!(matches!(err, Error::StoreUnavailable(_)));
  assert_eq!(catalog.calls(), 0);
}

/// A store that breaks the uniqueness invariant, to exercise lookup sharing.
struct DuplicatingStore;

impl FavoritesStore for DuplicatingStore {
  async fn list_by_user(&self, user: &UserId) -> Result<Vec<SavedReference>> {
    Ok(
      ["r1", "r2", "r3"]
        .iter()
        .zip(["A", "B", "A"])
        .map(|(record, exercise)| SavedReference {
          record_id:   (*record).into(),
          user_id:     user.clone(),
          exercise_id: exercise.into(),
        })
        .collect(),
    )
  }

  async fn create(
    &self,
    _user: &UserId,
    _exercise: &ExerciseId,
  ) -> Result<SavedReference> {
    unreachable!("not used")
  }

  async fn remove(&self, _user: &UserId, _exercise: &ExerciseId) -> Result<()> {
    unreachable!("not used")
  }
}

#[tokio::test]
async fn hydrate_looks_up_duplicate_ids_once() {
  let catalog = FakeCatalog::default()
    .with("A", Answer::Found { delay_ms: 0 })
    .with("B", Answer::Found { delay_ms: 0 });

  let hydrated = Hydrator::new(DuplicatingStore, &catalog)
    .hydrate(&UserId::from("u1"))
    .await
    .unwrap();

  assert_eq!(ids(&hydrated), vec!["A", "B", "A"]);
  assert_eq!(hydrated[2].record_id.as_str(), "r3");
  assert_eq!(hydrated[0].exercise, hydrated[2].exercise);
  assert_eq!(catalog.calls(), 2);
}

#[tokio::test]
async fn hydrate_reflects_save_and_remove_on_next_cycle() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["A"]).await;
  let catalog = FakeCatalog::default()
    .with("A", Answer::Found { delay_ms: 0 })
    .with("B", Answer::Found { delay_ms: 0 });
  let hydrator = Hydrator::new(&store, &catalog);

  assert_eq!(ids(&hydrator.hydrate(&user).await.unwrap()), vec!["A"]);

  store.create(&user, &"B".into()).await.unwrap();
  store.remove(&user, &"A".into()).await.unwrap();

  assert_eq!(ids(&hydrator.hydrate(&user).await.unwrap()), vec!["B"]);
}

// ─── MemoryFavorites ─────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_create_conflicts_and_keeps_one_record() {
  let store = MemoryFavorites::new();
  let user = UserId::from("u1");
  let ex = ExerciseId::from("A");

  store.create(&user, &ex).await.unwrap();
  let err = store.create(&user, &ex).await.unwrap_err();

  assert!(err.is_conflict());
  assert_eq!(store.list_by_user(&user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn racing_creates_yield_one_record() {
  let store = Arc::new(MemoryFavorites::new());
  let user = UserId::from("u1");

  let handles: Vec<_> = (0..16)
    .map(|_| {
      let store = Arc::clone(&store);
      let user = user.clone();
      tokio::spawn(async move { store.create(&user, &"A".into()).await })
    })
    .collect();

  let mut created = 0;
  let mut conflicts = 0;
  for handle in handles {
    match handle.await.unwrap() {
      Ok(_) => created += 1,
      Err(e) if e.is_conflict() => conflicts += 1,
      Err(e) => panic!("unexpected error: {e}"),
    }
  }

  assert_eq!(created, 1);
  assert_eq!(conflicts, 15);
  assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn same_exercise_for_different_users_is_allowed() {
  let store = MemoryFavorites::new();
  store.create(&"u1".into(), &"A".into()).await.unwrap();
  store.create(&"u2".into(), &"A".into()).await.unwrap();

  assert_eq!(store.len(), 2);
  assert_eq!(store.list_by_user(&"u2".into()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_missing_reference_is_not_found() {
  let store = store_with(&"u1".into(), &["A"]).await;

  let err = store.remove(&"u1".into(), &"B".into()).await.unwrap_err();
  assert!(err.is_not_found());

  // Another user's reference is not theirs to remove.
  let err = store.remove(&"u2".into(), &"A".into()).await.unwrap_err();
  assert!(err.is_not_found());
  assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn list_preserves_insertion_order() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["C", "A", "B"]).await;
  store.create(&"u2".into(), &"Z".into()).await.unwrap();

  let listed: Vec<_> = store
    .list_by_user(&user)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.exercise_id.into_inner())
    .collect();
  assert_eq!(listed, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn is_saved_tracks_store_state() {
  let user = UserId::from("u1");
  let store = store_with(&user, &["A"]).await;

  assert!(is_saved(&store, &user, &"A".into()).await.unwrap());
  assert!(!is_saved(&store, &user, &"B".into()).await.unwrap());
}

// ─── Browse sections ─────────────────────────────────────────────────────────

#[tokio::test]
async fn sections_keep_order_and_degrade_individually() {
  let catalog = FakeCatalog::default()
    .with_muscle("pectorals", 10)
    .with_muscle("lats", 2);
  let sections = [
    Section { title: "Chest", muscle: "pectorals" },
    Section { title: "Back", muscle: "lats" },
    Section { title: "Shins", muscle: "shins" },
  ];

  let loaded = load_sections(&catalog, &sections, 6).await;

  let titles: Vec<_> = loaded.iter().map(|s| s.title.as_str()).collect();
  assert_eq!(titles, vec!["Chest", "Back", "Shins"]);
  assert_eq!(loaded[0].exercises.len(), 6);
  assert_eq!(loaded[1].exercises.len(), 2);
  assert!(loaded[2].exercises.is_empty());
  assert!(loaded[2].error.is_some());
}

#[test]
fn home_sections_are_the_seven_shelves() {
  let muscles: Vec<_> = HOME_SECTIONS.iter().map(|s| s.muscle).collect();
  assert_eq!(
    muscles,
    vec![
      "pectorals",
      "lats",
      "delts",
      "quads",
      "abs",
      "cardiovascular system",
      "shins"
    ]
  );
}
