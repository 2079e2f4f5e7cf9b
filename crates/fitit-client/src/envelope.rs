//! Response envelopes the catalog is known to use.
//!
//! The catalog's schema is not guaranteed, so results are located by probing
//! a fixed, ordered list of shapes. The order is part of the contract:
//!
//! Lists ([`LIST_SHAPES`]):
//! 1. a bare JSON array;
//! 2. an object with a `data` array;
//! 3. an object with a `results` array;
//! 4. an object with an `exercises` array;
//! 5. otherwise, an empty list.
//!
//! Single items ([`ITEM_SHAPES`]):
//! 1. the `exercise` field, if present and not null;
//! 2. the `data` field, if present and not null;
//! 3. the payload itself.

use std::mem;

use fitit_core::exercise::CatalogExercise;
use serde_json::Value;

// ─── Lists ───────────────────────────────────────────────────────────────────

/// Where a list of exercises may sit in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
  Bare,
  Data,
  Results,
  Exercises,
}

/// Probe order for list responses.
pub const LIST_SHAPES: [ListShape; 4] = [
  ListShape::Bare,
  ListShape::Data,
  ListShape::Results,
  ListShape::Exercises,
];

impl ListShape {
  fn take(self, payload: &mut Value) -> Option<Vec<Value>> {
    let slot = match self {
      Self::Bare => Some(payload),
      Self::Data => payload.get_mut("data"),
      Self::Results => payload.get_mut("results"),
      Self::Exercises => payload.get_mut("exercises"),
    }?;
    slot.as_array_mut().map(mem::take)
  }
}

/// Pull the raw list out of `payload`, returning the shape that matched.
pub fn unwrap_list(mut payload: Value) -> (Option<ListShape>, Vec<Value>) {
  for shape in LIST_SHAPES {
    if let Some(items) = shape.take(&mut payload) {
      return (Some(shape), items);
    }
  }
  (None, Vec::new())
}

/// Decode a list response into exercises, keeping catalog order. Entries
/// that are not exercise objects are skipped.
pub fn decode_list(payload: Value) -> Vec<CatalogExercise> {
  let (shape, items) = unwrap_list(payload);
  if shape.is_none() {
    tracing::debug!("catalog list response matched no known envelope");
  }

  items
    .into_iter()
    .filter_map(|item| match serde_json::from_value(item) {
      Ok(exercise) => Some(exercise),
      Err(e) => {
        tracing::debug!(error = %e, "skipping undecodable catalog entry");
        None
      }
    })
    .collect()
}

// ─── Single items ────────────────────────────────────────────────────────────

/// Where a single exercise may sit in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShape {
  Exercise,
  Data,
  Raw,
}

/// Probe order for single-item responses.
pub const ITEM_SHAPES: [ItemShape; 3] =
  [ItemShape::Exercise, ItemShape::Data, ItemShape::Raw];

impl ItemShape {
  fn take(self, payload: &mut Value) -> Option<Value> {
    let slot = match self {
      Self::Exercise => payload.get_mut("exercise")?,
      Self::Data => payload.get_mut("data")?,
      Self::Raw => payload,
    };
    (!slot.is_null()).then(|| slot.take())
  }
}

/// Pull the single item out of `payload`. `None` when even the raw payload
/// is `null`.
pub fn unwrap_single(mut payload: Value) -> Option<(ItemShape, Value)> {
  ITEM_SHAPES
    .into_iter()
    .find_map(|shape| shape.take(&mut payload).map(|item| (shape, item)))
}
