//! Filter values and the per-view filter state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The value a user picked for one filter. Each variant belongs to one
/// family of [`FilterKind`](crate::FilterKind)s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
  /// Selected option values of a checkbox group.
  Checkbox(Vec<String>),
  /// Inclusive `[min, max]` bounds of a range or year-range slider.
  Range(f64, f64),
  /// Free-text query.
  Search(String),
}

impl FilterValue {
  /// An inactive value imposes no constraint and is not counted.
  pub fn is_active(&self) -> bool {
    match self {
      Self::Checkbox(selected) => !selected.is_empty(),
      Self::Range(..) => true,
      Self::Search(q) => !q.is_empty(),
    }
  }

  /// The value seen as a list, if it is list-shaped. A range is a
  /// two-element `[min, max]` list.
  pub fn as_list(&self) -> Option<Vec<String>> {
    match self {
      Self::Checkbox(selected) => Some(selected.clone()),
      Self::Range(lo, hi) => Some(vec![lo.to_string(), hi.to_string()]),
      Self::Search(_) => None,
    }
  }

  pub fn as_search(&self) -> Option<&str> {
    match self {
      Self::Search(q) => Some(q),
      _ => None,
    }
  }
}

/// Mapping from filter id to the picked value. A missing key means the
/// filter is inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, FilterValue>);

impl FilterState {
  pub fn new() -> Self { Self::default() }

  /// Builder-style [`set`](Self::set).
  pub fn with(mut self, id: &str, value: FilterValue) -> Self {
    self.set(id, value);
    self
  }

  pub fn set(&mut self, id: &str, value: FilterValue) {
    self.0.insert(id.to_owned(), value);
  }

  pub fn get(&self, id: &str) -> Option<&FilterValue> { self.0.get(id) }

  /// The value for `id`, only if it is active.
  pub fn active(&self, id: &str) -> Option<&FilterValue> {
    self.0.get(id).filter(|v| v.is_active())
  }

  pub fn is_active(&self, id: &str) -> bool { self.active(id).is_some() }

  pub fn clear(&mut self, id: &str) -> Option<FilterValue> {
    self.0.remove(id)
  }

  pub fn clear_all(&mut self) { self.0.clear(); }

  /// Number of entries that are active.
  pub fn active_count(&self) -> usize {
    self.0.values().filter(|v| v.is_active()).count()
  }

  /// Entries in key order, inactive ones included.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }
}
