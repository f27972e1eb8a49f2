//! Filter configurations: named, typed predicate descriptors.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::value::FilterValue;

/// Predicate deciding whether an item is kept under a given filter value.
pub type Predicate<T> = Arc<dyn Fn(&T, &FilterValue) -> bool + Send + Sync>;

/// Renders a filter value for display.
pub type Formatter = Arc<dyn Fn(&FilterValue) -> String + Send + Sync>;

/// The widget a filter is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
  Checkbox,
  Range,
  YearRange,
  Search,
}

/// One choice of a checkbox filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
  pub value: String,
  pub label: String,
}

impl FilterOption {
  pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
    Self { value: value.into(), label: label.into() }
  }
}

/// Describes one filter a list view offers over items of type `T`.
///
/// The predicate is opaque to the engine. It must be pure, return `true` to
/// keep an item, and return `true` for an inactive value. The typed
/// constructors ([`checkbox`](Self::checkbox), [`range`](Self::range),
/// [`year_range`](Self::year_range), [`search`](Self::search)) uphold that
/// contract; [`new`](Self::new) leaves it to the caller.
pub struct FilterConfig<T> {
  pub id:           String,
  pub kind:         FilterKind,
  pub label:        String,
  pub options:      Vec<FilterOption>,
  pub min:          Option<f64>,
  pub max:          Option<f64>,
  pub step:         Option<f64>,
  pub format_value: Option<Formatter>,
  predicate:        Predicate<T>,
}

impl<T: 'static> FilterConfig<T> {
  pub fn new(
    id: impl Into<String>,
    kind: FilterKind,
    label: impl Into<String>,
    predicate: impl Fn(&T, &FilterValue) -> bool + Send + Sync + 'static,
  ) -> Self {
    Self {
      id: id.into(),
      kind,
      label: label.into(),
      options: Vec::new(),
      min: None,
      max: None,
      step: None,
      format_value: None,
      predicate: Arc::new(predicate),
    }
  }

  /// Checkbox group: keeps items whose key is one of the selected values.
  /// Items without a key are hidden while any value is selected.
  pub fn checkbox(
    id: impl Into<String>,
    label: impl Into<String>,
    options: Vec<FilterOption>,
    key: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
  ) -> Self {
    let mut cfg = Self::new(id, FilterKind::Checkbox, label, move |item, value| {
      match value {
        FilterValue::Checkbox(selected) if !selected.is_empty() => {
          key(item).is_some_and(|k| selected.contains(&k))
        }
        _ => true,
      }
    });
    cfg.options = options;
    cfg
  }

  /// Numeric range slider over `[min, max]`: keeps items whose value lies
  /// within the picked bounds. Items without a value are kept only while the
  /// picked bounds still cover the whole slider.
  pub fn range(
    id: impl Into<String>,
    label: impl Into<String>,
    min: f64,
    max: f64,
    key: impl Fn(&T) -> Option<f64> + Send + Sync + 'static,
  ) -> Self {
    Self::bounded(id, FilterKind::Range, label, min, max, key)
  }

  /// Like [`range`](Self::range), presented as a year slider.
  pub fn year_range(
    id: impl Into<String>,
    label: impl Into<String>,
    min: i32,
    max: i32,
    key: impl Fn(&T) -> Option<i32> + Send + Sync + 'static,
  ) -> Self {
    let mut cfg = Self::bounded(
      id,
      FilterKind::YearRange,
      label,
      f64::from(min),
      f64::from(max),
      move |item| key(item).map(f64::from),
    );
    cfg.step = Some(1.0);
    cfg
  }

  /// Free-text search: keeps items where any of the `haystack` strings
  /// contains the trimmed query, ignoring case.
  pub fn search(
    id: impl Into<String>,
    label: impl Into<String>,
    haystack: impl Fn(&T) -> Vec<String> + Send + Sync + 'static,
  ) -> Self {
    Self::new(id, FilterKind::Search, label, move |item, value| {
      let FilterValue::Search(query) = value else { return true };
      let needle = query.trim().to_lowercase();
      if needle.is_empty() {
        return true;
      }
      haystack(item)
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
    })
  }

  fn bounded(
    id: impl Into<String>,
    kind: FilterKind,
    label: impl Into<String>,
    min: f64,
    max: f64,
    key: impl Fn(&T) -> Option<f64> + Send + Sync + 'static,
  ) -> Self {
    let mut cfg = Self::new(id, kind, label, move |item, value| {
      let &FilterValue::Range(lo, hi) = value else { return true };
      match key(item) {
        Some(v) => lo <= v && v <= hi,
        None => lo <= min && hi >= max,
      }
    });
    cfg.min = Some(min);
    cfg.max = Some(max);
    cfg
  }
}

impl<T> FilterConfig<T> {
  /// Builder-style slider step.
  pub fn with_step(mut self, step: f64) -> Self {
    self.step = Some(step);
    self
  }

  /// Builder-style display formatter.
  pub fn with_formatter(
    mut self,
    f: impl Fn(&FilterValue) -> String + Send + Sync + 'static,
  ) -> Self {
    self.format_value = Some(Arc::new(f));
    self
  }

  /// Run the predicate.
  pub fn matches(&self, item: &T, value: &FilterValue) -> bool {
    (self.predicate)(item, value)
  }

  /// The full-width value of a range slider, i.e. its initial state.
  pub fn full_range(&self) -> Option<FilterValue> {
    Some(FilterValue::Range(self.min?, self.max?))
  }
}


// Manual impls: `T` itself need not be `Clone`/`Debug`/`PartialEq`.

impl<T> Clone for FilterConfig<T> {
  fn clone(&self) -> Self {
    Self {
      id:           self.id.clone(),
      kind:         self.kind,
      label:        self.label.clone(),
      options:      self.options.clone(),
      min:          self.min,
      max:          self.max,
      step:         self.step,
      format_value: self.format_value.clone(),
      predicate:    Arc::clone(&self.predicate),
    }
  }
}

/// Two configs are equal when their descriptors match and they share the
/// same predicate and formatter closures.
impl<T> PartialEq for FilterConfig<T> {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
      && self.kind == other.kind
      && self.label == other.label
      && self.options == other.options
      && self.min == other.min
      && self.max == other.max
      && self.step == other.step
      && Arc::ptr_eq(&self.predicate, &other.predicate)
      && match (&self.format_value, &other.format_value) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
      }
  }
}

impl<T> fmt::Debug for FilterConfig<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FilterConfig")
      .field("id", &self.id)
      .field("kind", &self.kind)
      .field("label", &self.label)
      .field("options", &self.options)
      .field("min", &self.min)
      .field("max", &self.max)
      .field("step", &self.step)
      .finish_non_exhaustive()
  }
}
