//! Filter sets for the source and entity list views.

use chrono::{Datelike, Utc};
use hypha_core::{
  entity::{Entity, UiCategory},
  source::{Source, SourceKind},
};
use strum::IntoEnumIterator;

use crate::{
  config::{FilterConfig, FilterOption},
  value::FilterValue,
};

pub const KIND: &str = "kind";
pub const YEAR: &str = "year";
pub const TRUST_LEVEL: &str = "trust_level";
pub const SEARCH: &str = "search";
pub const UI_CATEGORY: &str = "ui_category";

/// Year bounds for the slider: the span of years present in `sources`, or
/// 1900 to the current year when none carries a year.
pub fn year_bounds(sources: &[Source]) -> (i32, i32) {
  let years = sources.iter().filter_map(|s| s.year);
  match (years.clone().min(), years.max()) {
    (Some(lo), Some(hi)) => (lo, hi),
    _ => (1900, Utc::now().year()),
  }
}

/// Filters offered by the source list.
pub fn source_filters(sources: &[Source]) -> Vec<FilterConfig<Source>> {
  let (year_min, year_max) = year_bounds(sources);
  let kinds = SourceKind::iter()
    .map(|k| FilterOption::new(k.to_string(), humanize(&k.to_string())))
    .collect();

  vec![
    FilterConfig::checkbox(KIND, "Kind", kinds, |s: &Source| {
      Some(s.kind.to_string())
    }),
    FilterConfig::year_range(YEAR, "Year", year_min, year_max, |s: &Source| {
      s.year
    }),
    FilterConfig::range(TRUST_LEVEL, "Trust level", 0.0, 1.0, |s: &Source| {
      s.trust_level
    })
    .with_step(0.1)
    .with_formatter(percent_range),
    FilterConfig::search(SEARCH, "Search", |s: &Source| {
      let mut fields = vec![s.title.clone()];
      fields.extend(s.authors.iter().cloned());
      fields.extend(s.origin.iter().cloned());
      fields
    }),
  ]
}

/// Filters offered by the entity list. Category labels are resolved in
/// `language`.
pub fn entity_filters(
  categories: &[UiCategory],
  language: &str,
) -> Vec<FilterConfig<Entity>> {
  let mut sorted: Vec<_> = categories.iter().collect();
  sorted.sort_by_key(|c| c.order);
  let options = sorted
    .into_iter()
    .map(|c| {
      let label = c.labels.resolve(language).unwrap_or(&c.slug);
      FilterOption::new(c.id.to_string(), label)
    })
    .collect();

  let language = language.to_owned();
  vec![
    FilterConfig::checkbox(UI_CATEGORY, "Category", options, |e: &Entity| {
      e.ui_category_id.map(|id| id.to_string())
    }),
    FilterConfig::search(SEARCH, "Search", move |e: &Entity| {
      let mut fields = vec![e.slug.clone()];
      fields.extend(e.label.iter().cloned());
      fields.extend(e.names.iter().map(|(_, name)| name.to_owned()));
      fields.extend(e.summary.resolve(&language).map(str::to_owned));
      fields
    }),
  ]
}

fn percent_range(value: &FilterValue) -> String {
  match value {
    FilterValue::Range(lo, hi) => {
      format!("{:.0}% – {:.0}%", lo * 100.0, hi * 100.0)
    }
    _ => String::new(),
  }
}

fn humanize(snake: &str) -> String {
  let spaced = snake.replace('_', " ");
  let mut chars = spaced.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => spaced,
  }
}
