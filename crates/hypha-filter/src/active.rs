//! Active-filter chips: one display entry per active filter.

use serde::Serialize;

use crate::{config::FilterConfig, value::FilterState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
  /// Filter id; pass to [`FilterState::clear`] to remove the chip.
  pub key:     String,
  pub label:   String,
  pub display: String,
}

/// Derive the chips for every active entry of `filters`, in key order.
///
/// The label is the matching config's label, or the key when no config
/// matches. List-shaped values are formatted before any kind-specific
/// formatter: a single element shows as itself and several show as
/// `"N selected"`. Ranges are `[min, max]` lists and so read `"2 selected"`.
/// Search values go through the config's `format_value` when it has one.
pub fn active_filters<T>(
  filters: &FilterState,
  configs: &[FilterConfig<T>],
) -> Vec<ActiveFilter> {
  filters
    .iter()
    .filter(|(_, value)| value.is_active())
    .map(|(key, value)| {
      let config = configs.iter().find(|c| c.id == key);
      let label = config
        .map(|c| c.label.clone())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| key.to_owned());

      let display = if let Some(list) = value.as_list() {
        match list.as_slice() {
          [single] => single.clone(),
          _ => format!("{} selected", list.len()),
        }
      } else if let Some(format) = config.and_then(|c| c.format_value.as_ref()) {
        format(value)
      } else {
        value.as_search().unwrap_or_default().to_owned()
      };

      ActiveFilter { key: key.to_owned(), label, display }
    })
    .collect()
}
