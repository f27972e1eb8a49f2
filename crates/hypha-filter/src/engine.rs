//! The filter engine: applies configs to a collection under a filter state.

use std::sync::Arc;

use crate::{config::FilterConfig, value::FilterState};

/// The derived view of a collection.
///
/// `total_count == filtered_count + hidden_count` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<T> {
  /// Retained items, in their original relative order.
  pub filtered_items: Vec<T>,
  pub total_count:    usize,
  pub filtered_count: usize,
  pub hidden_count:   usize,
}

/// Keep every item that passes every active filter.
///
/// Only configs whose id has an active value in `filters` take part; the
/// result is the conjunction of their predicates. State entries without a
/// matching config are ignored.
pub fn compute_filtered<T: Clone>(
  items: &[T],
  filters: &FilterState,
  configs: &[FilterConfig<T>],
) -> FilterResult<T> {
  let active: Vec<_> = configs
    .iter()
    .filter_map(|cfg| filters.active(&cfg.id).map(|v| (cfg, v)))
    .collect();

  let filtered_items: Vec<T> = if active.is_empty() {
    items.to_vec()
  } else {
    items
      .iter()
      .filter(|item| active.iter().all(|(cfg, v)| cfg.matches(item, v)))
      .cloned()
      .collect()
  };

  let total_count = items.len();
  let filtered_count = filtered_items.len();
  FilterResult {
    filtered_items,
    total_count,
    filtered_count,
    hidden_count: total_count - filtered_count,
  }
}

/// Memoizing wrapper around [`compute_filtered`].
///
/// Calling [`compute`](Self::compute) again with inputs equal by value to the
/// previous call returns the same `Arc` (pointer-equal), so consumers can skip
/// re-rendering with a cheap identity check. Any change recomputes.
pub struct FilterEngine<T> {
  last: Option<Memo<T>>,
}

struct Memo<T> {
  items:   Vec<T>,
  filters: FilterState,
  configs: Vec<FilterConfig<T>>,
  result:  Arc<FilterResult<T>>,
}

impl<T: Clone + PartialEq> FilterEngine<T> {
  pub fn new() -> Self { Self { last: None } }

  pub fn compute(
    &mut self,
    items: &[T],
    filters: &FilterState,
    configs: &[FilterConfig<T>],
  ) -> Arc<FilterResult<T>> {
    if let Some(memo) = &self.last
      && memo.items == items
      && memo.filters == *filters
      && memo.configs == configs
    {
      return Arc::clone(&memo.result);
    }

    let result = Arc::new(compute_filtered(items, filters, configs));
    self.last = Some(Memo {
      items:   items.to_vec(),
      filters: filters.clone(),
      configs: configs.to_vec(),
      result:  Arc::clone(&result),
    });
    result
  }

  /// Drop the memoized result.
  pub fn reset(&mut self) { self.last = None; }
}

impl<T: Clone + PartialEq> Default for FilterEngine<T> {
  fn default() -> Self { Self::new() }
}
