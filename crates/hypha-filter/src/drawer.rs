//! Open/closed state of the filter drawer.

use crate::value::FilterState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterDrawer {
  open: bool,
}

impl FilterDrawer {
  pub fn new() -> Self { Self::default() }

  pub fn is_open(&self) -> bool { self.open }

  pub fn open(&mut self) { self.open = true; }

  pub fn close(&mut self) { self.open = false; }

  pub fn toggle(&mut self) { self.open = !self.open; }

  /// Badge count shown on the drawer button.
  pub fn active_count(&self, filters: &FilterState) -> usize {
    filters.active_count()
  }

  /// "Clear all" inside the drawer. The drawer stays open.
  pub fn clear_all(&self, filters: &mut FilterState) { filters.clear_all(); }
}
