//! A value that settles only after its input has been quiet for a while.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Time-delayed mirror of an input value.
///
/// The initial value is visible immediately. Each [`set`](Self::set) with a
/// new value cancels the pending one and restarts the delay window, so a
/// burst of changes settles on the last. The pending timer is a plain
/// deadline owned by this value and goes away with it.
///
/// Time is read from tokio's clock, so tests can pause and advance it.
#[derive(Debug)]
pub struct Debounced<T> {
  current: T,
  pending: Option<(T, Instant)>,
  delay:   Duration,
}

impl<T: PartialEq> Debounced<T> {
  pub fn new(initial: T, delay: Duration) -> Self {
    Self { current: initial, pending: None, delay }
  }

  /// Feed a new input value. Re-feeding the latest input is a no-op and
  /// does not restart the window.
  pub fn set(&mut self, value: T) {
    self.promote();
    let latest = self.pending.as_ref().map_or(&self.current, |(v, _)| v);
    if *latest == value {
      return;
    }
    if self.current == value {
      // Back to the settled value: nothing left to wait for.
      self.pending = None;
      return;
    }
    self.pending = Some((value, Instant::now() + self.delay));
  }

  /// The settled value.
  pub fn get(&self) -> &T {
    match &self.pending {
      Some((value, deadline)) if Instant::now() >= *deadline => value,
      _ => &self.current,
    }
  }

  /// Whether a value is waiting for its window to close.
  pub fn is_pending(&self) -> bool {
    matches!(&self.pending, Some((_, deadline)) if Instant::now() < *deadline)
  }

  /// Wait until the pending value (if any) settles, then return it.
  pub async fn settled(&mut self) -> &T {
    if let Some((_, deadline)) = &self.pending {
      sleep_until(*deadline).await;
    }
    self.promote();
    &self.current
  }

  /// Drop the pending value without letting it settle.
  pub fn cancel(&mut self) {
    self.promote();
    self.pending = None;
  }

  /// Move an expired pending value into `current`.
  fn promote(&mut self) {
    let expired = matches!(&self.pending, Some((_, d)) if Instant::now() >= *d);
    if expired && let Some((value, _)) = self.pending.take() {
      self.current = value;
    }
  }
}

#[cfg(test)]
mod tests {
  use tokio::time::advance;

  use super::*;

  const DELAY: Duration = Duration::from_millis(300);

  #[tokio::test(start_paused = true)]
  async fn initial_value_is_visible_immediately() {
    let d = Debounced::new("a", DELAY);
    assert_eq!(*d.get(), "a");
    assert!(!d.is_pending());
  }

  #[tokio::test(start_paused = true)]
  async fn change_is_not_visible_before_delay() {
    let mut d = Debounced::new("a", DELAY);
    d.set("b");
    advance(Duration::from_millis(299)).await;
    assert_eq!(*d.get(), "a");
    assert!(d.is_pending());

    advance(Duration::from_millis(1)).await;
    assert_eq!(*d.get(), "b");
    assert!(!d.is_pending());
  }

  #[tokio::test(start_paused = true)]
  async fn rapid_changes_coalesce_to_last() {
    let mut d = Debounced::new(String::new(), DELAY);
    for q in ["a", "as", "asp", "aspi"] {
      d.set(q.to_string());
      advance(Duration::from_millis(100)).await;
      assert_eq!(d.get(), "");
    }
    advance(Duration::from_millis(200)).await;
    assert_eq!(d.get(), "aspi");
  }

  #[tokio::test(start_paused = true)]
  async fn each_change_restarts_the_window() {
    let mut d = Debounced::new(0, DELAY);
    d.set(1);
    advance(Duration::from_millis(250)).await;
    d.set(2);
    advance(Duration::from_millis(250)).await;
    assert_eq!(*d.get(), 0);
    advance(Duration::from_millis(50)).await;
    assert_eq!(*d.get(), 2);
  }

  #[tokio::test(start_paused = true)]
  async fn setting_same_value_does_not_restart() {
    let mut d = Debounced::new(0, DELAY);
    d.set(1);
    advance(Duration::from_millis(250)).await;
    d.set(1);
    advance(Duration::from_millis(50)).await;
    assert_eq!(*d.get(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn settled_waits_for_deadline() {
    let mut d = Debounced::new("a", DELAY);
    d.set("b");
    let start = Instant::now();
    assert_eq!(*d.settled().await, "b");
    assert!(start.elapsed() >= DELAY);
  }

  #[tokio::test(start_paused = true)]
  async fn cancel_discards_pending_value() {
    let mut d = Debounced::new("a", DELAY);
    d.set("b");
    d.cancel();
    advance(DELAY * 2).await;
    assert_eq!(*d.get(), "a");
  }
}
