//! Infinite-scroll trigger.
//!
//! A list renders a sentinel after its last row. The host watches the
//! sentinel for visibility and reports intersection events here;
//! [`InfiniteScroll`] decides whether to ask for the next page and releases
//! the host's observation when it is dropped.

use tokio::sync::mpsc;
use tracing::trace;

/// One visibility change of an observed sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
  pub is_intersecting: bool,
}

impl IntersectionEntry {
  pub fn visible() -> Self { Self { is_intersecting: true } }

  pub fn hidden() -> Self { Self { is_intersecting: false } }
}

/// A live observation of a sentinel, held by whoever asked for it.
pub trait Observation {
  /// Stop observing. Called exactly once, when the owner is dropped.
  fn disconnect(&mut self);
}

/// Calls `on_load_more` when the sentinel comes into view and another page
/// is available and not already loading.
pub struct InfiniteScroll<O: Observation, F: FnMut()> {
  observation:  O,
  on_load_more: F,
  has_more:     bool,
  is_loading:   bool,
}

impl<O: Observation, F: FnMut()> InfiniteScroll<O, F> {
  pub fn new(observation: O, on_load_more: F) -> Self {
    Self { observation, on_load_more, has_more: true, is_loading: false }
  }

  pub fn set_has_more(&mut self, has_more: bool) { self.has_more = has_more; }

  pub fn set_loading(&mut self, is_loading: bool) { self.is_loading = is_loading; }

  pub fn has_more(&self) -> bool { self.has_more }

  pub fn is_loading(&self) -> bool { self.is_loading }

  /// Handle one intersection event. Fires `on_load_more` at most once per
  /// event; returns whether it fired.
  pub fn handle(&mut self, entries: &[IntersectionEntry]) -> bool {
    let intersecting = entries.iter().any(|e| e.is_intersecting);
    let fire = intersecting && self.has_more && !self.is_loading;
    trace!(intersecting, has_more = self.has_more, loading = self.is_loading, fire, "sentinel event");
    if fire {
      (self.on_load_more)();
    }
    fire
  }

  pub fn observation(&self) -> &O { &self.observation }
}

impl<O: Observation, F: FnMut()> Drop for InfiniteScroll<O, F> {
  fn drop(&mut self) { self.observation.disconnect(); }
}

// ─── Channel-backed observation ──────────────────────────────────────────────

/// Host side of a [`ChannelObservation`]: report events with
/// [`notify`](Self::notify).
#[derive(Debug, Clone)]
pub struct IntersectionSender {
  tx: mpsc::UnboundedSender<Vec<IntersectionEntry>>,
}

impl IntersectionSender {
  /// Deliver an event. Returns `false` once the observation is
  /// disconnected.
  pub fn notify(&self, entries: Vec<IntersectionEntry>) -> bool {
    self.tx.send(entries).is_ok()
  }

  pub fn is_disconnected(&self) -> bool { self.tx.is_closed() }
}

/// An observation fed over a tokio channel, for async hosts.
#[derive(Debug)]
pub struct ChannelObservation {
  rx: mpsc::UnboundedReceiver<Vec<IntersectionEntry>>,
}

/// Create a connected sender/observation pair.
pub fn channel() -> (IntersectionSender, ChannelObservation) {
  let (tx, rx) = mpsc::unbounded_channel();
  (IntersectionSender { tx }, ChannelObservation { rx })
}

impl ChannelObservation {
  pub async fn next_event(&mut self) -> Option<Vec<IntersectionEntry>> {
    self.rx.recv().await
  }
}

impl Observation for ChannelObservation {
  fn disconnect(&mut self) { self.rx.close(); }
}

impl<F: FnMut()> InfiniteScroll<ChannelObservation, F> {
  /// Wait for the next event and handle it. Returns `None` when the host
  /// side is gone.
  pub async fn next(&mut self) -> Option<bool> {
    let entries = self.observation.next_event().await?;
    Some(self.handle(&entries))
  }
}
