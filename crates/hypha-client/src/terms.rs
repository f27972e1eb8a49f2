//! Editor state for an entity's alias list.

use hypha_core::{
  api::{Failure, FailureKind, GraphApi},
  term::{EntityTerm, EntityTermWrite},
};
use tracing::warn;
use uuid::Uuid;

pub const DUPLICATE_MESSAGE: &str = "This term already exists for this language";
pub const EMPTY_MESSAGE: &str = "Term cannot be empty";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save term";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete term";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load terms";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please log in again";

/// User-facing text for a failed save.
pub fn save_message(kind: FailureKind) -> &'static str {
  match kind {
    FailureKind::AlreadyExists => DUPLICATE_MESSAGE,
    FailureKind::Validation => EMPTY_MESSAGE,
    FailureKind::Unauthorized => SESSION_EXPIRED_MESSAGE,
    FailureKind::NotFound | FailureKind::Other => SAVE_FAILED_MESSAGE,
  }
}

/// The term list of one entity plus the add/edit form beside it.
///
/// Failures never escape: they become an inline message in
/// [`error`](Self::error), which the next edit clears.
#[derive(Debug, Clone)]
pub struct TermEditor {
  entity_id: Uuid,
  terms:     Vec<EntityTerm>,
  draft:     EntityTermWrite,
  /// The term being edited, or `None` when the form adds a new one.
  editing:   Option<Uuid>,
  error:     Option<String>,
}

impl TermEditor {
  pub fn new(entity_id: Uuid) -> Self {
    Self {
      entity_id,
      terms: Vec::new(),
      draft: EntityTermWrite::default(),
      editing: None,
      error: None,
    }
  }

  pub fn entity_id(&self) -> Uuid { self.entity_id }

  pub fn terms(&self) -> &[EntityTerm] { &self.terms }

  pub fn draft(&self) -> &EntityTermWrite { &self.draft }

  pub fn editing(&self) -> Option<Uuid> { self.editing }

  pub fn error(&self) -> Option<&str> { self.error.as_deref() }

  // ── Form input ────────────────────────────────────────────────────────────

  pub fn set_term(&mut self, term: impl Into<String>) {
    self.draft.term = term.into();
    self.error = None;
  }

  pub fn set_language(&mut self, language: Option<String>) {
    self.draft.language = language;
    self.error = None;
  }

  pub fn set_display_order(&mut self, order: Option<i32>) {
    self.draft.display_order = order;
    self.error = None;
  }

  /// Save is disabled until the term has non-whitespace content.
  pub fn can_save(&self) -> bool { !self.draft.term.trim().is_empty() }

  /// Load an existing term into the form. Returns `false` if it is not in
  /// the list.
  pub fn start_edit(&mut self, term_id: Uuid) -> bool {
    let Some(term) = self.terms.iter().find(|t| t.id == term_id) else {
      return false;
    };
    self.draft = EntityTermWrite {
      term:          term.term.clone(),
      language:      term.language.clone(),
      display_order: term.display_order,
    };
    self.editing = Some(term_id);
    self.error = None;
    true
  }

  /// Reset the form to "add new".
  pub fn cancel(&mut self) {
    self.draft = EntityTermWrite::default();
    self.editing = None;
    self.error = None;
  }

  // ── Network actions ───────────────────────────────────────────────────────

  /// Replace the list with the backend's. Returns whether it succeeded.
  pub async fn load<A: GraphApi>(&mut self, api: &A) -> bool {
    match api.list_terms(self.entity_id).await {
      Ok(terms) => {
        self.terms = terms;
        self.sort();
        true
      }
      Err(e) => {
        warn!(entity_id = %self.entity_id, error = %e, "loading terms failed");
        self.error = Some(LOAD_FAILED_MESSAGE.to_owned());
        false
      }
    }
  }

  /// Create or update the draft. Does nothing (and sends nothing) while
  /// [`can_save`](Self::can_save) is false.
  pub async fn save<A: GraphApi>(&mut self, api: &A) -> bool {
    if !self.can_save() {
      return false;
    }
    let input = self.draft.clone();
    let result = match self.editing {
      None => api.create_term(self.entity_id, input).await,
      Some(term_id) => api.update_term(self.entity_id, term_id, input).await,
    };
    match result {
      Ok(saved) => {
        self.terms.retain(|t| t.id != saved.id);
        self.terms.push(saved);
        self.sort();
        self.cancel();
        true
      }
      Err(e) => {
        warn!(entity_id = %self.entity_id, error = %e, "saving term failed");
        self.error = Some(save_message(e.kind()).to_owned());
        false
      }
    }
  }

  /// Delete a term. A term already gone on the backend is removed locally
  /// too.
  pub async fn delete<A: GraphApi>(&mut self, api: &A, term_id: Uuid) -> bool {
    self.error = None;
    match api.delete_term(self.entity_id, term_id).await {
      Ok(()) => {}
      Err(e) if e.kind() == FailureKind::NotFound => {}
      Err(e) => {
        warn!(%term_id, error = %e, "deleting term failed");
        self.error = Some(DELETE_FAILED_MESSAGE.to_owned());
        return false;
      }
    }
    self.terms.retain(|t| t.id != term_id);
    if self.editing == Some(term_id) {
      self.cancel();
    }
    true
  }

  /// Order by `display_order` (unset last), then alphabetically.
  fn sort(&mut self) {
    self.terms.sort_by(|a, b| {
      let key = |t: &EntityTerm| (t.display_order.is_none(), t.display_order);
      key(a).cmp(&key(b)).then_with(|| a.term.cmp(&b.term))
    });
  }
}
