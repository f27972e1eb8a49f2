//! The `GraphApi` trait, the client's view of the HyphaGraph backend.
//!
//! The trait is implemented by `hypha-client`'s HTTP client. UI-side state
//! (term editors, list views) depends on this abstraction so it can be driven
//! by an in-memory fake in tests.

use std::future::Future;

use uuid::Uuid;

use crate::{
  entity::{Entity, UiCategory},
  inference::Inference,
  relation::Relation,
  source::Source,
  term::{EntityTerm, EntityTermWrite},
};

// ─── Failure classification ──────────────────────────────────────────────────

/// Client-visible categories of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// Rejected before any request was made; shown inline.
  Validation,
  /// The backend refused a duplicate, e.g. a repeated `(term, language)`.
  AlreadyExists,
  NotFound,
  /// No valid session; the caller should send the user to login.
  Unauthorized,
  /// Network or server failure; shown as a generic message.
  Other,
}

/// Implemented by every [`GraphApi::Error`] so UI state can react to a
/// failure without knowing the transport.
pub trait Failure: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> FailureKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the backend REST API.
///
/// Every call is at-most-once: implementations never retry. All methods
/// return `Send` futures so the trait can be used in multi-threaded runtimes.
pub trait GraphApi: Send + Sync {
  type Error: Failure;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn list_entities(
    &self,
  ) -> impl Future<Output = Result<Vec<Entity>, Self::Error>> + Send + '_;

  /// Returns `None` if the entity does not exist.
  fn get_entity(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Entity>, Self::Error>> + Send + '_;

  /// Navigation categories, in no particular order.
  fn list_ui_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<UiCategory>, Self::Error>> + Send + '_;

  fn list_sources(
    &self,
  ) -> impl Future<Output = Result<Vec<Source>, Self::Error>> + Send + '_;

  /// Returns `None` if the source does not exist.
  fn get_source(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Source>, Self::Error>> + Send + '_;

  /// All relations attributed to one source.
  fn relations_by_source(
    &self,
    source_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Relation>, Self::Error>> + Send + '_;

  /// Inferences the backend has computed for an entity.
  fn inferences_for_entity(
    &self,
    entity_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Inference>, Self::Error>> + Send + '_;

  // ── Entity terms ──────────────────────────────────────────────────────

  fn list_terms(
    &self,
    entity_id: Uuid,
  ) -> impl Future<Output = Result<Vec<EntityTerm>, Self::Error>> + Send + '_;

  /// Create a term. Implementations reject an empty trimmed term before any
  /// request and report a duplicate `(term, language)` distinctly.
  fn create_term(
    &self,
    entity_id: Uuid,
    input: EntityTermWrite,
  ) -> impl Future<Output = Result<EntityTerm, Self::Error>> + Send + '_;

  fn update_term(
    &self,
    entity_id: Uuid,
    term_id: Uuid,
    input: EntityTermWrite,
  ) -> impl Future<Output = Result<EntityTerm, Self::Error>> + Send + '_;

  /// Delete a term. Deleting a term that no longer exists succeeds.
  fn delete_term(
    &self,
    entity_id: Uuid,
    term_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace every term of an entity in one call.
  fn bulk_replace_terms(
    &self,
    entity_id: Uuid,
    terms: Vec<EntityTermWrite>,
  ) -> impl Future<Output = Result<Vec<EntityTerm>, Self::Error>> + Send + '_;
}
