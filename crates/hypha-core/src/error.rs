//! Error types for `hypha-core`.

use thiserror::Error;

/// A write payload failed client-side validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("{field} must be between {min} and {max}, got {value}")]
  OutOfRange {
    field: &'static str,
    min:   f64,
    max:   f64,
    value: f64,
  },

  #[error("invalid slug {0:?}: use lowercase letters, digits and dashes")]
  InvalidSlug(String),

  #[error("invalid url {0:?}: expected http:// or https://")]
  InvalidUrl(String),

  #[error("a relation needs at least one role")]
  NoRoles,

  #[error("entity {entity_id} already plays role {role_type:?} in this relation")]
  DuplicateRole {
    entity_id: uuid::Uuid,
    role_type: String,
  },

  #[error("attribute {0:?} must hold a scalar value")]
  NonScalarAttribute(String),

  #[error("term {term:?} already exists for language {language:?}")]
  DuplicateTerm {
    term:     String,
    language: Option<String>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Trim `value` and reject it if nothing is left.
pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyField(field));
  }
  Ok(trimmed.to_owned())
}

/// Reject a value outside `[min, max]`. NaN is always out of range.
pub(crate) fn in_range(
  field: &'static str,
  value: f64,
  min: f64,
  max: f64,
) -> Result<()> {
  if !(min..=max).contains(&value) {
    return Err(Error::OutOfRange { field, min, max, value });
  }
  Ok(())
}

impl crate::api::Failure for Error {
  fn kind(&self) -> crate::api::FailureKind {
    match self {
      Error::DuplicateTerm { .. } => crate::api::FailureKind::AlreadyExists,
      _ => crate::api::FailureKind::Validation,
    }
  }
}
