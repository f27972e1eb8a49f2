//! Error type for `hypha-client`.

use hypha_core::api::{Failure, FailureKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// The payload was rejected locally; no request was sent.
  #[error("invalid input: {0}")]
  Validation(#[from] hypha_core::Error),

  #[error("already exists: {0}")]
  AlreadyExists(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("not authenticated")]
  Unauthorized,

  #[error("server returned {status}: {detail}")]
  Status { status: u16, detail: String },

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),
}

impl ClientError {
  /// Classify a non-success response. FastAPI reports duplicates as 400 or
  /// 409 with an "already exists" detail.
  pub fn from_status(status: u16, detail: String) -> Self {
    match status {
      401 => Self::Unauthorized,
      404 => Self::NotFound(detail),
      400 | 409 if detail.to_lowercase().contains("already exists") => {
        Self::AlreadyExists(detail)
      }
      _ => Self::Status { status, detail },
    }
  }
}

impl Failure for ClientError {
  fn kind(&self) -> FailureKind {
    match self {
      Self::Validation(e) => e.kind(),
      Self::AlreadyExists(_) => FailureKind::AlreadyExists,
      Self::NotFound(_) => FailureKind::NotFound,
      Self::Unauthorized => FailureKind::Unauthorized,
      Self::Status { .. } | Self::Http(_) => FailureKind::Other,
    }
  }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
