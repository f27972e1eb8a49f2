//! Sources: the documents that give every claim its provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{
  Error, Result,
  error::{in_range, non_empty},
};

/// The publication type of a source. Kinds this client does not know
/// deserialize as [`SourceKind::Other`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
  Study,
  ClinicalTrial,
  Review,
  MetaAnalysis,
  Guideline,
  CaseReport,
  Book,
  Website,
  Other,
}

impl<'de> Deserialize<'de> for SourceKind {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or(Self::Other))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
  pub id:          Uuid,
  pub kind:        SourceKind,
  pub title:       String,
  #[serde(default)]
  pub authors:     Vec<String>,
  pub year:        Option<i32>,
  /// Journal, publisher or site the source came from.
  pub origin:      Option<String>,
  pub url:         Option<String>,
  /// Reliability in `[0, 1]`, assigned by the curator or the trust scorer.
  pub trust_level: Option<f64>,
  pub summary:     Option<String>,
  pub created_at:  Option<DateTime<Utc>>,
}

/// Input for creating or updating a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSource {
  pub kind:        SourceKind,
  pub title:       String,
  #[serde(default)]
  pub authors:     Vec<String>,
  pub year:        Option<i32>,
  pub origin:      Option<String>,
  pub url:         Option<String>,
  pub trust_level: Option<f64>,
  pub summary:     Option<String>,
}

impl NewSource {
  /// Convenience constructor with all optional fields unset.
  pub fn new(kind: SourceKind, title: impl Into<String>) -> Self {
    Self {
      kind,
      title: title.into(),
      authors: Vec::new(),
      year: None,
      origin: None,
      url: None,
      trust_level: None,
      summary: None,
    }
  }

  /// Check the payload and return it with text fields trimmed.
  pub fn validate(self) -> Result<Self> {
    let title = non_empty("title", &self.title)?;

    if let Some(trust) = self.trust_level {
      in_range("trust_level", trust, 0.0, 1.0)?;
    }
    if let Some(year) = self.year {
      in_range("year", f64::from(year), 1000.0, 9999.0)?;
    }
    let url = match self.url.as_deref().map(str::trim) {
      None | Some("") => None,
      Some(u) if u.starts_with("http://") || u.starts_with("https://") => {
        Some(u.to_owned())
      }
      Some(u) => return Err(Error::InvalidUrl(u.to_owned())),
    };
    let authors = self
      .authors
      .iter()
      .map(|a| a.trim())
      .filter(|a| !a.is_empty())
      .map(str::to_owned)
      .collect();

    Ok(Self { title, url, authors, ..self })
  }
}
