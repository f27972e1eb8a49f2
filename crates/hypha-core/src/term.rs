//! Entity terms: aliases and synonyms an entity is known by.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, error::non_empty};

/// A stored alias. Unique per `(entity_id, term, language)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTerm {
  pub id:            Uuid,
  pub entity_id:     Uuid,
  pub term:          String,
  /// ISO 639-1 code, or `None` for a language-neutral term (e.g. a code).
  pub language:      Option<String>,
  pub display_order: Option<i32>,
  pub created_at:    Option<DateTime<Utc>>,
}

/// Body of `POST`/`PUT /entities/{id}/terms` and of each element of the
/// bulk-replace payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTermWrite {
  pub term:          String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub language:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_order: Option<i32>,
}

impl EntityTermWrite {
  pub fn new(term: impl Into<String>, language: Option<&str>) -> Self {
    Self {
      term: term.into(),
      language: language.map(str::to_owned),
      display_order: None,
    }
  }

  /// Trim the term and language. An empty term is rejected; an empty
  /// language becomes `None`.
  pub fn validate(self) -> Result<Self> {
    let term = non_empty("term", &self.term)?;
    let language = self
      .language
      .as_deref()
      .map(str::trim)
      .filter(|l| !l.is_empty())
      .map(str::to_owned);
    Ok(Self { term, language, ..self })
  }
}

/// Validate every element of a bulk-replace payload and reject repeated
/// `(term, language)` pairs before the backend sees them.
pub fn validate_bulk(terms: Vec<EntityTermWrite>) -> Result<Vec<EntityTermWrite>> {
  let mut seen = HashSet::new();
  terms
    .into_iter()
    .map(|t| {
      let t = t.validate()?;
      if !seen.insert((t.term.clone(), t.language.clone())) {
        return Err(Error::DuplicateTerm {
          term:     t.term,
          language: t.language,
        });
      }
      Ok(t)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_term_rejected_after_trim() {
    let err = EntityTermWrite::new("   ", Some("en")).validate().unwrap_err();
    assert_eq!(err, Error::EmptyField("term"));
  }

  #[test]
  fn term_and_language_are_trimmed() {
    let t = EntityTermWrite::new(" ASA ", Some(" ")).validate().unwrap();
    assert_eq!(t.term, "ASA");
    assert_eq!(t.language, None);
  }

  #[test]
  fn optional_fields_are_omitted_from_json() {
    let t = EntityTermWrite::new("ASA", None);
    assert_eq!(serde_json::to_string(&t).unwrap(), r#"{"term":"ASA"}"#);
  }

  #[test]
  fn bulk_rejects_repeated_pair() {
    let err = validate_bulk(vec![
      EntityTermWrite::new("ASA", Some("en")),
      EntityTermWrite::new("ASA ", Some("en")),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateTerm { .. }));
  }

  #[test]
  fn bulk_allows_same_term_in_other_language() {
    let terms = validate_bulk(vec![
      EntityTermWrite::new("aspirine", Some("fr")),
      EntityTermWrite::new("aspirine", Some("en")),
      EntityTermWrite::new("aspirine", None),
    ])
    .unwrap();
    assert_eq!(terms.len(), 3);
  }
}
