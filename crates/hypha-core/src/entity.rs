//! Entities and the navigation categories that group them.
//!
//! An entity is a context-free domain object (a drug, a disease, a
//! mechanism). It never encodes truth or causality; claims about it live in
//! relations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, error::non_empty, text::LocalizedText};

// ─── Entity ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
  pub id:             Uuid,
  /// Machine-friendly identifier, e.g. `"aspirin"`.
  pub slug:           String,
  pub ui_category_id: Option<Uuid>,
  /// Human-readable label shown when no localized name matches.
  #[serde(default)]
  pub label:          Option<String>,
  #[serde(default)]
  pub names:          LocalizedText,
  #[serde(default)]
  pub summary:        LocalizedText,
  pub created_at:     Option<DateTime<Utc>>,
}

impl Entity {
  /// Name to show in `language`: the localized name, then the label, then
  /// the slug.
  pub fn display_name(&self, language: &str) -> &str {
    self
      .names
      .resolve(language)
      .or(self.label.as_deref())
      .unwrap_or(&self.slug)
  }
}

/// Input for creating or updating an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
  pub slug:           String,
  pub ui_category_id: Option<Uuid>,
  #[serde(default)]
  pub label:          Option<String>,
  #[serde(default)]
  pub names:          LocalizedText,
  #[serde(default)]
  pub summary:        LocalizedText,
}

impl NewEntity {
  pub fn new(slug: impl Into<String>) -> Self {
    Self { slug: slug.into(), ..Default::default() }
  }

  /// Check the payload and return it with the slug trimmed.
  pub fn validate(self) -> Result<Self> {
    let slug = non_empty("slug", &self.slug)?;
    if !is_slug(&slug) {
      return Err(Error::InvalidSlug(slug));
    }
    let label = self
      .label
      .map(|l| l.trim().to_owned())
      .filter(|l| !l.is_empty());
    Ok(Self { slug, label, ..self })
  }
}

fn is_slug(s: &str) -> bool {
  s.chars()
    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

// ─── UiCategory ──────────────────────────────────────────────────────────────

/// A purely presentational grouping used for navigation. Carries no
/// provenance and no semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiCategory {
  pub id:     Uuid,
  pub slug:   String,
  #[serde(default)]
  pub labels: LocalizedText,
  /// Sort position in navigation; lower comes first.
  #[serde(default)]
  pub order:  i32,
}
