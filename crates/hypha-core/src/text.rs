//! Localized strings keyed by language code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language used when the requested one has no translation.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A string with one value per language code, e.g. `{"en": "Aspirin",
/// "fr": "Aspirine"}`. Serialises as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
  pub fn new() -> Self { Self::default() }

  /// Builder-style insert.
  pub fn with(mut self, language: &str, value: impl Into<String>) -> Self {
    self.0.insert(language.to_owned(), value.into());
    self
  }

  pub fn insert(&mut self, language: &str, value: impl Into<String>) {
    self.0.insert(language.to_owned(), value.into());
  }

  pub fn is_empty(&self) -> bool {
    self.0.values().all(|v| v.trim().is_empty())
  }

  /// Resolve a display string for `language`: the exact language, then
  /// English, then whichever translation sorts first.
  pub fn resolve(&self, language: &str) -> Option<&str> {
    self
      .0
      .get(language)
      .or_else(|| self.0.get(FALLBACK_LANGUAGE))
      .or_else(|| self.0.values().next())
      .map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}
