//! Layered CLI settings: TOML file, then `HYPHA_*` environment, then flags.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Shape of `hypha.toml`; every key may also come from `HYPHA_<KEY>`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  #[serde(default)]
  pub token:    Option<String>,
  /// Language used to resolve localized labels.
  #[serde(default = "default_language")]
  pub language: String,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }

fn default_language() -> String { "en".to_owned() }

impl Settings {
  /// Read `path` (optional) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HYPHA"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Apply command-line overrides.
  pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
    if let Some(url) = url {
      self.base_url = url;
    }
    if token.is_some() {
      self.token = token;
    }
    self
  }
}
