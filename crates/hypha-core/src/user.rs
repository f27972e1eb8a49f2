//! Accounts as reported by the external auth service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:           Uuid,
  pub email:        String,
  #[serde(default = "yes")]
  pub is_active:    bool,
  #[serde(default)]
  pub is_verified:  bool,
  #[serde(default)]
  pub is_superuser: bool,
  #[serde(default)]
  pub profile:      Option<UserProfile>,
}

fn yes() -> bool { true }

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub display_name: Option<String>,
  pub avatar_url:   Option<String>,
  /// Preferred UI language, e.g. `"fr"`.
  pub locale:       Option<String>,
}

impl User {
  /// Display name if set, otherwise the email address.
  pub fn display_name(&self) -> &str {
    self
      .profile
      .as_ref()
      .and_then(|p| p.display_name.as_deref())
      .unwrap_or(&self.email)
  }
}
