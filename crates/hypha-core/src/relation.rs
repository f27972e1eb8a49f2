//! Relations and roles.
//!
//! A relation is a single claim made by exactly one source. It never
//! represents consensus. Entities take part in it through roles, and the role
//! type carries the full semantic meaning (e.g. `"agent"`, `"target"`,
//! `"condition"`).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{
  Error, Result,
  error::{in_range, non_empty},
};

/// Whether the source supports or contradicts the claim.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
  Supports,
  Contradicts,
  #[default]
  Uncertain,
}

/// The participation of one entity in one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub relation_id: Uuid,
  pub entity_id:   Uuid,
  pub role_type:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
  pub id:         Uuid,
  /// The single source this claim is attributed to.
  pub source_id:  Uuid,
  /// Claim type, e.g. `"treats"` or `"causes"`.
  pub kind:       String,
  pub direction:  Direction,
  pub confidence: Option<f64>,
  /// Population or context the claim is limited to.
  pub scope:      Option<String>,
  pub notes:      Option<String>,
  #[serde(default)]
  pub roles:      Vec<Role>,
  pub created_at: Option<DateTime<Utc>>,
}

impl Relation {
  /// Entities playing `role_type` in this relation.
  pub fn entities_in_role<'a>(
    &'a self,
    role_type: &'a str,
  ) -> impl Iterator<Item = Uuid> + 'a {
    self
      .roles
      .iter()
      .filter(move |r| r.role_type == role_type)
      .map(|r| r.entity_id)
  }
}

/// A role inside a [`NewRelation`]; the relation id is assigned by the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
  pub entity_id: Uuid,
  pub role_type: String,
}

impl NewRole {
  pub fn new(entity_id: Uuid, role_type: impl Into<String>) -> Self {
    Self { entity_id, role_type: role_type.into() }
  }
}

/// Input for creating a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRelation {
  pub source_id:  Uuid,
  pub kind:       String,
  #[serde(default)]
  pub direction:  Direction,
  pub confidence: Option<f64>,
  pub scope:      Option<String>,
  pub notes:      Option<String>,
  pub roles:      Vec<NewRole>,
}

impl NewRelation {
  pub fn new(source_id: Uuid, kind: impl Into<String>) -> Self {
    Self {
      source_id,
      kind: kind.into(),
      direction: Direction::default(),
      confidence: None,
      scope: None,
      notes: None,
      roles: Vec::new(),
    }
  }

  /// Builder-style role append.
  pub fn with_role(mut self, entity_id: Uuid, role_type: &str) -> Self {
    self.roles.push(NewRole::new(entity_id, role_type));
    self
  }

  /// Check the payload and return it with role types trimmed.
  pub fn validate(self) -> Result<Self> {
    let kind = non_empty("kind", &self.kind)?;
    if self.roles.is_empty() {
      return Err(Error::NoRoles);
    }
    if let Some(c) = self.confidence {
      in_range("confidence", c, 0.0, 1.0)?;
    }

    let mut seen = HashSet::new();
    let mut roles = Vec::with_capacity(self.roles.len());
    for role in self.roles {
      let role_type = non_empty("role_type", &role.role_type)?;
      if !seen.insert((role.entity_id, role_type.clone())) {
        return Err(Error::DuplicateRole {
          entity_id: role.entity_id,
          role_type,
        });
      }
      roles.push(NewRole { entity_id: role.entity_id, role_type });
    }

    Ok(Self { kind, roles, ..self })
  }
}
