//! Typed key/value attributes attached to an entity or a relation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, error::non_empty};

/// What an attribute hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
  Entity,
  Relation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
  pub id:         Uuid,
  pub owner_type: OwnerType,
  pub owner_id:   Uuid,
  pub key:        String,
  pub value:      serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttribute {
  pub owner_type: OwnerType,
  pub owner_id:   Uuid,
  pub key:        String,
  pub value:      serde_json::Value,
}

impl NewAttribute {
  /// Check the payload. Values must be scalars: a list or object would let an
  /// attribute smuggle in a multi-entity claim, which belongs in a relation.
  pub fn validate(self) -> Result<Self> {
    let key = non_empty("key", &self.key)?;
    if self.value.is_array() || self.value.is_object() {
      return Err(Error::NonScalarAttribute(key));
    }
    Ok(Self { key, ..self })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn attr(key: &str, value: serde_json::Value) -> NewAttribute {
    NewAttribute {
      owner_type: OwnerType::Entity,
      owner_id: Uuid::new_v4(),
      key: key.into(),
      value,
    }
  }

  #[test]
  fn scalar_values_accepted() {
    assert!(attr("half_life_hours", json!(4.5)).validate().is_ok());
    assert!(attr("atc_code", json!("N02BA01")).validate().is_ok());
    assert!(attr("otc", json!(true)).validate().is_ok());
  }

  #[test]
  fn composite_values_rejected() {
    assert_eq!(
      attr("interacts", json!(["a", "b"])).validate().unwrap_err(),
      Error::NonScalarAttribute("interacts".into())
    );
    assert!(attr("x", json!({"a": 1})).validate().is_err());
  }

  #[test]
  fn blank_key_rejected() {
    assert_eq!(
      attr(" ", json!(1)).validate().unwrap_err(),
      Error::EmptyField("key")
    );
  }
}
