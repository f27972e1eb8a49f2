//! Computed inferences.
//!
//! An inference is a disposable synthesis over the relations in some scope.
//! It is never authored by a human, so there is no write type for it: the
//! backend recomputes it on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
  pub id:          Uuid,
  /// Hash of the relation set the inference was computed over; a new hash
  /// means the inference is stale.
  pub scope_hash:  String,
  pub result:      serde_json::Value,
  pub uncertainty: Option<f64>,
  pub computed_at: DateTime<Utc>,
}

impl Inference {
  /// Whether this inference was computed over the relation set identified
  /// by `scope_hash`.
  pub fn is_current_for(&self, scope_hash: &str) -> bool {
    self.scope_hash == scope_hash
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialises_backend_payload() {
    let inf: Inference = serde_json::from_value(serde_json::json!({
      "id": "7f1c5d8e-3a7b-4f6e-9a51-2d0b8c4e6f10",
      "scope_hash": "9f2c",
      "result": { "direction": "supports", "score": 0.72 },
      "uncertainty": 0.18,
      "computed_at": "2024-03-01T12:00:00Z"
    }))
    .unwrap();
    assert!(inf.is_current_for("9f2c"));
    assert!(!inf.is_current_for("0000"));
    assert_eq!(inf.result["score"], 0.72);
  }
}
