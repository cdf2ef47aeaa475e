//! Pending-Change Ledger Records
//!
//! A mutation that could not reach the remote store is committed locally
//! and remembered here until a replay pass acknowledges it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

/// One entry of the pending-change ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Target id; absent for creates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Locally minted id of the shadow record a failed create left behind
    #[serde(default, rename = "tempId", skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
    #[serde(default)]
    pub data: Value,
    pub timestamp: String,
}

impl PendingChange {
    pub fn create(data: Value, temp_id: String) -> Self {
        Self {
            kind: ChangeKind::Create,
            id: None,
            temp_id: Some(temp_id),
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn update(id: String, data: Value) -> Self {
        Self {
            kind: ChangeKind::Update,
            id: Some(id),
            temp_id: None,
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn delete(id: String) -> Self {
        Self {
            kind: ChangeKind::Delete,
            id: Some(id),
            temp_id: None,
            data: Value::Null,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
