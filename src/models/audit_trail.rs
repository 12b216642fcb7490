use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append-only record of a mutating action, kept for compliance review.
/// Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrail {
    pub id: i64,
    pub user_id: i64,
    /// "create", "update" or "delete".
    pub action: String,
    /// "user", "budget", "transaction", "document" or "report".
    pub entity_type: String,
    pub entity_id: i64,
    pub details: Value,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAuditTrail {
    pub user_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub details: Value,
    pub ip_address: String,
}
