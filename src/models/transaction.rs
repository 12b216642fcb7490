use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Budget execution entry tied to a budget plan. Unlike the other core
/// entities it carries no `updatedAt`; updates merge fields in place
/// without refreshing any timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    /// "income" or "expense" by convention.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub department: String,
    pub budget_plan_id: i64,
    /// pending -> approved|rejected|completed by convention.
    pub status: String,
    pub submitted_by: i64,
    pub approved_by: Option<i64>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Loose references to supporting documents, kept opaque.
    pub document_ids: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTransaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub department: String,
    pub budget_plan_id: i64,
    pub status: String,
    pub submitted_by: i64,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub document_ids: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_plan_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Value>,
}

impl Transaction {
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(v) = patch.kind {
            self.kind = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.amount {
            self.amount = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = patch.budget_plan_id {
            self.budget_plan_id = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.approved_by {
            self.approved_by = Some(v);
        }
        if let Some(v) = patch.transaction_date {
            self.transaction_date = Some(v);
        }
        if let Some(v) = patch.document_ids {
            self.document_ids = Some(v);
        }
    }
}
