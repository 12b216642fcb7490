use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Annual budget plan for one department (RKA/RBA level).
///
/// `status` moves draft -> submitted -> approved|rejected by convention
/// only; the data layer accepts any string and no server-side transition
/// guard exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub id: i64,
    pub title: String,
    pub fiscal_year: i32,
    pub department: String,
    pub status: String,
    pub total_amount: f64,
    pub submitted_by: i64,
    pub approved_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub details: Option<Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertBudgetPlan {
    pub title: String,
    pub fiscal_year: i32,
    pub department: String,
    pub status: String,
    pub total_amount: f64,
    pub submitted_by: i64,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlanPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BudgetPlan {
    pub fn apply(&mut self, patch: BudgetPlanPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.fiscal_year {
            self.fiscal_year = v;
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.total_amount {
            self.total_amount = v;
        }
        if let Some(v) = patch.approved_by {
            self.approved_by = Some(v);
        }
        if let Some(v) = patch.details {
            self.details = Some(v);
        }
        if let Some(v) = patch.notes {
            self.notes = Some(v);
        }
    }
}
