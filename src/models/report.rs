use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generated report (financial, performance, accountability). Reports are
/// write-once through the API: there is no PATCH route for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// "monthly", "quarterly" or "yearly".
    pub period: String,
    /// Human-readable period, e.g. "January 2025", "Q1 2025", "2025".
    pub period_value: String,
    pub department: String,
    pub content: Option<Value>,
    pub file_url: Option<String>,
    pub generated_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertReport {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub period: String,
    pub period_value: String,
    pub department: String,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub file_url: Option<String>,
    pub generated_by: i64,
}
