use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Administrative document. `type` is a free-form government document code
/// (RKA, SPP, LRA, ...) treated as an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub department: String,
    pub status: String,
    pub content: Option<Value>,
    pub file_url: Option<String>,
    pub submitted_by: i64,
    pub approved_by: Option<i64>,
    pub submission_date: Option<DateTime<Utc>>,
    pub approval_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDocument {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub department: String,
    pub status: String,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub file_url: Option<String>,
    pub submitted_by: i64,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub submission_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approval_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<DateTime<Utc>>,
}

impl Document {
    pub fn apply(&mut self, patch: DocumentPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.kind {
            self.kind = v;
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.content {
            self.content = Some(v);
        }
        if let Some(v) = patch.file_url {
            self.file_url = Some(v);
        }
        if let Some(v) = patch.approved_by {
            self.approved_by = Some(v);
        }
        if let Some(v) = patch.submission_date {
            self.submission_date = Some(v);
        }
        if let Some(v) = patch.approval_date {
            self.approval_date = Some(v);
        }
    }
}
