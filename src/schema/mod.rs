//! Declarative insert schemas.
//!
//! Each resource declares the shape of its POST body as a flat field list.
//! Validation walks the whole list and reports every violation at once, so
//! a client fixing a form sees all of its mistakes in a single 400.
//! Unknown fields are ignored, matching the original system's behavior of
//! stripping anything outside the declared shape.

use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON string.
    Text,
    /// Whole number (i64 range).
    Integer,
    /// Any JSON number.
    Number,
    /// Opaque JSON value, stored as-is.
    Json,
    /// RFC 3339 timestamp string.
    Timestamp,
    /// One of the known role names.
    Role,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InsertSchema {
    pub entity: &'static str,
    pub fields: &'static [FieldSpec],
}

impl InsertSchema {
    /// Check `body` against the declared field list, collecting every
    /// violation rather than stopping at the first.
    pub fn validate(&self, body: &Value) -> Result<(), Vec<Violation>> {
        let object = match body.as_object() {
            Some(object) => object,
            None => {
                return Err(vec![Violation::new("", "Expected a JSON object")]);
            }
        };

        let mut violations = Vec::new();
        for field in self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        violations.push(Violation::new(field.name, "Required"));
                    }
                }
                Some(value) => {
                    if let Some(violation) = check_kind(field, value) {
                        violations.push(violation);
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_kind(field: &FieldSpec, value: &Value) -> Option<Violation> {
    match field.kind {
        FieldKind::Text => {
            if !value.is_string() {
                return Some(Violation::new(field.name, "Expected string"));
            }
        }
        FieldKind::Integer => {
            if value.as_i64().is_none() {
                return Some(Violation::new(field.name, "Expected integer"));
            }
        }
        FieldKind::Number => {
            if value.as_f64().is_none() {
                return Some(Violation::new(field.name, "Expected number"));
            }
        }
        FieldKind::Json => {}
        FieldKind::Timestamp => {
            let ok = value
                .as_str()
                .map(|s| DateTime::parse_from_rfc3339(s).is_ok())
                .unwrap_or(false);
            if !ok {
                return Some(Violation::new(field.name, "Expected RFC 3339 timestamp"));
            }
        }
        FieldKind::Role => {
            let ok = matches!(
                value.as_str(),
                Some("administrator") | Some("keuangan") | Some("pimpinan")
            );
            if !ok {
                return Some(Violation::new(field.name, "Unknown role"));
            }
        }
    }
    None
}

pub const USER: InsertSchema = InsertSchema {
    entity: "user",
    fields: &[
        FieldSpec::required("username", FieldKind::Text),
        FieldSpec::required("password", FieldKind::Text),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("role", FieldKind::Role),
        FieldSpec::required("department", FieldKind::Text),
        FieldSpec::optional("email", FieldKind::Text),
    ],
};

pub const BUDGET_PLAN: InsertSchema = InsertSchema {
    entity: "budget plan",
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("fiscalYear", FieldKind::Integer),
        FieldSpec::required("department", FieldKind::Text),
        FieldSpec::required("status", FieldKind::Text),
        FieldSpec::required("totalAmount", FieldKind::Number),
        FieldSpec::required("submittedBy", FieldKind::Integer),
        FieldSpec::optional("approvedBy", FieldKind::Integer),
        FieldSpec::optional("details", FieldKind::Json),
        FieldSpec::optional("notes", FieldKind::Text),
    ],
};

pub const TRANSACTION: InsertSchema = InsertSchema {
    entity: "transaction",
    fields: &[
        FieldSpec::required("type", FieldKind::Text),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::required("amount", FieldKind::Number),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::required("department", FieldKind::Text),
        FieldSpec::required("budgetPlanId", FieldKind::Integer),
        FieldSpec::required("status", FieldKind::Text),
        FieldSpec::required("submittedBy", FieldKind::Integer),
        FieldSpec::optional("approvedBy", FieldKind::Integer),
        FieldSpec::optional("transactionDate", FieldKind::Timestamp),
        FieldSpec::optional("documentIds", FieldKind::Json),
    ],
};

pub const DOCUMENT: InsertSchema = InsertSchema {
    entity: "document",
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("type", FieldKind::Text),
        FieldSpec::required("department", FieldKind::Text),
        FieldSpec::required("status", FieldKind::Text),
        FieldSpec::optional("content", FieldKind::Json),
        FieldSpec::optional("fileUrl", FieldKind::Text),
        FieldSpec::required("submittedBy", FieldKind::Integer),
        FieldSpec::optional("approvedBy", FieldKind::Integer),
        FieldSpec::optional("submissionDate", FieldKind::Timestamp),
        FieldSpec::optional("approvalDate", FieldKind::Timestamp),
    ],
};

pub const REPORT: InsertSchema = InsertSchema {
    entity: "report",
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("type", FieldKind::Text),
        FieldSpec::required("period", FieldKind::Text),
        FieldSpec::required("periodValue", FieldKind::Text),
        FieldSpec::required("department", FieldKind::Text),
        FieldSpec::optional("content", FieldKind::Json),
        FieldSpec::optional("fileUrl", FieldKind::Text),
        FieldSpec::required("generatedBy", FieldKind::Integer),
    ],
};
