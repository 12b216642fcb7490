pub mod audit_trails;
pub mod auth;
pub mod budget_plans;
pub mod dashboard;
pub mod documents;
pub mod reports;
pub mod transactions;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;

/// Unwrap a JSON body, mapping axum's rejection into the API's 400 shape.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(_) => Err(ApiError::bad_request("Invalid JSON body")),
    }
}

/// Lenient `?limit=` parsing: absent or unparseable falls back to the default.
pub(crate) fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}
