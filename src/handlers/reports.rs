//! Report endpoints. Reports are generated artifacts: they can be created
//! and read but expose no PATCH route.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::audit;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{InsertReport, Report};
use crate::schema;
use crate::store::ReportStore;

use super::json_body;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    department: Option<String>,
}

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let mut body = json_body(body)?;
    // The acting user is the generator
    if let Some(object) = body.as_object_mut() {
        object.insert("generatedBy".to_string(), json!(current.id));
    }
    schema::REPORT.validate(&body)?;

    let insert: InsertReport = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;
    let report = state.store.create_report(insert).await?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "create",
        "report",
        report.id,
        json!({ "title": report.title, "type": report.kind }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/reports?type=|department=
///
/// No recognized filter yields an empty list (see the note on
/// [`super::budget_plans::list`]).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = if let Some(kind) = query.kind.as_deref() {
        state.store.reports_by_type(kind).await?
    } else if let Some(department) = query.department.as_deref() {
        state.store.reports_by_department(department).await?
    } else {
        Vec::new()
    };

    Ok(Json(reports))
}

/// GET /api/reports/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Report>, ApiError> {
    let report = state
        .store
        .report(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;
    Ok(Json(report))
}
