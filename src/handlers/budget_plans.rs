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
use crate::models::{BudgetPlan, BudgetPlanPatch, InsertBudgetPlan};
use crate::schema;
use crate::store::BudgetPlanStore;

use super::json_body;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    fiscal_year: Option<String>,
    department: Option<String>,
}

/// POST /api/budget-plans
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BudgetPlan>), ApiError> {
    let mut body = json_body(body)?;
    // The acting user is always the submitter, whatever the body says
    if let Some(object) = body.as_object_mut() {
        object.insert("submittedBy".to_string(), json!(current.id));
    }
    schema::BUDGET_PLAN.validate(&body)?;

    let insert: InsertBudgetPlan = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;
    let plan = state.store.create_budget_plan(insert).await?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "create",
        "budget",
        plan.id,
        json!({ "title": plan.title, "fiscalYear": plan.fiscal_year }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/budget-plans?fiscalYear=|department=
///
/// One filter dimension at a time, fiscal year taking precedence. Without a
/// recognized filter the endpoint returns an empty list, not the whole
/// collection - a pagination placeholder inherited from the original
/// system, kept as observed.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BudgetPlan>>, ApiError> {
    // Zero is treated like an unparseable value: no filter
    let fiscal_year =
        query.fiscal_year.as_deref().and_then(|v| v.parse::<i32>().ok()).filter(|v| *v != 0);

    let plans = if let Some(year) = fiscal_year {
        state.store.budget_plans_by_fiscal_year(year).await?
    } else if let Some(department) = query.department.as_deref() {
        state.store.budget_plans_by_department(department).await?
    } else {
        Vec::new()
    };

    Ok(Json(plans))
}

/// GET /api/budget-plans/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BudgetPlan>, ApiError> {
    let plan = state
        .store
        .budget_plan(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Budget plan not found"))?;
    Ok(Json(plan))
}

/// PATCH /api/budget-plans/:id
///
/// Merges the patch unconditionally: no field whitelist beyond the entity's
/// own shape and no status-transition validation.
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BudgetPlan>, ApiError> {
    if state.store.budget_plan(id).await?.is_none() {
        return Err(ApiError::not_found("Budget plan not found"));
    }

    let body = json_body(body)?;
    let patch: BudgetPlanPatch = serde_json::from_value(body.clone())
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;

    let plan = state
        .store
        .update_budget_plan(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Budget plan not found"))?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "update",
        "budget",
        id,
        json!({ "changes": body }),
    )
    .await;

    Ok(Json(plan))
}
