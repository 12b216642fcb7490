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
use crate::models::{InsertTransaction, Transaction, TransactionPatch};
use crate::schema;
use crate::store::TransactionStore;

use super::{json_body, parse_limit};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    budget_plan_id: Option<String>,
    department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    limit: Option<String>,
}

/// POST /api/transactions
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let mut body = json_body(body)?;
    if let Some(object) = body.as_object_mut() {
        object.insert("submittedBy".to_string(), json!(current.id));
    }
    schema::TRANSACTION.validate(&body)?;

    let insert: InsertTransaction = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;
    let transaction = state.store.create_transaction(insert).await?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "create",
        "transaction",
        transaction.id,
        json!({ "type": transaction.kind, "amount": transaction.amount }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// GET /api/transactions/recent?limit=
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let limit = parse_limit(query.limit.as_deref(), 5);
    Ok(Json(state.store.recent_transactions(limit).await?))
}

/// GET /api/transactions?budgetPlanId=|department=
///
/// No recognized filter yields an empty list (see the note on
/// [`super::budget_plans::list`]).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    // Zero is treated like an unparseable value: no filter
    let budget_plan_id = query
        .budget_plan_id
        .as_deref()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v != 0);

    let transactions = if let Some(plan_id) = budget_plan_id {
        state.store.transactions_by_budget_plan(plan_id).await?
    } else if let Some(department) = query.department.as_deref() {
        state.store.transactions_by_department(department).await?
    } else {
        Vec::new()
    };

    Ok(Json(transactions))
}

/// GET /api/transactions/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state
        .store
        .transaction(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction not found"))?;
    Ok(Json(transaction))
}

/// PATCH /api/transactions/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Transaction>, ApiError> {
    if state.store.transaction(id).await?.is_none() {
        return Err(ApiError::not_found("Transaction not found"));
    }

    let body = json_body(body)?;
    let patch: TransactionPatch = serde_json::from_value(body.clone())
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;

    let transaction = state
        .store
        .update_transaction(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction not found"))?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "update",
        "transaction",
        id,
        json!({ "changes": body }),
    )
    .await;

    Ok(Json(transaction))
}
