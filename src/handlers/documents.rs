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
use crate::models::{Document, DocumentPatch, InsertDocument};
use crate::schema;
use crate::store::DocumentStore;

use super::{json_body, parse_limit};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    limit: Option<String>,
}

/// POST /api/documents
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let mut body = json_body(body)?;
    if let Some(object) = body.as_object_mut() {
        object.insert("submittedBy".to_string(), json!(current.id));
    }
    schema::DOCUMENT.validate(&body)?;

    let insert: InsertDocument = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;
    let document = state.store.create_document(insert).await?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "create",
        "document",
        document.id,
        json!({ "title": document.title, "type": document.kind }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/documents/pending?limit=
pub async fn pending(
    State(state): State<AppState>,
    Query(query): Query<PendingQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let limit = parse_limit(query.limit.as_deref(), 5);
    Ok(Json(state.store.pending_documents(limit).await?))
}

/// GET /api/documents?status=|department=
///
/// No recognized filter yields an empty list (see the note on
/// [`super::budget_plans::list`]).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = if let Some(status) = query.status.as_deref() {
        state.store.documents_by_status(status).await?
    } else if let Some(department) = query.department.as_deref() {
        state.store.documents_by_department(department).await?
    } else {
        Vec::new()
    };

    Ok(Json(documents))
}

/// GET /api/documents/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Document>, ApiError> {
    let document = state
        .store
        .document(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;
    Ok(Json(document))
}

/// PATCH /api/documents/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Document>, ApiError> {
    if state.store.document(id).await?.is_none() {
        return Err(ApiError::not_found("Document not found"));
    }

    let body = json_body(body)?;
    let patch: DocumentPatch = serde_json::from_value(body.clone())
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;

    let document = state
        .store
        .update_document(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;

    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "update",
        "document",
        id,
        json!({ "changes": body }),
    )
    .await;

    Ok(Json(document))
}
