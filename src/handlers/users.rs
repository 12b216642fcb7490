//! User administration. Listing is admin-only (capability gate at the
//! router); editing is allowed for the account owner or an administrator.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::audit;
use crate::auth;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{Capability, User, UserPatch};
use crate::store::UserStore;

use super::json_body;

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.store.all_users().await?))
}

/// PATCH /api/users/:id
///
/// Allowed for the account owner or a ManageUsers holder. Owners may edit
/// any field of their own record, `role` included; roles are as open here
/// as they are at registration, which accepts any role.
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    if current.id != id && !current.role.allows(Capability::ManageUsers) {
        return Err(ApiError::forbidden("Forbidden: Insufficient permissions"));
    }

    let body = json_body(body)?;
    let mut patch: UserPatch = serde_json::from_value(body.clone())
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;

    if let Some(password) = patch.password.take() {
        let hashed = auth::hash_password(&password).map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to update user")
        })?;
        patch.password = Some(hashed);
    }

    let user = state
        .store
        .update_user(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    // Plaintext passwords must not land in the trail
    let mut changes = body;
    if let Some(object) = changes.as_object_mut() {
        object.remove("password");
    }
    audit::record(
        state.store.as_ref(),
        Some(&current),
        &headers,
        "update",
        "user",
        id,
        json!({ "changes": changes }),
    )
    .await;

    Ok(Json(user))
}
