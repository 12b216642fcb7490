//! Registration, login and session endpoints.
//!
//! Tokens are stateless JWTs; logout is an acknowledgement only, there is
//! no server-side revocation list.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{InsertUser, User};
use crate::schema;
use crate::store::UserStore;

use super::json_body;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

fn issue_token(user: &User) -> Result<String, ApiError> {
    auth::generate_jwt(&Claims::for_user(user)).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to generate token")
    })
}

/// POST /api/register - open registration, any valid role accepted.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let body = json_body(body)?;
    schema::USER.validate(&body)?;

    let mut insert: InsertUser = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid request body"))?;

    if state.store.user_by_username(&insert.username).await?.is_some() {
        return Err(ApiError::bad_request("Username already exists"));
    }

    insert.password = auth::hash_password(&insert.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to register user")
    })?;

    let user = state.store.create_user(insert).await?;
    let token = issue_token(&user)?;

    Ok((StatusCode::CREATED, Json(json!({ "token": token, "user": user }))))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body)?;
    let request: LoginRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Username and password are required"))?;

    let user = state.store.user_by_username(&request.username).await?;
    let user = match user {
        Some(user) if auth::verify_password(&request.password, &user.password) => user,
        // Same response whether the username or the password was wrong
        _ => return Err(ApiError::unauthorized("Invalid username or password")),
    };

    let token = issue_token(&user)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

/// POST /api/logout - stateless acknowledgement.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out" }))
}

/// GET /api/user - the authenticated user's own record.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .store
        .user(current.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;
    Ok(Json(user))
}
