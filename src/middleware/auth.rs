use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;
use crate::models::{Role, User};
use crate::store::UserStore;

/// Authenticated user context extracted from the bearer token and the store.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub department: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            department: user.department.clone(),
        }
    }
}

/// Authentication gate. Validates the bearer token, reloads the user from
/// the store (a token for a vanished user is worthless) and injects a
/// [`CurrentUser`] extension for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::validate_jwt(&token).map_err(|e| {
        tracing::warn!("rejected token: {}", e);
        ApiError::unauthorized("Unauthorized")
    })?;

    let user = state
        .store
        .user(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    request.extensions_mut().insert(CurrentUser::from(&user));
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Unauthorized".to_string())?;

    let auth_str = auth_header.to_str().map_err(|_| "Unauthorized".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err("Unauthorized".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
