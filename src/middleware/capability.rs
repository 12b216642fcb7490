use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::models::Capability;

/// Authorization gate, layered inside [`super::require_auth`]. Consults the
/// role capability table instead of comparing raw role strings.
pub async fn require_capability(
    capability: Capability,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    if !user.role.allows(capability) {
        return Err(ApiError::forbidden("Forbidden: Insufficient permissions"));
    }

    Ok(next.run(request).await)
}
