//! Audit trail listing. Reaching this handler already requires the
//! `ViewAuditTrails` capability (router-level gate).

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::AuditTrail;
use crate::store::AuditTrailStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    user_id: Option<String>,
    entity_type: Option<String>,
    entity_id: Option<String>,
}

/// GET /api/audit-trails?userId=|entityType=&entityId=
///
/// Filter precedence: acting user first, then entity (which needs both
/// parameters). No recognized filter yields an empty list, like the other
/// list endpoints.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AuditTrail>>, ApiError> {
    // Zero ids are treated like unparseable values: no filter
    let user_id =
        query.user_id.as_deref().and_then(|v| v.parse::<i64>().ok()).filter(|v| *v != 0);
    let entity_id =
        query.entity_id.as_deref().and_then(|v| v.parse::<i64>().ok()).filter(|v| *v != 0);

    let trails = if let Some(user_id) = user_id {
        state.store.audit_trails_by_user(user_id).await?
    } else if let (Some(entity_type), Some(entity_id)) = (query.entity_type.as_deref(), entity_id) {
        state.store.audit_trails_by_entity(entity_type, entity_id).await?
    } else {
        Vec::new()
    };

    Ok(Json(trails))
}
