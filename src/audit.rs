//! Audit recorder.
//!
//! Every mutating API call appends exactly one trail row naming the acting
//! user and the affected entity. The recorder is deliberately decoupled
//! from the mutation it describes: a failed audit write is logged and the
//! primary mutation stands.

use axum::http::HeaderMap;
use serde_json::Value;

use crate::middleware::CurrentUser;
use crate::models::InsertAuditTrail;
use crate::store::{AuditTrailStore, Storage};

/// Append one audit row. No-ops when no authenticated user is present.
pub async fn record(
    store: &dyn Storage,
    user: Option<&CurrentUser>,
    headers: &HeaderMap,
    action: &str,
    entity_type: &str,
    entity_id: i64,
    details: Value,
) {
    let user = match user {
        Some(user) => user,
        None => return,
    };

    let result = store
        .create_audit_trail(InsertAuditTrail {
            user_id: user.id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            details,
            ip_address: client_ip(headers),
        })
        .await;

    if let Err(e) = result {
        // The mutation already happened; never unwind it over bookkeeping
        tracing::warn!(
            "audit write failed for {} {} #{}: {}",
            action,
            entity_type,
            entity_id,
            e
        );
    }
}

/// Originating address: first hop of `x-forwarded-for` when present.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::{AuditTrailStore, MemStore};
    use axum::http::HeaderValue;
    use serde_json::json;

    fn actor() -> CurrentUser {
        CurrentUser {
            id: 3,
            username: "admin".into(),
            role: Role::Administrator,
            department: "Dinas Kesehatan".into(),
        }
    }

    #[test]
    fn client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), "127.0.0.1");

        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.9, 192.168.1.1"));
        assert_eq!(client_ip(&headers), "10.0.0.9");
    }

    #[tokio::test]
    async fn records_one_row_per_call() {
        let store = MemStore::new();
        let user = actor();
        record(&store, Some(&user), &HeaderMap::new(), "create", "budget", 1, json!({})).await;
        record(&store, Some(&user), &HeaderMap::new(), "update", "budget", 1, json!({})).await;

        let rows = store.audit_trails_by_entity("budget", 1).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].action, "create");
        assert_eq!(rows[0].user_id, 3);
        assert_eq!(rows[0].ip_address, "127.0.0.1");
    }

    #[tokio::test]
    async fn no_ops_without_an_authenticated_user() {
        let store = MemStore::new();
        record(&store, None, &HeaderMap::new(), "create", "budget", 1, json!({})).await;
        assert!(store.audit_trails_by_entity("budget", 1).await.unwrap().is_empty());
    }
}
