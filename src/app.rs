//! Router assembly and shared application state.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth;
use crate::config;
use crate::handlers::{
    audit_trails, auth as auth_handlers, budget_plans, dashboard, documents, reports,
    transactions, users,
};
use crate::middleware::{capability::require_capability, require_auth};
use crate::models::{Capability, InsertUser, Role};
use crate::store::{MemStore, Storage, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemStore::new()))
    }
}

pub fn router(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes(state.clone()))
        .merge(api_routes(state));

    if config.api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Token acquisition - the only API surface reachable without a session.
fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(auth_handlers::register))
        .route("/api/login", post(auth_handlers::login))
        .with_state(state)
}

fn api_routes(state: AppState) -> Router {
    // Capability-gated sub-routers; their gate runs inside require_auth
    let audit_routes = Router::new()
        .route("/api/audit-trails", get(audit_trails::list))
        .route_layer(axum::middleware::from_fn(|req: Request, next: Next| {
            require_capability(Capability::ViewAuditTrails, req, next)
        }));

    let user_admin_routes = Router::new()
        .route("/api/users", get(users::list))
        .route_layer(axum::middleware::from_fn(|req: Request, next: Next| {
            require_capability(Capability::ManageUsers, req, next)
        }));

    Router::new()
        .route("/api/logout", post(auth_handlers::logout))
        .route("/api/user", get(auth_handlers::current_user))
        .route("/api/users/:id", patch(users::update))
        .route("/api/budget-plans", post(budget_plans::create).get(budget_plans::list))
        .route("/api/budget-plans/:id", get(budget_plans::show).patch(budget_plans::update))
        .route("/api/transactions", post(transactions::create).get(transactions::list))
        .route("/api/transactions/recent", get(transactions::recent))
        .route("/api/transactions/:id", get(transactions::show).patch(transactions::update))
        .route("/api/documents", post(documents::create).get(documents::list))
        .route("/api/documents/pending", get(documents::pending))
        .route("/api/documents/:id", get(documents::show).patch(documents::update))
        .route("/api/reports", post(reports::create).get(reports::list))
        .route("/api/reports/:id", get(reports::show))
        .route("/api/dashboard", get(dashboard::snapshot))
        .merge(audit_routes)
        .merge(user_admin_routes)
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

/// Bootstrap administrator for development/staging. Idempotent across
/// restarts; never runs in production (config gate in main).
pub async fn seed_admin(state: &AppState) -> anyhow::Result<()> {
    if state.store.user_by_username("admin").await?.is_some() {
        return Ok(());
    }

    let admin = state
        .store
        .create_user(InsertUser {
            username: "admin".to_string(),
            password: auth::hash_password("admin123")?,
            name: "Admin SKPD".to_string(),
            role: Role::Administrator,
            department: "Dinas Kesehatan".to_string(),
            email: Some("admin@blud.go.id".to_string()),
        })
        .await?;

    tracing::info!("seeded administrator account '{}' (id {})", admin.username, admin.id);
    Ok(())
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "BLUD Budget Administration API",
        "version": version,
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/register, /api/login (public), /api/logout, /api/user",
            "budget_plans": "/api/budget-plans[/:id]",
            "transactions": "/api/transactions[/:id], /api/transactions/recent",
            "documents": "/api/documents[/:id], /api/documents/pending",
            "reports": "/api/reports[/:id]",
            "audit_trails": "/api/audit-trails (administrator)",
            "users": "/api/users (administrator), /api/users/:id",
            "dashboard": "/api/dashboard",
        }
    }))
}

async fn health() -> Json<Value> {
    // Storage is in-memory; if the process answers, it is healthy
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "storage": "ok"
    }))
}
