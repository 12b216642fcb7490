//! Dashboard aggregate: static budget overview figures plus live recent
//! transactions and pending documents.
//!
//! The overview, distribution and monthly realization blocks are the fixed
//! presentation values the original system served; only the two entity
//! lists reflect actual store contents.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::store::{DocumentStore, TransactionStore};

/// GET /api/dashboard
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let recent_transactions = state.store.recent_transactions(4).await?;
    let pending_documents = state.store.pending_documents(4).await?;

    Ok(Json(json!({
        "budgetOverview": {
            "totalBudget": 12_500_000_000i64,
            "realization": 7_800_000_000i64,
            "remaining": 4_700_000_000i64,
            "documentCount": 143
        },
        "budgetDistribution": [
            { "name": "Program Kesehatan", "percentage": 45 },
            { "name": "Pendidikan", "percentage": 25 },
            { "name": "Administrasi", "percentage": 20 },
            { "name": "Lainnya", "percentage": 10 }
        ],
        "monthlyRealization": [
            { "month": "Jan", "amount": 700_000_000i64 },
            { "month": "Feb", "amount": 950_000_000i64 },
            { "month": "Mar", "amount": 1_200_000_000i64 },
            { "month": "Apr", "amount": 1_000_000_000i64 },
            { "month": "May", "amount": 1_350_000_000i64 },
            { "month": "Jun", "amount": 1_500_000_000i64 },
            { "month": "Jul", "amount": 1_400_000_000i64 },
            { "month": "Aug", "amount": 1_800_000_000i64 },
            { "month": "Sep", "amount": 1_350_000_000i64 },
            { "month": "Oct", "amount": 0 },
            { "month": "Nov", "amount": 0 },
            { "month": "Dec", "amount": 0 }
        ],
        "recentTransactions": recent_transactions,
        "pendingDocuments": pending_documents
    })))
}
