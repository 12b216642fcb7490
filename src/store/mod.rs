//! Storage abstraction.
//!
//! One repository trait per entity, combined into the [`Storage`] supertrait
//! that handlers hold as `Arc<dyn Storage>`. The in-memory backend in
//! [`memory`] is the only implementation today; a persistent one can be
//! swapped in without touching the handlers.
//!
//! Absence is `Ok(None)`, never an error. No entity supports deletion.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AuditTrail, BudgetPlan, BudgetPlanPatch, Document, DocumentPatch, InsertAuditTrail,
    InsertBudgetPlan, InsertDocument, InsertReport, InsertTransaction, InsertUser, Report,
    Transaction, TransactionPatch, User, UserPatch,
};

pub use memory::MemStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated. Raised under the write lock,
    /// so a pre-check in the handler cannot race past it.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Backend failure (I/O, connection loss). The in-memory store never
    /// raises this; it exists for substituted persistent backends.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait UserStore {
    async fn create_user(&self, user: InsertUser) -> Result<User, StoreError>;
    async fn user(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn all_users(&self) -> Result<Vec<User>, StoreError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait BudgetPlanStore {
    async fn create_budget_plan(&self, plan: InsertBudgetPlan) -> Result<BudgetPlan, StoreError>;
    async fn budget_plan(&self, id: i64) -> Result<Option<BudgetPlan>, StoreError>;
    async fn budget_plans_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<BudgetPlan>, StoreError>;
    async fn budget_plans_by_fiscal_year(&self, year: i32) -> Result<Vec<BudgetPlan>, StoreError>;
    async fn update_budget_plan(
        &self,
        id: i64,
        patch: BudgetPlanPatch,
    ) -> Result<Option<BudgetPlan>, StoreError>;
}

#[async_trait]
pub trait TransactionStore {
    async fn create_transaction(
        &self,
        transaction: InsertTransaction,
    ) -> Result<Transaction, StoreError>;
    async fn transaction(&self, id: i64) -> Result<Option<Transaction>, StoreError>;
    async fn transactions_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Transaction>, StoreError>;
    async fn transactions_by_budget_plan(
        &self,
        budget_plan_id: i64,
    ) -> Result<Vec<Transaction>, StoreError>;
    async fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, StoreError>;
    async fn update_transaction(
        &self,
        id: i64,
        patch: TransactionPatch,
    ) -> Result<Option<Transaction>, StoreError>;
}

#[async_trait]
pub trait DocumentStore {
    async fn create_document(&self, document: InsertDocument) -> Result<Document, StoreError>;
    async fn document(&self, id: i64) -> Result<Option<Document>, StoreError>;
    async fn documents_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Document>, StoreError>;
    async fn documents_by_status(&self, status: &str) -> Result<Vec<Document>, StoreError>;
    async fn pending_documents(&self, limit: usize) -> Result<Vec<Document>, StoreError>;
    async fn update_document(
        &self,
        id: i64,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, StoreError>;
}

#[async_trait]
pub trait ReportStore {
    async fn create_report(&self, report: InsertReport) -> Result<Report, StoreError>;
    async fn report(&self, id: i64) -> Result<Option<Report>, StoreError>;
    async fn reports_by_department(&self, department: &str) -> Result<Vec<Report>, StoreError>;
    async fn reports_by_type(&self, kind: &str) -> Result<Vec<Report>, StoreError>;
}

#[async_trait]
pub trait AuditTrailStore {
    async fn create_audit_trail(&self, audit: InsertAuditTrail) -> Result<AuditTrail, StoreError>;
    async fn audit_trail(&self, id: i64) -> Result<Option<AuditTrail>, StoreError>;
    async fn audit_trails_by_user(&self, user_id: i64) -> Result<Vec<AuditTrail>, StoreError>;
    async fn audit_trails_by_entity(
        &self,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<Vec<AuditTrail>, StoreError>;
}

/// Everything the handlers need from a backend, behind one object-safe trait.
pub trait Storage:
    UserStore
    + BudgetPlanStore
    + TransactionStore
    + DocumentStore
    + ReportStore
    + AuditTrailStore
    + Send
    + Sync
{
}

impl<T> Storage for T where
    T: UserStore
        + BudgetPlanStore
        + TransactionStore
        + DocumentStore
        + ReportStore
        + AuditTrailStore
        + Send
        + Sync
{
}
