//! In-memory backend.
//!
//! One table per entity, each a `BTreeMap` keyed by id behind its own
//! `tokio::sync::RwLock`. Ids are sequential per collection starting at 1.
//! Every method completes its critical section without awaiting, so each
//! store call is atomic with respect to the rest of the server.
//!
//! Filtered reads are linear scans in ascending-id order. Fine at this
//! scale; a persistent backend would use indexed queries instead.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    AuditTrail, BudgetPlan, BudgetPlanPatch, Document, DocumentPatch, InsertAuditTrail,
    InsertBudgetPlan, InsertDocument, InsertReport, InsertTransaction, InsertUser, Report,
    Transaction, TransactionPatch, User, UserPatch,
};

use super::{
    AuditTrailStore, BudgetPlanStore, DocumentStore, ReportStore, StoreError, TransactionStore,
    UserStore,
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self { rows: BTreeMap::new(), next_id: 1 }
    }

    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn scan(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| keep(row)).cloned().collect()
    }

    fn update(&mut self, id: i64, mutate: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        mutate(row);
        Some(row.clone())
    }
}

pub struct MemStore {
    users: RwLock<Table<User>>,
    budget_plans: RwLock<Table<BudgetPlan>>,
    transactions: RwLock<Table<Transaction>>,
    documents: RwLock<Table<Document>>,
    reports: RwLock<Table<Report>>,
    audit_trails: RwLock<Table<AuditTrail>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
            budget_plans: RwLock::new(Table::new()),
            transactions: RwLock::new(Table::new()),
            documents: RwLock::new(Table::new()),
            reports: RwLock::new(Table::new()),
            audit_trails: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn create_user(&self, user: InsertUser) -> Result<User, StoreError> {
        let mut table = self.users.write().await;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already taken",
                user.username
            )));
        }
        Ok(table.insert_with(|id| User {
            id,
            username: user.username,
            password: user.password,
            name: user.name,
            role: user.role,
            department: user.department,
            email: user.email,
            created_at: Utc::now(),
        }))
    }

    async fn user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.users.read().await;
        Ok(table.rows.values().find(|u| u.username == username).cloned())
    }

    async fn all_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.scan(|_| true))
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut table = self.users.write().await;
        if let Some(username) = patch.username.as_deref() {
            if table.rows.values().any(|u| u.id != id && u.username == username) {
                return Err(StoreError::Conflict(format!(
                    "username '{}' already taken",
                    username
                )));
            }
        }
        Ok(table.update(id, |user| user.apply(patch)))
    }
}

#[async_trait]
impl BudgetPlanStore for MemStore {
    async fn create_budget_plan(&self, plan: InsertBudgetPlan) -> Result<BudgetPlan, StoreError> {
        let now = Utc::now();
        let mut table = self.budget_plans.write().await;
        Ok(table.insert_with(|id| BudgetPlan {
            id,
            title: plan.title,
            fiscal_year: plan.fiscal_year,
            department: plan.department,
            status: plan.status,
            total_amount: plan.total_amount,
            submitted_by: plan.submitted_by,
            approved_by: plan.approved_by,
            created_at: now,
            updated_at: now,
            details: plan.details,
            notes: plan.notes,
        }))
    }

    async fn budget_plan(&self, id: i64) -> Result<Option<BudgetPlan>, StoreError> {
        Ok(self.budget_plans.read().await.get(id))
    }

    async fn budget_plans_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<BudgetPlan>, StoreError> {
        Ok(self.budget_plans.read().await.scan(|p| p.department == department))
    }

    async fn budget_plans_by_fiscal_year(&self, year: i32) -> Result<Vec<BudgetPlan>, StoreError> {
        Ok(self.budget_plans.read().await.scan(|p| p.fiscal_year == year))
    }

    async fn update_budget_plan(
        &self,
        id: i64,
        patch: BudgetPlanPatch,
    ) -> Result<Option<BudgetPlan>, StoreError> {
        let mut table = self.budget_plans.write().await;
        Ok(table.update(id, |plan| {
            plan.apply(patch);
            plan.updated_at = Utc::now();
        }))
    }
}

#[async_trait]
impl TransactionStore for MemStore {
    async fn create_transaction(
        &self,
        transaction: InsertTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut table = self.transactions.write().await;
        Ok(table.insert_with(|id| Transaction {
            id,
            kind: transaction.kind,
            category: transaction.category,
            amount: transaction.amount,
            description: transaction.description,
            department: transaction.department,
            budget_plan_id: transaction.budget_plan_id,
            status: transaction.status,
            submitted_by: transaction.submitted_by,
            approved_by: transaction.approved_by,
            transaction_date: transaction.transaction_date,
            created_at: Utc::now(),
            document_ids: transaction.document_ids,
        }))
    }

    async fn transaction(&self, id: i64) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.read().await.get(id))
    }

    async fn transactions_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.transactions.read().await.scan(|t| t.department == department))
    }

    async fn transactions_by_budget_plan(
        &self,
        budget_plan_id: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.transactions.read().await.scan(|t| t.budget_plan_id == budget_plan_id))
    }

    async fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, StoreError> {
        let mut rows = self.transactions.read().await.scan(|_| true);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn update_transaction(
        &self,
        id: i64,
        patch: TransactionPatch,
    ) -> Result<Option<Transaction>, StoreError> {
        let mut table = self.transactions.write().await;
        // Transactions carry no updatedAt to refresh
        Ok(table.update(id, |transaction| transaction.apply(patch)))
    }
}

#[async_trait]
impl DocumentStore for MemStore {
    async fn create_document(&self, document: InsertDocument) -> Result<Document, StoreError> {
        let now = Utc::now();
        let mut table = self.documents.write().await;
        Ok(table.insert_with(|id| Document {
            id,
            title: document.title,
            kind: document.kind,
            department: document.department,
            status: document.status,
            content: document.content,
            file_url: document.file_url,
            submitted_by: document.submitted_by,
            approved_by: document.approved_by,
            submission_date: document.submission_date,
            approval_date: document.approval_date,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn document(&self, id: i64) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(id))
    }

    async fn documents_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.read().await.scan(|d| d.department == department))
    }

    async fn documents_by_status(&self, status: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.read().await.scan(|d| d.status == status))
    }

    async fn pending_documents(&self, limit: usize) -> Result<Vec<Document>, StoreError> {
        let mut rows = self.documents.read().await.scan(|d| d.status == "submitted");
        rows.sort_by(|a, b| {
            let a_date = a.submission_date.unwrap_or(a.created_at);
            let b_date = b.submission_date.unwrap_or(b.created_at);
            b_date.cmp(&a_date).then(b.id.cmp(&a.id))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn update_document(
        &self,
        id: i64,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, StoreError> {
        let mut table = self.documents.write().await;
        Ok(table.update(id, |document| {
            document.apply(patch);
            document.updated_at = Utc::now();
        }))
    }
}

#[async_trait]
impl ReportStore for MemStore {
    async fn create_report(&self, report: InsertReport) -> Result<Report, StoreError> {
        let now = Utc::now();
        let mut table = self.reports.write().await;
        Ok(table.insert_with(|id| Report {
            id,
            title: report.title,
            kind: report.kind,
            period: report.period,
            period_value: report.period_value,
            department: report.department,
            content: report.content,
            file_url: report.file_url,
            generated_by: report.generated_by,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn report(&self, id: i64) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.read().await.get(id))
    }

    async fn reports_by_department(&self, department: &str) -> Result<Vec<Report>, StoreError> {
        Ok(self.reports.read().await.scan(|r| r.department == department))
    }

    async fn reports_by_type(&self, kind: &str) -> Result<Vec<Report>, StoreError> {
        Ok(self.reports.read().await.scan(|r| r.kind == kind))
    }
}

#[async_trait]
impl AuditTrailStore for MemStore {
    async fn create_audit_trail(&self, audit: InsertAuditTrail) -> Result<AuditTrail, StoreError> {
        let mut table = self.audit_trails.write().await;
        Ok(table.insert_with(|id| AuditTrail {
            id,
            user_id: audit.user_id,
            action: audit.action,
            entity_type: audit.entity_type,
            entity_id: audit.entity_id,
            details: audit.details,
            ip_address: audit.ip_address,
            timestamp: Utc::now(),
        }))
    }

    async fn audit_trail(&self, id: i64) -> Result<Option<AuditTrail>, StoreError> {
        Ok(self.audit_trails.read().await.get(id))
    }

    async fn audit_trails_by_user(&self, user_id: i64) -> Result<Vec<AuditTrail>, StoreError> {
        Ok(self.audit_trails.read().await.scan(|a| a.user_id == user_id))
    }

    async fn audit_trails_by_entity(
        &self,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<Vec<AuditTrail>, StoreError> {
        let table = self.audit_trails.read().await;
        Ok(table.scan(|a| a.entity_type == entity_type && a.entity_id == entity_id))
    }
}
