pub mod audit_trail;
pub mod budget_plan;
pub mod document;
pub mod report;
pub mod role;
pub mod transaction;
pub mod user;

pub use audit_trail::{AuditTrail, InsertAuditTrail};
pub use budget_plan::{BudgetPlan, BudgetPlanPatch, InsertBudgetPlan};
pub use document::{Document, DocumentPatch, InsertDocument};
pub use report::{InsertReport, Report};
pub use role::{Capability, Role};
pub use transaction::{InsertTransaction, Transaction, TransactionPatch};
pub use user::{InsertUser, User, UserPatch};
