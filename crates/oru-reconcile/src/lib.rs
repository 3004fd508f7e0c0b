//! oru-reconcile
//!
//! Reconciliation decision core for Oracle user accounts.
//!
//! Architectural decisions:
//! - Desired state vs. observed record comparison is pure and deterministic
//! - At most one mutating statement per pass; remaining diffs converge on
//!   subsequent passes
//! - Lock-state mismatch outranks field diffs; field diff precedence is
//!   password > default tablespace > temporary tablespace
//! - Password hashes are applied verbatim, never computed here
//!
//! No IO. The database seam is the [`AccountStore`] trait; production wiring
//! lives in oru-db.

mod engine;
mod statement;
mod types;

pub use engine::{plan, reconcile, AccountStore, ReconcileError};
pub use statement::{
    alter_account_sql, alter_default_tablespace_sql, alter_password_sql,
    alter_temporary_tablespace_sql, create_user_sql, decide, drop_user_sql,
};
pub use types::*;
