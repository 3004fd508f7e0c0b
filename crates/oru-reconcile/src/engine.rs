use crate::{statement, AccountRecord, DesiredState, ReconcileReport};

/// Seam between the decision core and the database. Production wiring is
/// the Oracle-backed store in oru-db; tests use the in-memory store from
/// oru-testkit.
pub trait AccountStore {
    type Error;

    /// Single read-only catalog lookup. `Ok(None)` means the account does
    /// not exist; `Err` aborts the pass (no statement is ever built from
    /// unreliable state).
    fn fetch_account(&mut self, name: &str) -> Result<Option<AccountRecord>, Self::Error>;

    /// Execute one DDL statement. No result rows expected.
    fn execute(&mut self, sql: &str) -> Result<(), Self::Error>;
}

/// Pass failure. Statement failures carry the statement text so the caller
/// sees both the SQL and the driver message verbatim. No retries anywhere.
#[derive(Debug)]
pub enum ReconcileError<E> {
    Lookup { source: E },
    Statement { sql: String, source: E },
}

impl<E: std::fmt::Display> std::fmt::Display for ReconcileError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileError::Lookup { source } => {
                write!(f, "account lookup failed: {source}")
            }
            ReconcileError::Statement { sql, source } => {
                write!(f, "{sql}: {source}")
            }
        }
    }
}

impl<E> std::error::Error for ReconcileError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconcileError::Lookup { source } => Some(source),
            ReconcileError::Statement { source, .. } => Some(source),
        }
    }
}

/// One reconciliation pass: read, decide, execute at most one statement,
/// re-read, report.
///
/// `changed` is true iff a statement was built and executed successfully.
/// A statement failure aborts before the confirmation read: state is
/// indeterminate at that point and a possibly-stale record must not be
/// reported.
pub fn reconcile<S: AccountStore>(
    store: &mut S,
    desired: &DesiredState,
) -> Result<ReconcileReport, ReconcileError<S::Error>> {
    let current = store
        .fetch_account(&desired.name)
        .map_err(|source| ReconcileError::Lookup { source })?;

    let mut changed = false;
    if let Some(sql) = statement::decide(desired, current.as_ref()) {
        store
            .execute(&sql)
            .map_err(|source| ReconcileError::Statement { sql, source })?;
        changed = true;
    }

    let user = store
        .fetch_account(&desired.name)
        .map_err(|source| ReconcileError::Lookup { source })?;

    Ok(ReconcileReport { changed, user })
}

/// Dry-run: read and decide, mutate nothing. Returns the statement a
/// reconcile pass would execute right now, if any.
pub fn plan<S: AccountStore>(
    store: &mut S,
    desired: &DesiredState,
) -> Result<Option<String>, ReconcileError<S::Error>> {
    let current = store
        .fetch_account(&desired.name)
        .map_err(|source| ReconcileError::Lookup { source })?;

    Ok(statement::decide(desired, current.as_ref()))
}
