//! oru-testkit
//!
//! Deterministic in-memory [`AccountStore`] for scenario tests. It
//! interprets exactly the DDL grammar the statement builder emits, so
//! multi-pass convergence is observable without a database. No randomness,
//! no network I/O.

use std::collections::BTreeMap;

use oru_reconcile::{AccountRecord, AccountStore};

/// Failure injected or raised by the memory store. Message text stands in
/// for a driver error message in assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreFailure {
    pub message: String,
}

impl StoreFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreFailure {}

/// In-memory account catalog keyed by upper-case name. Records every
/// executed statement and counts reads so scenarios can assert interaction
/// shape (e.g. no confirmation read after a failed statement).
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: BTreeMap<String, AccountRecord>,
    executed: Vec<String>,
    fetches: usize,
    fail_next_execute: Option<String>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(record: AccountRecord) -> Self {
        let mut store = Self::new();
        store.seed(record);
        store
    }

    /// Insert a record directly, bypassing statement interpretation.
    pub fn seed(&mut self, record: AccountRecord) {
        self.accounts.insert(record.name.clone(), record);
    }

    /// Every statement passed to `execute`, in order, including failed ones.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Arrange for the next `execute` call to fail with `message`.
    pub fn fail_next_execute(&mut self, message: impl Into<String>) {
        self.fail_next_execute = Some(message.into());
    }

    pub fn account(&self, name: &str) -> Option<&AccountRecord> {
        self.accounts.get(&name.to_uppercase())
    }

    fn apply(&mut self, sql: &str) -> Result<(), StoreFailure> {
        if let Some(rest) = sql.strip_prefix("CREATE USER ") {
            return self.apply_create(sql, rest);
        }
        if sql.starts_with("DROP USER ") {
            return self.apply_drop(sql);
        }
        if let Some(rest) = sql.strip_prefix("ALTER USER ") {
            return self.apply_alter(sql, rest);
        }
        Err(StoreFailure::new(format!("unsupported statement: {sql}")))
    }

    fn apply_create(&mut self, sql: &str, rest: &str) -> Result<(), StoreFailure> {
        let name = first_word(rest)
            .ok_or_else(|| StoreFailure::new(format!("malformed CREATE USER: {sql}")))?;
        if self.accounts.contains_key(&name) {
            // ORA-01920 equivalent.
            return Err(StoreFailure::new(format!("user name '{name}' conflicts")));
        }

        let status = if sql.contains(" ACCOUNT LOCK") {
            "LOCKED"
        } else {
            "OPEN"
        };
        let mut record = AccountRecord::new(
            name.clone(),
            quoted_after(sql, "IDENTIFIED BY VALUES ").unwrap_or_default(),
            status,
        );
        record.default_tablespace = word_after(sql, "DEFAULT TABLESPACE ");
        record.temporary_tablespace = word_after(sql, "TEMPORARY TABLESPACE ");

        self.accounts.insert(name, record);
        Ok(())
    }

    fn apply_drop(&mut self, sql: &str) -> Result<(), StoreFailure> {
        let name = word_after(sql, "DROP USER ")
            .map(|w| w.trim_matches('"').to_string())
            .ok_or_else(|| StoreFailure::new(format!("malformed DROP USER: {sql}")))?;
        if self.accounts.remove(&name).is_none() {
            // ORA-01918 equivalent.
            return Err(StoreFailure::new(format!("user '{name}' does not exist")));
        }
        Ok(())
    }

    fn apply_alter(&mut self, sql: &str, rest: &str) -> Result<(), StoreFailure> {
        let name = first_word(rest)
            .ok_or_else(|| StoreFailure::new(format!("malformed ALTER USER: {sql}")))?;
        let record = self
            .accounts
            .get_mut(&name)
            .ok_or_else(|| StoreFailure::new(format!("user '{name}' does not exist")))?;

        if let Some(hash) = quoted_after(sql, "IDENTIFIED BY VALUES ") {
            record.password_hash = hash;
        } else if let Some(ts) = word_after(sql, "DEFAULT TABLESPACE ") {
            record.default_tablespace = Some(ts);
        } else if let Some(ts) = word_after(sql, "TEMPORARY TABLESPACE ") {
            record.temporary_tablespace = Some(ts);
        } else if sql.ends_with(" ACCOUNT LOCK") {
            record.account_status = "LOCKED".to_string();
        } else if sql.ends_with(" ACCOUNT UNLOCK") {
            record.account_status = "OPEN".to_string();
        } else {
            return Err(StoreFailure::new(format!("unsupported ALTER clause: {sql}")));
        }
        Ok(())
    }
}

impl AccountStore for MemoryAccountStore {
    type Error = StoreFailure;

    fn fetch_account(&mut self, name: &str) -> Result<Option<AccountRecord>, StoreFailure> {
        self.fetches += 1;
        Ok(self.accounts.get(&name.to_uppercase()).cloned())
    }

    fn execute(&mut self, sql: &str) -> Result<(), StoreFailure> {
        self.executed.push(sql.to_string());
        if let Some(message) = self.fail_next_execute.take() {
            return Err(StoreFailure::new(message));
        }
        self.apply(sql)
    }
}

fn first_word(s: &str) -> Option<String> {
    s.split_whitespace().next().map(|w| w.to_string())
}

fn word_after(sql: &str, key: &str) -> Option<String> {
    let idx = sql.find(key)?;
    first_word(&sql[idx + key.len()..])
}

fn quoted_after(sql: &str, key: &str) -> Option<String> {
    let idx = sql.find(key)?;
    let rest = sql[idx + key.len()..].strip_prefix('\'')?;
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}
