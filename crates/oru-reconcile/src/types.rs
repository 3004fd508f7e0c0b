use serde::{Deserialize, Serialize};

/// Desired account lifecycle, as declared by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Present,
    Absent,
    Locked,
    Unlocked,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Present => "present",
            Lifecycle::Absent => "absent",
            Lifecycle::Locked => "locked",
            Lifecycle::Unlocked => "unlocked",
        }
    }

    /// Lock state a non-absent lifecycle asks for. `Absent` never reaches
    /// this mapping (drop is decided before lock state is consulted).
    pub fn wants_lock(&self) -> LockState {
        match self {
            Lifecycle::Present | Lifecycle::Unlocked => LockState::Unlock,
            _ => LockState::Lock,
        }
    }
}

/// Binary lock concept. Oracle reports finer-grained statuses (EXPIRED,
/// EXPIRED & LOCKED, ...); this tool deliberately collapses everything that
/// is not OPEN into `Lock`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockState {
    Lock,
    Unlock,
}

impl LockState {
    /// Keyword used in the `ACCOUNT {LOCK|UNLOCK}` clause.
    pub fn as_sql(&self) -> &'static str {
        match self {
            LockState::Lock => "LOCK",
            LockState::Unlock => "UNLOCK",
        }
    }
}

/// Account row as observed in the database (DBA_USERS joined with
/// SYS.USER$). Read fresh at the start and end of every pass; never cached
/// between invocations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Upper-case account name (Oracle identifiers are stored upper-case).
    pub name: String,

    /// Opaque verifier hash as stored in SYS.USER$.PASSWORD. Compared for
    /// identity only; never derived or validated here.
    #[serde(rename = "password")]
    pub password_hash: String,

    pub default_tablespace: Option<String>,
    pub temporary_tablespace: Option<String>,

    /// Raw DBA_USERS.ACCOUNT_STATUS string ("OPEN", "LOCKED", ...).
    pub account_status: String,
}

impl AccountRecord {
    pub fn new(
        name: impl Into<String>,
        password_hash: impl Into<String>,
        account_status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            password_hash: password_hash.into(),
            default_tablespace: None,
            temporary_tablespace: None,
            account_status: account_status.into(),
        }
    }

    /// Collapse the reported status into the binary lock concept.
    pub fn lock_state(&self) -> LockState {
        if self.account_status == "OPEN" {
            LockState::Unlock
        } else {
            LockState::Lock
        }
    }
}

/// Declared desired state for one account. `None` fields are unmanaged:
/// the pass never diffs or touches them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesiredState {
    /// Upper-cased by [`DesiredState::new`]; lookup and statement emission
    /// both use this normalized form.
    pub name: String,

    /// Verbatim verifier hash to enforce; `None` means "don't manage the
    /// password".
    pub password_hash: Option<String>,

    pub lifecycle: Lifecycle,
    pub default_tablespace: Option<String>,
    pub temporary_tablespace: Option<String>,
}

impl DesiredState {
    pub fn new(name: impl Into<String>, lifecycle: Lifecycle) -> Self {
        Self {
            name: name.into().to_uppercase(),
            password_hash: None,
            lifecycle,
            default_tablespace: None,
            temporary_tablespace: None,
        }
    }
}

/// Boundary report: did this pass mutate anything, and what does the
/// account look like now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub changed: bool,
    pub user: Option<AccountRecord>,
}
