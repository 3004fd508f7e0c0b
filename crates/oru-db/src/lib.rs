//! oru-db
//!
//! Oracle-backed [`AccountStore`]: one blocking connection per invocation,
//! the catalog lookup joining DBA_USERS with SYS.USER$, and statement
//! execution. Driver errors propagate verbatim; classification into the
//! lookup/statement taxonomy happens in the engine.

use oru_config::ConnectSettings;
use oru_reconcile::{AccountRecord, AccountStore};
use tracing::{debug, info};

/// Lookup joining the account catalog with the credential-verifier catalog.
/// SYS.USER$ is the only place the stored verifier hash is visible, so the
/// connect user needs SELECT on it (typically SYSTEM or a DBA role).
pub const ACCOUNT_LOOKUP_SQL: &str = "select u.default_tablespace, u.temporary_tablespace, \
     s.password, u.account_status \
     from dba_users u join sys.user$ s on (s.name = u.username) \
     where s.name = :name";

/// Connect-time failure taxonomy. Everything after connect is an
/// [`oracle::Error`] wrapped by the engine.
#[derive(Debug)]
pub enum ConnectError {
    /// The Oracle client library (ODPI-C loads it lazily) is not installed
    /// or not on the loader path. Reported before any network attempt.
    ClientLibraryMissing { detail: String },
    Connect { source: oracle::Error },
}

impl std::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectError::ClientLibraryMissing { detail } => {
                write!(
                    f,
                    "Oracle client library not available; install the Oracle \
                     Instant Client: {detail}"
                )
            }
            ConnectError::Connect { source } => {
                write!(f, "failed to connect to Oracle: {source}")
            }
        }
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectError::ClientLibraryMissing { .. } => None,
            ConnectError::Connect { source } => Some(source),
        }
    }
}

fn classify_connect_error(err: oracle::Error) -> ConnectError {
    // DPI-1047: cannot locate the Oracle client library. This is the
    // missing-dependency case, distinct from an unreachable listener.
    if let oracle::Error::DpiError(db_err) = &err {
        if db_err.message().contains("DPI-1047") {
            return ConnectError::ClientLibraryMissing {
                detail: db_err.message().to_string(),
            };
        }
    }
    ConnectError::Connect { source: err }
}

/// Open the single connection a pass owns for its full duration.
pub fn connect(settings: &ConnectSettings) -> Result<oracle::Connection, ConnectError> {
    debug!(
        host = %settings.host,
        port = settings.port,
        service = %settings.service,
        username = %settings.username,
        "connecting to Oracle"
    );
    oracle::Connection::connect(&settings.username, &settings.password, settings.dsn())
        .map_err(classify_connect_error)
}

/// Production [`AccountStore`] over one exclusive connection.
pub struct OracleStore {
    conn: oracle::Connection,
}

impl OracleStore {
    pub fn new(conn: oracle::Connection) -> Self {
        Self { conn }
    }

    pub fn connect(settings: &ConnectSettings) -> Result<Self, ConnectError> {
        Ok(Self::new(connect(settings)?))
    }
}

impl AccountStore for OracleStore {
    type Error = oracle::Error;

    fn fetch_account(&mut self, name: &str) -> Result<Option<AccountRecord>, oracle::Error> {
        match self.conn.query_row_named(ACCOUNT_LOOKUP_SQL, &[("name", &name)]) {
            Ok(row) => Ok(Some(record_from_row(name, &row)?)),
            Err(oracle::Error::NoDataFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn execute(&mut self, sql: &str) -> Result<(), oracle::Error> {
        // DDL here (CREATE/ALTER/DROP USER) commits implicitly.
        info!(statement = %redact_statement(sql), "executing");
        self.conn.execute(sql, &[])?;
        Ok(())
    }
}

/// Column order fixed by [`ACCOUNT_LOOKUP_SQL`]. A NULL verifier (schema-only
/// accounts) reads as an empty hash, which simply diffs against any managed
/// value.
fn record_from_row(name: &str, row: &oracle::Row) -> Result<AccountRecord, oracle::Error> {
    Ok(AccountRecord {
        name: name.to_string(),
        default_tablespace: row.get(0)?,
        temporary_tablespace: row.get(1)?,
        password_hash: row.get::<usize, Option<String>>(2)?.unwrap_or_default(),
        account_status: row.get(3)?,
    })
}

/// Statement text safe for logs: the verifier literal is elided.
pub fn redact_statement(sql: &str) -> String {
    const KEY: &str = "IDENTIFIED BY VALUES '";
    match sql.find(KEY) {
        Some(idx) => {
            let literal_start = idx + KEY.len();
            let rest = &sql[literal_start..];
            match rest.find('\'') {
                Some(end) => format!("{}***{}", &sql[..literal_start], &rest[end..]),
                None => format!("{}***'", &sql[..literal_start]),
            }
        }
        None => sql.to_string(),
    }
}
