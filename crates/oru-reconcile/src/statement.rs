use crate::{AccountRecord, DesiredState, Lifecycle, LockState};

/// `CREATE USER` with clauses appended in fixed order: IDENTIFIED BY VALUES,
/// DEFAULT TABLESPACE, TEMPORARY TABLESPACE, ACCOUNT {LOCK|UNLOCK}.
/// The IDENTIFIED BY VALUES clause is emitted only when a hash is managed.
pub fn create_user_sql(desired: &DesiredState) -> String {
    let mut sql = format!("CREATE USER {}", desired.name);
    if let Some(hash) = &desired.password_hash {
        sql.push_str(&format!(" IDENTIFIED BY VALUES '{hash}'"));
    }
    if let Some(ts) = &desired.default_tablespace {
        sql.push_str(&format!(" DEFAULT TABLESPACE {ts}"));
    }
    if let Some(ts) = &desired.temporary_tablespace {
        sql.push_str(&format!(" TEMPORARY TABLESPACE {ts}"));
    }
    sql.push_str(&format!(" ACCOUNT {}", desired.lifecycle.wants_lock().as_sql()));
    sql
}

/// Cascading drop: removes the account together with all owned objects.
pub fn drop_user_sql(name: &str) -> String {
    format!("DROP USER \"{name}\" CASCADE")
}

pub fn alter_password_sql(name: &str, hash: &str) -> String {
    format!("ALTER USER {name} IDENTIFIED BY VALUES '{hash}'")
}

pub fn alter_default_tablespace_sql(name: &str, tablespace: &str) -> String {
    format!("ALTER USER {name} DEFAULT TABLESPACE {tablespace}")
}

pub fn alter_temporary_tablespace_sql(name: &str, tablespace: &str) -> String {
    format!("ALTER USER {name} TEMPORARY TABLESPACE {tablespace}")
}

pub fn alter_account_sql(name: &str, lock: LockState) -> String {
    format!("ALTER USER {name} ACCOUNT {}", lock.as_sql())
}

/// The decision core: map (desired, observed) to at most one statement.
///
/// State machine over existence x desired lifecycle:
/// - missing + absent            => no-op
/// - missing + anything else     => CREATE (lock clause from lifecycle)
/// - found + absent              => DROP CASCADE
/// - found + lock-state mismatch => ALTER ACCOUNT {LOCK|UNLOCK} only
/// - found + lock-state matches  => first field diff wins:
///   password, then default tablespace, then temporary tablespace.
///
/// Each ALTER carries exactly one clause. Diffs left unapplied this pass
/// converge on subsequent passes.
pub fn decide(desired: &DesiredState, current: Option<&AccountRecord>) -> Option<String> {
    let current = match current {
        None => {
            return match desired.lifecycle {
                Lifecycle::Absent => None,
                _ => Some(create_user_sql(desired)),
            };
        }
        Some(rec) => rec,
    };

    if desired.lifecycle == Lifecycle::Absent {
        return Some(drop_user_sql(&desired.name));
    }

    let want = desired.lifecycle.wants_lock();
    if current.lock_state() != want {
        return Some(alter_account_sql(&desired.name, want));
    }

    if let Some(hash) = &desired.password_hash {
        if *hash != current.password_hash {
            return Some(alter_password_sql(&desired.name, hash));
        }
    }
    if let Some(ts) = &desired.default_tablespace {
        if Some(ts) != current.default_tablespace.as_ref() {
            return Some(alter_default_tablespace_sql(&desired.name, ts));
        }
    }
    if let Some(ts) = &desired.temporary_tablespace {
        if Some(ts) != current.temporary_tablespace.as_ref() {
            return Some(alter_temporary_tablespace_sql(&desired.name, ts));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_without_hash_omits_identified_by_clause() {
        let d = DesiredState::new("APP_USER", Lifecycle::Present);
        assert_eq!(create_user_sql(&d), "CREATE USER APP_USER ACCOUNT UNLOCK");
    }

    #[test]
    fn create_for_locked_lifecycle_appends_account_lock() {
        let mut d = DesiredState::new("APP_USER", Lifecycle::Locked);
        d.password_hash = Some("6D0F7C1657D2C7D3".to_string());
        assert_eq!(
            create_user_sql(&d),
            "CREATE USER APP_USER IDENTIFIED BY VALUES '6D0F7C1657D2C7D3' ACCOUNT LOCK"
        );
    }

    #[test]
    fn alter_statements_carry_exactly_one_clause() {
        assert_eq!(
            alter_password_sql("APP_USER", "ABCD"),
            "ALTER USER APP_USER IDENTIFIED BY VALUES 'ABCD'"
        );
        assert_eq!(
            alter_default_tablespace_sql("APP_USER", "USERS"),
            "ALTER USER APP_USER DEFAULT TABLESPACE USERS"
        );
        assert_eq!(
            alter_temporary_tablespace_sql("APP_USER", "TEMP"),
            "ALTER USER APP_USER TEMPORARY TABLESPACE TEMP"
        );
        assert_eq!(
            alter_account_sql("APP_USER", LockState::Lock),
            "ALTER USER APP_USER ACCOUNT LOCK"
        );
        assert_eq!(
            alter_account_sql("APP_USER", LockState::Unlock),
            "ALTER USER APP_USER ACCOUNT UNLOCK"
        );
    }

    #[test]
    fn unmanaged_fields_never_produce_a_diff() {
        // Desired manages nothing beyond existence; stored values differ
        // from anything imaginable and must still be left alone.
        let mut rec = AccountRecord::new("APP_USER", "OLDHASH", "OPEN");
        rec.default_tablespace = Some("USERS".to_string());
        rec.temporary_tablespace = Some("TEMP".to_string());

        let d = DesiredState::new("APP_USER", Lifecycle::Present);
        assert_eq!(decide(&d, Some(&rec)), None);
    }
}
