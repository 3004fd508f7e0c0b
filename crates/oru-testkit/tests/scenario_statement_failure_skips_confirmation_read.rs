use oru_reconcile::{reconcile, DesiredState, Lifecycle, ReconcileError};
use oru_testkit::MemoryAccountStore;

#[test]
fn scenario_failed_statement_aborts_before_confirmation_read() {
    let mut store = MemoryAccountStore::new();
    store.fail_next_execute("ORA-00959: tablespace 'USERS2' does not exist");

    let mut desired = DesiredState::new("APP_USER", Lifecycle::Present);
    desired.default_tablespace = Some("USERS2".to_string());

    let err = reconcile(&mut store, &desired).unwrap_err();

    // Statement text and driver message both surface verbatim.
    match &err {
        ReconcileError::Statement { sql, source } => {
            assert!(sql.starts_with("CREATE USER APP_USER"), "got: {sql}");
            assert!(source.message.contains("ORA-00959"));
        }
        other => panic!("expected statement error, got {other:?}"),
    }
    let rendered = err.to_string();
    assert!(rendered.contains("CREATE USER APP_USER"));
    assert!(rendered.contains("ORA-00959"));

    // Only the initial read happened: state is indeterminate after a failed
    // statement, so no confirmation read is attempted.
    assert_eq!(store.fetch_count(), 1);
}
