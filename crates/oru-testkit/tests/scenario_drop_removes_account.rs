use oru_reconcile::{reconcile, AccountRecord, DesiredState, Lifecycle};
use oru_testkit::MemoryAccountStore;

#[test]
fn scenario_drop_executes_cascade_and_final_record_is_absent() {
    let mut store = MemoryAccountStore::with_account(AccountRecord::new(
        "APP_USER", "HASH", "OPEN",
    ));

    let desired = DesiredState::new("app_user", Lifecycle::Absent);
    let report = reconcile(&mut store, &desired).unwrap();

    assert!(report.changed);
    assert_eq!(report.user, None);
    assert_eq!(store.executed(), ["DROP USER \"APP_USER\" CASCADE"]);

    // Second pass: nothing left to do.
    let again = reconcile(&mut store, &desired).unwrap();
    assert!(!again.changed);
    assert_eq!(again.user, None);
    assert_eq!(store.executed().len(), 1);
}
