mod common;

use std::fs;

use common::TestHome;
use expense_tracker::{core::LoadStatus, errors::StoreError, ledger::Expense};

#[test]
fn fresh_directory_starts_empty() {
    let home = TestHome::new();
    let report = home.open_store();
    assert!(matches!(report.status, LoadStatus::Fresh));
    assert!(report.store.list().is_none());
    assert!(!home.data_file().exists(), "opening alone must not write");
}

#[test]
fn saved_sequence_reloads_in_a_new_store() {
    let home = TestHome::new();
    {
        let mut store = home.open_store().store;
        store.add("Coffee", 4.50, "Food").expect("add coffee");
        store.add("Bus", 2.00, "Transport").expect("add bus");
        store.add("Lunch", 12.00, "Food").expect("add lunch");
        store.delete(2).expect("delete bus");
    }

    let report = home.open_store();
    assert!(matches!(report.status, LoadStatus::Loaded { count: 2 }));
    assert_eq!(
        report.store.expenses(),
        &[
            Expense::new("Coffee", 4.50, "Food"),
            Expense::new("Lunch", 12.00, "Food"),
        ]
    );
}

#[test]
fn deleting_everything_persists_an_empty_list() {
    let home = TestHome::new();
    {
        let mut store = home.open_store().store;
        store.add("Coffee", 4.50, "Food").expect("add");
        store.delete(1).expect("delete");
        assert!(matches!(
            store.delete(1),
            Err(StoreError::InvalidIndex { position: 1, len: 0 })
        ));
    }
    let report = home.open_store();
    assert!(matches!(report.status, LoadStatus::Loaded { count: 0 }));
    assert!(report.store.list().is_none());
}

#[test]
fn corrupt_file_is_preserved_and_store_starts_empty() {
    let home = TestHome::new();
    fs::write(home.data_file(), "\u{0}\u{1}garbage").expect("write corrupt file");

    let report = home.open_store();
    let quarantined = match report.status {
        LoadStatus::Recovered {
            error: StoreError::Load(_),
            quarantined: Some(path),
        } => path,
        other => panic!("unexpected status {other:?}"),
    };
    assert!(report.store.is_empty());
    assert_eq!(
        fs::read_to_string(&quarantined).expect("read quarantined file"),
        "\u{0}\u{1}garbage"
    );

    let mut store = report.store;
    store.add("Tea", 3.0, "Food").expect("add after recovery");
    assert!(quarantined.exists(), "saving must not touch the preserved copy");
}

#[test]
fn save_failure_keeps_memory_and_next_save_catches_up() {
    let home = TestHome::new();
    let mut store = home.open_store().store;
    store.add("Coffee", 4.50, "Food").expect("first add");

    // A directory where the staging file goes makes the write fail.
    let tmp = home.path().join("expenses.json.tmp");
    fs::create_dir_all(&tmp).expect("block tmp path");

    let err = store.add("Bus", 2.0, "Transport").expect_err("save must fail");
    assert!(err.is_save_failure());
    assert_eq!(store.len(), 2);

    let on_disk = home.open_store().store;
    assert_eq!(on_disk.len(), 1, "disk keeps the last good save");

    fs::remove_dir_all(&tmp).expect("unblock tmp path");
    store.add("Lunch", 12.0, "Food").expect("save succeeds again");
    assert_eq!(home.open_store().store.len(), 3);
}
