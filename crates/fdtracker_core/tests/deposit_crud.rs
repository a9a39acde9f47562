use chrono::{NaiveDate, TimeZone, Utc};
use fdtracker_core::db::{open_db, open_db_in_memory};
use fdtracker_core::{
    FixedDeposit, FixedDepositRepository, SqliteFixedDepositStore, UNASSIGNED_DEPOSIT_ID,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn test_deposit(bank: &str, principal: f64, maturity: f64) -> FixedDeposit {
    FixedDeposit {
        id: UNASSIGNED_DEPOSIT_ID,
        bank_name: bank.to_string(),
        principal_amount: principal,
        maturity_amount: maturity,
        tenure_months: 12,
        interest_rate: 8.0,
        start_date: date(2024, 1, 1),
        maturity_date: date(2025, 1, 1),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        notes: Some("Test notes".to_string()),
    }
}

fn open_store() -> SqliteFixedDepositStore {
    SqliteFixedDepositStore::try_new(open_db_in_memory().unwrap()).unwrap()
}

#[test]
fn insert_and_read_back_roundtrip() {
    let store = open_store();

    let deposit = test_deposit("State Bank", 100_000.0, 108_000.0);
    let id = store.add_fixed_deposit(&deposit).unwrap();

    let loaded = store.get_fixed_deposit_by_id(id).get().unwrap();
    let mut expected = deposit;
    expected.id = id;
    assert_eq!(loaded, expected);
}

#[test]
fn get_all_is_empty_without_data() {
    let store = open_store();
    assert!(store.get_all_fixed_deposits().get().is_empty());
}

#[test]
fn get_all_returns_every_inserted_deposit() {
    let store = open_store();
    store
        .add_fixed_deposit(&test_deposit("Bank A", 50_000.0, 54_000.0))
        .unwrap();
    store
        .add_fixed_deposit(&test_deposit("Bank B", 75_000.0, 81_000.0))
        .unwrap();
    store
        .add_fixed_deposit(&test_deposit("Bank C", 100_000.0, 108_000.0))
        .unwrap();

    let deposits = store.get_all_fixed_deposits().get();
    assert_eq!(deposits.len(), 3);
    for bank in ["Bank A", "Bank B", "Bank C"] {
        assert!(deposits.iter().any(|deposit| deposit.bank_name == bank));
    }
}

#[test]
fn get_all_is_ordered_by_id() {
    let store = open_store();
    for bank in ["Bank A", "Bank B", "Bank C"] {
        store
            .add_fixed_deposit(&test_deposit(bank, 10_000.0, 11_000.0))
            .unwrap();
    }

    let deposits = store.get_all_fixed_deposits().get();
    let ids: Vec<_> = deposits.iter().map(|deposit| deposit.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn insert_assigns_fresh_id_ignoring_caller_value() {
    let store = open_store();

    let mut deposit = test_deposit("Bank A", 50_000.0, 54_000.0);
    deposit.id = 999;
    let id = store.add_fixed_deposit(&deposit).unwrap();

    assert_ne!(id, 999);
    assert!(store.get_fixed_deposit_by_id(999).get().is_none());
    assert_eq!(store.get_all_fixed_deposits().get().len(), 1);
}

#[test]
fn distinct_inserts_never_share_an_id() {
    let store = open_store();
    let deposit = test_deposit("Same Bank", 50_000.0, 54_000.0);

    let first = store.add_fixed_deposit(&deposit).unwrap();
    let second = store.add_fixed_deposit(&deposit).unwrap();
    let third = store.add_fixed_deposit(&deposit).unwrap();

    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_ne!(first, third);
}

#[test]
fn update_changes_only_the_targeted_deposit() {
    let store = open_store();
    let first = store
        .add_fixed_deposit(&test_deposit("Bank A", 50_000.0, 54_000.0))
        .unwrap();
    let second = store
        .add_fixed_deposit(&test_deposit("Bank B", 75_000.0, 81_000.0))
        .unwrap();

    let mut updated = test_deposit("Updated Bank", 150_000.0, 162_000.0);
    updated.id = first;
    store.update_fixed_deposit(&updated).unwrap();

    let reloaded_first = store.get_fixed_deposit_by_id(first).get().unwrap();
    assert_eq!(reloaded_first.bank_name, "Updated Bank");
    assert!((reloaded_first.principal_amount - 150_000.0).abs() < 0.01);

    let reloaded_second = store.get_fixed_deposit_by_id(second).get().unwrap();
    assert_eq!(reloaded_second.bank_name, "Bank B");
    assert!((reloaded_second.principal_amount - 75_000.0).abs() < 0.01);
}

#[test]
fn update_missing_id_is_a_noop() {
    let store = open_store();
    let id = store
        .add_fixed_deposit(&test_deposit("Bank A", 50_000.0, 54_000.0))
        .unwrap();

    let mut ghost = test_deposit("Ghost Bank", 1.0, 2.0);
    ghost.id = 999;
    store.update_fixed_deposit(&ghost).unwrap();

    let deposits = store.get_all_fixed_deposits().get();
    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].id, id);
    assert_eq!(deposits[0].bank_name, "Bank A");
    assert!(store.get_fixed_deposit_by_id(999).get().is_none());
}

#[test]
fn update_preserves_created_at() {
    let store = open_store();
    let deposit = test_deposit("Bank A", 50_000.0, 54_000.0);
    let id = store.add_fixed_deposit(&deposit).unwrap();

    let mut updated = test_deposit("Bank A", 60_000.0, 65_000.0);
    updated.id = id;
    updated.created_at = Utc.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap();
    store.update_fixed_deposit(&updated).unwrap();

    let reloaded = store.get_fixed_deposit_by_id(id).get().unwrap();
    assert_eq!(reloaded.created_at, deposit.created_at);
    assert!((reloaded.principal_amount - 60_000.0).abs() < 0.01);
}

#[test]
fn delete_removes_exactly_the_targeted_deposit() {
    let store = open_store();
    let first = store
        .add_fixed_deposit(&test_deposit("Bank A", 50_000.0, 54_000.0))
        .unwrap();
    let second = store
        .add_fixed_deposit(&test_deposit("Bank B", 75_000.0, 81_000.0))
        .unwrap();

    store.delete_fixed_deposit(first).unwrap();

    assert!(store.get_fixed_deposit_by_id(first).get().is_none());
    assert!(store.get_fixed_deposit_by_id(second).get().is_some());
    assert_eq!(store.get_all_fixed_deposits().get().len(), 1);
}

#[test]
fn delete_missing_id_is_a_noop() {
    let store = open_store();
    store
        .add_fixed_deposit(&test_deposit("Bank A", 50_000.0, 54_000.0))
        .unwrap();

    store.delete_fixed_deposit(999).unwrap();

    assert_eq!(store.get_all_fixed_deposits().get().len(), 1);
}

#[test]
fn delete_all_empties_the_store() {
    let store = open_store();
    for bank in ["Bank A", "Bank B", "Bank C"] {
        store
            .add_fixed_deposit(&test_deposit(bank, 10_000.0, 11_000.0))
            .unwrap();
    }

    store.delete_all_fixed_deposits().unwrap();

    assert!(store.get_all_fixed_deposits().get().is_empty());
}

#[test]
fn absent_notes_roundtrip_as_absent() {
    let store = open_store();

    let mut deposit = test_deposit("Bank A", 50_000.0, 54_000.0);
    deposit.notes = None;
    let id = store.add_fixed_deposit(&deposit).unwrap();

    let loaded = store.get_fixed_deposit_by_id(id).get().unwrap();
    assert_eq!(loaded.notes, None);
}

#[test]
fn empty_string_notes_stay_an_empty_string() {
    let store = open_store();

    let mut deposit = test_deposit("Bank A", 50_000.0, 54_000.0);
    deposit.notes = Some(String::new());
    let id = store.add_fixed_deposit(&deposit).unwrap();

    let loaded = store.get_fixed_deposit_by_id(id).get().unwrap();
    assert_eq!(loaded.notes, Some(String::new()));
}

#[test]
fn deposits_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fdtracker.db");

    let deposit = test_deposit("Durable Bank", 50_000.0, 54_000.0);
    let id = {
        let store = SqliteFixedDepositStore::try_new(open_db(&path).unwrap()).unwrap();
        store.add_fixed_deposit(&deposit).unwrap()
    };

    let reopened = SqliteFixedDepositStore::try_new(open_db(&path).unwrap()).unwrap();
    let loaded = reopened.get_fixed_deposit_by_id(id).get().unwrap();
    let mut expected = deposit;
    expected.id = id;
    assert_eq!(loaded, expected);
}

#[test]
fn unmigrated_connection_is_rejected() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteFixedDepositStore::try_new(conn).unwrap_err();
    assert!(err.to_string().contains("not migrated"));
}
