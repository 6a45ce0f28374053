//! Database tests

use super::*;
use crate::models::*;
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn sample_entry() -> JournalEntry {
    JournalEntry {
        positive_mood: TriState::True,
        had_cravings: TriState::False,
        exercised: TriState::True,
        energy_level: Some(7),
        sleep_hours: Some(7.5),
        meditation_minutes: Some(10),
        notes: Some("Walked after work".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert!(db.list_entries().unwrap().is_empty());
    assert_eq!(db.count_entries().unwrap(), 0);
    assert_eq!(db.latest_entry_date().unwrap(), None);
}

#[test]
fn test_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let columns: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('journal_entries')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    // date + 22 fields + created_at + updated_at
    assert_eq!(columns, 25);
}

#[test]
fn test_entry_crud() {
    let db = Database::in_memory().unwrap();

    let replaced = db.upsert_entry(day(1), &sample_entry()).unwrap();
    assert!(!replaced);

    let stored = db.get_entry(day(1)).unwrap().unwrap();
    assert_eq!(stored, sample_entry());
    assert_eq!(stored.sleep_quality, TriState::Unset);

    assert!(db.get_entry(day(2)).unwrap().is_none());

    assert!(db.delete_entry(day(1)).unwrap());
    assert!(!db.delete_entry(day(1)).unwrap());
    assert!(db.get_entry(day(1)).unwrap().is_none());
}

#[test]
fn test_upsert_is_last_write_wins() {
    let db = Database::in_memory().unwrap();

    db.upsert_entry(day(1), &sample_entry()).unwrap();
    let second = JournalEntry {
        had_cravings: TriState::True,
        ..Default::default()
    };
    let replaced = db.upsert_entry(day(1), &second).unwrap();
    assert!(replaced);

    // Whole-entry replacement, not a field merge
    let stored = db.get_entry(day(1)).unwrap().unwrap();
    assert_eq!(stored, second);
    assert_eq!(db.count_entries().unwrap(), 1);
}

#[test]
fn test_upsert_keeps_created_at() {
    let db = Database::in_memory().unwrap();
    db.upsert_entry(day(1), &sample_entry()).unwrap();

    let conn = db.conn().unwrap();
    conn.execute(
        "UPDATE journal_entries SET created_at = '2020-01-01 00:00:00'",
        [],
    )
    .unwrap();
    drop(conn);

    db.upsert_entry(day(1), &JournalEntry::default()).unwrap();

    let conn = db.conn().unwrap();
    let created: String = conn
        .query_row(
            "SELECT created_at FROM journal_entries WHERE date = '2024-03-01'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(created, "2020-01-01 00:00:00");
}

#[test]
fn test_list_entries_in_date_order() {
    let db = Database::in_memory().unwrap();
    for d in [5, 1, 3] {
        db.upsert_entry(day(d), &sample_entry()).unwrap();
    }

    let entries = db.list_entries().unwrap();
    let dates: Vec<_> = entries.keys().copied().collect();
    assert_eq!(dates, vec![day(1), day(3), day(5)]);
    assert_eq!(db.latest_entry_date().unwrap(), Some(day(5)));
}

#[test]
fn test_list_entries_between() {
    let db = Database::in_memory().unwrap();
    for d in 1..=10 {
        db.upsert_entry(day(d), &JournalEntry::default()).unwrap();
    }

    let bounded = db.list_entries_between(Some(day(3)), Some(day(5))).unwrap();
    assert_eq!(bounded.len(), 3);
    assert!(bounded.contains_key(&day(3)));
    assert!(bounded.contains_key(&day(5)));

    let open_start = db.list_entries_between(None, Some(day(2))).unwrap();
    assert_eq!(open_start.len(), 2);

    let open_end = db.list_entries_between(Some(day(9)), None).unwrap();
    assert_eq!(open_end.len(), 2);

    assert_eq!(db.list_entries_between(None, None).unwrap().len(), 10);
}

#[test]
fn test_clear_entries() {
    let db = Database::in_memory().unwrap();
    for d in 1..=4 {
        db.upsert_entry(day(d), &sample_entry()).unwrap();
    }

    assert_eq!(db.clear_entries().unwrap(), 4);
    assert_eq!(db.count_entries().unwrap(), 0);
}

#[test]
fn test_unencrypted_db_reports_plaintext() {
    let db = Database::in_memory().unwrap();
    assert!(!db.is_encrypted().unwrap());
}

#[test]
fn test_encrypted_roundtrip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_with_key(path, Some("correct horse")).unwrap();
        db.upsert_entry(day(1), &sample_entry()).unwrap();
        assert!(db.is_encrypted().unwrap());
    }

    let reopened = Database::new_with_key(path, Some("correct horse")).unwrap();
    assert_eq!(reopened.get_entry(day(1)).unwrap(), Some(sample_entry()));
}

#[test]
fn test_derive_key_is_stable() {
    let a = derive_key("passphrase").unwrap();
    let b = derive_key("passphrase").unwrap();
    let c = derive_key("other").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 64);
}
