//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::{Duration, NaiveDate};
use clap::Parser;
use recovery_core::db::Database;
use recovery_core::models::{JournalEntry, TriState};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_log_args() {
    let cli = Cli::try_parse_from([
        "recovery",
        "log",
        "--date",
        "2024-02-03",
        "--cravings",
        "no",
        "--good-sleep",
        "yes",
        "--energy",
        "7",
        "--sleep-hours",
        "7.5",
        "--notes",
        "Long walk",
    ])
    .unwrap();

    let Commands::Log(args) = cli.command else {
        panic!("expected log command");
    };
    assert_eq!(args.date, Some(day(3)));

    let entry = args.to_entry();
    assert_eq!(entry.had_cravings, TriState::False);
    assert_eq!(entry.sleep_quality, TriState::True);
    assert_eq!(entry.energy_level, Some(7));
    assert_eq!(entry.sleep_hours, Some(7.5));
    assert_eq!(entry.notes.as_deref(), Some("Long walk"));
    // Not passed means not recorded
    assert_eq!(entry.positive_mood, TriState::Unset);
}

#[test]
fn test_parse_rejects_out_of_range_scale() {
    assert!(Cli::try_parse_from(["recovery", "log", "--energy", "11"]).is_err());
    assert!(Cli::try_parse_from(["recovery", "log", "--anxiety", "0"]).is_err());
}

#[test]
fn test_parse_rejects_bad_date() {
    assert!(Cli::try_parse_from(["recovery", "show", "--date", "02/03/2024"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["recovery", "status", "--db", "/tmp/j.db", "--no-encrypt", "-v"])
        .unwrap();
    assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/j.db")));
    assert!(cli.no_encrypt);
    assert!(cli.verbose);
}

// ========== Entry Command Tests ==========

#[test]
fn test_cmd_log_creates_entry() {
    let db = setup_test_db();
    let update = JournalEntry {
        positive_mood: TriState::True,
        ..Default::default()
    };

    let stored = commands::cmd_log(&db, day(1), &update).unwrap();
    assert_eq!(stored.positive_mood, TriState::True);
    assert_eq!(db.get_entry(day(1)).unwrap(), Some(stored));
}

#[test]
fn test_cmd_log_merges_into_existing() {
    let db = setup_test_db();
    commands::cmd_log(
        &db,
        day(1),
        &JournalEntry {
            had_cravings: TriState::True,
            energy_level: Some(3),
            ..Default::default()
        },
    )
    .unwrap();

    let stored = commands::cmd_log(
        &db,
        day(1),
        &JournalEntry {
            energy_level: Some(6),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(stored.had_cravings, TriState::True);
    assert_eq!(stored.energy_level, Some(6));
    assert_eq!(db.count_entries().unwrap(), 1);
}

#[test]
fn test_cmd_log_rejects_empty_update() {
    let db = setup_test_db();
    assert!(commands::cmd_log(&db, day(1), &JournalEntry::default()).is_err());
    assert_eq!(db.count_entries().unwrap(), 0);
}

#[test]
fn test_cmd_show_and_delete() {
    let db = setup_test_db();
    db.upsert_entry(day(2), &JournalEntry::default()).unwrap();

    assert!(commands::cmd_show(&db, day(2)).is_ok());
    assert!(commands::cmd_show(&db, day(3)).is_err());

    assert!(commands::cmd_delete(&db, day(2)).is_ok());
    assert!(commands::cmd_delete(&db, day(2)).is_err());
}

#[test]
fn test_cmd_entries() {
    let db = setup_test_db();
    assert!(commands::cmd_entries(&db, 5).is_ok());

    for d in 1..=8 {
        db.upsert_entry(day(d), &JournalEntry::default()).unwrap();
    }
    assert!(commands::cmd_entries(&db, 5).is_ok());
}

#[test]
fn test_entry_fields_skip_unrecorded() {
    let entry = JournalEntry {
        had_cravings: TriState::False,
        energy_level: Some(8),
        water_glasses: Some(6),
        ..Default::default()
    };

    let fields = commands::entry_fields(&entry);
    assert_eq!(
        fields,
        vec![
            ("Cravings", "no".to_string()),
            ("Energy", "8/10".to_string()),
            ("Water", "6 glasses".to_string()),
        ]
    );
}

// ========== Insights Command Tests ==========

#[test]
fn test_cmd_insights_short_circuit() {
    let db = setup_test_db();
    for d in 1..=3 {
        db.upsert_entry(day(d), &JournalEntry::default()).unwrap();
    }

    let data = commands::cmd_insights(&db, false, Some(day(3))).unwrap();
    assert_eq!(data.entry_count, 3);
    assert!(data.insights.is_empty());
}

#[test]
fn test_cmd_insights_json() {
    let db = setup_test_db();
    let start = day(1);
    for i in 0..10 {
        db.upsert_entry(
            start + Duration::days(i),
            &JournalEntry {
                sleep_quality: TriState::from(i % 2 == 0),
                had_cravings: TriState::from(i % 2 == 1),
                ..Default::default()
            },
        )
        .unwrap();
    }

    let data = commands::cmd_insights(&db, true, Some(day(11))).unwrap();
    assert_eq!(data.entry_count, 10);
    assert_eq!(data.last_updated, "Yesterday");
    assert_eq!(data.positive_patterns[0].factor, "Good sleep quality");
}

// ========== Export/Import Command Tests ==========

#[test]
fn test_cmd_export_import() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("journal.json");

    let source = setup_test_db();
    for d in 1..=4 {
        source
            .upsert_entry(
                day(d),
                &JournalEntry {
                    exercised: TriState::True,
                    ..Default::default()
                },
            )
            .unwrap();
    }
    assert_eq!(commands::cmd_export(&source, &file).unwrap(), 4);

    let target = setup_test_db();
    target.upsert_entry(day(20), &JournalEntry::default()).unwrap();

    let stats = commands::cmd_import(&target, &file, true).unwrap();
    assert_eq!(stats.cleared, 1);
    assert_eq!(stats.imported, 4);
    assert_eq!(target.list_entries().unwrap(), source.list_entries().unwrap());
}

#[test]
fn test_cmd_import_missing_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_import(&db, &dir.path().join("nope.json"), false).is_err());
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("journal.db");

    commands::cmd_init(&path, true).unwrap();
    assert!(path.exists());
    assert!(commands::cmd_status(&path, true).is_ok());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer note here", 10), "a longe...");
    assert_eq!(truncate("ééééé", 4), "é...");
}
