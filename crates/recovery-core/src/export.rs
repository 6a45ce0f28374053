//! JSON export and import of the journal
//!
//! The export document wraps the entry collection with a format version and a
//! timestamp. Import also accepts a bare `{ "YYYY-MM-DD": entry }` object, the
//! same shape the insights engine takes.

use std::io::{Read, Write};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::EntryCollection;

/// Current export document version
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// Full journal export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalExport {
    pub version: u32,
    /// RFC 3339 timestamp
    pub exported_at: String,
    pub entries: EntryCollection,
}

/// How imported entries combine with what is already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Upsert over the existing journal; imported dates win
    #[default]
    Merge,
    /// Clear the journal first
    Replace,
}

/// Import statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Entries written
    pub imported: usize,
    /// Existing dates overwritten (merge mode)
    pub replaced: usize,
    /// Rows removed before importing (replace mode)
    pub cleared: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    Export(JournalExport),
    Bare(EntryCollection),
}

/// Snapshot every stored entry
pub fn export_entries(db: &Database) -> Result<JournalExport> {
    Ok(JournalExport {
        version: EXPORT_FORMAT_VERSION,
        exported_at: Utc::now().to_rfc3339(),
        entries: db.list_entries()?,
    })
}

/// Write a pretty-printed export to `writer`. Returns the entry count.
pub fn write_export<W: Write>(db: &Database, mut writer: W) -> Result<usize> {
    let export = export_entries(db)?;
    serde_json::to_writer_pretty(&mut writer, &export)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(export.entries.len())
}

/// Read an export (or a bare entry collection) and store its entries
pub fn import_entries<R: Read>(db: &Database, reader: R, mode: ImportMode) -> Result<ImportStats> {
    let document: ImportDocument = serde_json::from_reader(reader)
        .map_err(|e| Error::InvalidData(format!("Not a journal export: {}", e)))?;

    let entries = match document {
        ImportDocument::Export(export) => {
            if export.version > EXPORT_FORMAT_VERSION {
                return Err(Error::InvalidData(format!(
                    "Unsupported export version {} (newest supported is {})",
                    export.version, EXPORT_FORMAT_VERSION
                )));
            }
            export.entries
        }
        ImportDocument::Bare(entries) => entries,
    };

    let (cleared, replaced) = db.store_entries(&entries, mode == ImportMode::Replace)?;
    let stats = ImportStats {
        imported: entries.len(),
        replaced,
        cleared,
    };

    tracing::info!(
        imported = stats.imported,
        replaced = stats.replaced,
        cleared = stats.cleared,
        "Journal import complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JournalEntry, TriState};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn seeded_db() -> Database {
        let db = Database::in_memory().unwrap();
        for d in 1..=3 {
            db.upsert_entry(
                day(d),
                &JournalEntry {
                    had_cravings: TriState::from(d % 2 == 0),
                    energy_level: Some(d as u8 + 4),
                    ..Default::default()
                },
            )
            .unwrap();
        }
        db
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let source = seeded_db();
        let mut buf = Vec::new();
        let written = write_export(&source, &mut buf).unwrap();
        assert_eq!(written, 3);

        let target = Database::in_memory().unwrap();
        let stats = import_entries(&target, buf.as_slice(), ImportMode::Merge).unwrap();

        assert_eq!(stats.imported, 3);
        assert_eq!(stats.replaced, 0);
        assert_eq!(target.list_entries().unwrap(), source.list_entries().unwrap());
    }

    #[test]
    fn test_export_document_shape() {
        let export = export_entries(&seeded_db()).unwrap();
        let json = serde_json::to_value(&export).unwrap();

        assert_eq!(json["version"], 1);
        assert!(json["exportedAt"].is_string());
        assert_eq!(json["entries"]["2024-05-02"]["hadCravings"], true);
    }

    #[test]
    fn test_import_bare_collection() {
        let db = Database::in_memory().unwrap();
        let json = r#"{"2024-05-10": {"positiveMood": true}, "2024-05-11": {}}"#;

        let stats = import_entries(&db, json.as_bytes(), ImportMode::Merge).unwrap();
        assert_eq!(stats.imported, 2);
        assert_eq!(
            db.get_entry(day(10)).unwrap().unwrap().positive_mood,
            TriState::True
        );
    }

    #[test]
    fn test_merge_counts_replaced_dates() {
        let db = seeded_db();
        let json = r#"{"2024-05-03": {"hadCravings": true}, "2024-05-04": {}}"#;

        let stats = import_entries(&db, json.as_bytes(), ImportMode::Merge).unwrap();
        assert_eq!(stats.imported, 2);
        assert_eq!(stats.replaced, 1);
        assert_eq!(db.count_entries().unwrap(), 4);
    }

    #[test]
    fn test_replace_clears_first() {
        let db = seeded_db();
        let json = r#"{"2024-05-20": {"exercised": true}}"#;

        let stats = import_entries(&db, json.as_bytes(), ImportMode::Replace).unwrap();
        assert_eq!(stats.cleared, 3);
        assert_eq!(stats.imported, 1);
        assert_eq!(db.count_entries().unwrap(), 1);
    }

    #[test]
    fn test_failed_replace_keeps_existing_journal() {
        let db = seeded_db();
        db.conn()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_note BEFORE INSERT ON journal_entries
                 WHEN NEW.notes = 'reject'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let json = r#"{
            "2024-05-20": {"exercised": true},
            "2024-05-21": {"notes": "reject"}
        }"#;
        assert!(import_entries(&db, json.as_bytes(), ImportMode::Replace).is_err());

        // Neither the clear nor the first upsert took effect
        assert_eq!(db.count_entries().unwrap(), 3);
        assert!(db.get_entry(day(20)).unwrap().is_none());
        assert_eq!(db.list_entries().unwrap(), seeded_db().list_entries().unwrap());
    }

    #[test]
    fn test_rejects_invalid_documents() {
        let db = Database::in_memory().unwrap();

        let bad_date = r#"{"not-a-date": {}}"#;
        assert!(import_entries(&db, bad_date.as_bytes(), ImportMode::Merge).is_err());

        let future = r#"{"version": 99, "exportedAt": "2030-01-01T00:00:00Z", "entries": {}}"#;
        assert!(import_entries(&db, future.as_bytes(), ImportMode::Merge).is_err());

        assert_eq!(db.count_entries().unwrap(), 0);
    }
}
