//! Journal entry operations

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::Database;
use crate::error::Result;
use crate::models::{parse_date_key, EntryCollection, JournalEntry, TriState, DATE_FORMAT};

/// Entry columns in the order `entry_from_row` reads them, starting at index 1
const ENTRY_COLUMNS: &str = "positive_mood, had_cravings, high_stress, sleep_quality, \
    used_breathing, mood_swings, irritability, exercised, had_headaches, social_support, \
    avoided_triggers, productive_day, craving_intensity, anxiety_level, energy_level, \
    concentration, appetite, sleep_hours, meditation_minutes, water_glasses, \
    exercise_minutes, notes";

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Read a `date, <ENTRY_COLUMNS>` row
fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<(String, JournalEntry)> {
    let tri = |idx: usize| -> rusqlite::Result<TriState> {
        Ok(row.get::<_, Option<bool>>(idx)?.into())
    };

    let entry = JournalEntry {
        positive_mood: tri(1)?,
        had_cravings: tri(2)?,
        high_stress: tri(3)?,
        sleep_quality: tri(4)?,
        used_breathing: tri(5)?,
        mood_swings: tri(6)?,
        irritability: tri(7)?,
        exercised: tri(8)?,
        had_headaches: tri(9)?,
        social_support: tri(10)?,
        avoided_triggers: tri(11)?,
        productive_day: tri(12)?,
        craving_intensity: row.get(13)?,
        anxiety_level: row.get(14)?,
        energy_level: row.get(15)?,
        concentration: row.get(16)?,
        appetite: row.get(17)?,
        sleep_hours: row.get(18)?,
        meditation_minutes: row.get(19)?,
        water_glasses: row.get(20)?,
        exercise_minutes: row.get(21)?,
        notes: row.get(22)?,
    };
    Ok((row.get(0)?, entry))
}

fn collect_entries(rows: Vec<(String, JournalEntry)>) -> Result<EntryCollection> {
    rows.into_iter()
        .map(|(date, entry)| Ok((parse_date_key(&date)?, entry)))
        .collect()
}

/// Upsert one row on `conn`. Returns true when `date` was already stored.
fn write_entry(conn: &Connection, date: NaiveDate, entry: &JournalEntry) -> Result<bool> {
    let key = date_key(date);

    let existed = conn
        .query_row(
            "SELECT 1 FROM journal_entries WHERE date = ?",
            params![key],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    conn.execute(
        &format!(
            r#"
            INSERT INTO journal_entries (date, {})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                    ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)
            ON CONFLICT(date) DO UPDATE SET
                positive_mood = excluded.positive_mood,
                had_cravings = excluded.had_cravings,
                high_stress = excluded.high_stress,
                sleep_quality = excluded.sleep_quality,
                used_breathing = excluded.used_breathing,
                mood_swings = excluded.mood_swings,
                irritability = excluded.irritability,
                exercised = excluded.exercised,
                had_headaches = excluded.had_headaches,
                social_support = excluded.social_support,
                avoided_triggers = excluded.avoided_triggers,
                productive_day = excluded.productive_day,
                craving_intensity = excluded.craving_intensity,
                anxiety_level = excluded.anxiety_level,
                energy_level = excluded.energy_level,
                concentration = excluded.concentration,
                appetite = excluded.appetite,
                sleep_hours = excluded.sleep_hours,
                meditation_minutes = excluded.meditation_minutes,
                water_glasses = excluded.water_glasses,
                exercise_minutes = excluded.exercise_minutes,
                notes = excluded.notes,
                updated_at = CURRENT_TIMESTAMP
            "#,
            ENTRY_COLUMNS
        ),
        params![
            key,
            entry.positive_mood.as_bool(),
            entry.had_cravings.as_bool(),
            entry.high_stress.as_bool(),
            entry.sleep_quality.as_bool(),
            entry.used_breathing.as_bool(),
            entry.mood_swings.as_bool(),
            entry.irritability.as_bool(),
            entry.exercised.as_bool(),
            entry.had_headaches.as_bool(),
            entry.social_support.as_bool(),
            entry.avoided_triggers.as_bool(),
            entry.productive_day.as_bool(),
            entry.craving_intensity,
            entry.anxiety_level,
            entry.energy_level,
            entry.concentration,
            entry.appetite,
            entry.sleep_hours,
            entry.meditation_minutes,
            entry.water_glasses,
            entry.exercise_minutes,
            entry.notes,
        ],
    )?;

    tracing::debug!(date = %key, replaced = existed, "Stored journal entry");
    Ok(existed)
}

impl Database {
    /// Store the entry for `date`, replacing any previous one
    ///
    /// Returns true when an existing entry was overwritten. `created_at` of the
    /// original row is preserved.
    pub fn upsert_entry(&self, date: NaiveDate, entry: &JournalEntry) -> Result<bool> {
        let conn = self.conn()?;
        write_entry(&conn, date, entry)
    }

    /// Upsert a batch of entries in one transaction, clearing the journal
    /// first when `clear_first` is set.
    ///
    /// Returns `(cleared, replaced)`. On error nothing is changed.
    pub fn store_entries(
        &self,
        entries: &EntryCollection,
        clear_first: bool,
    ) -> Result<(usize, usize)> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let cleared = if clear_first {
            tx.execute("DELETE FROM journal_entries", [])?
        } else {
            0
        };

        let mut replaced = 0;
        for (date, entry) in entries {
            if write_entry(&tx, *date, entry)? {
                replaced += 1;
            }
        }

        tx.commit()?;
        tracing::debug!(
            stored = entries.len(),
            replaced,
            cleared,
            "Stored journal batch"
        );
        Ok((cleared, replaced))
    }

    /// Get the entry for `date`, if one exists
    pub fn get_entry(&self, date: NaiveDate) -> Result<Option<JournalEntry>> {
        let conn = self.conn()?;

        let row = conn
            .query_row(
                &format!(
                    "SELECT date, {} FROM journal_entries WHERE date = ?",
                    ENTRY_COLUMNS
                ),
                params![date_key(date)],
                entry_from_row,
            )
            .optional()?;

        Ok(row.map(|(_, entry)| entry))
    }

    /// Delete the entry for `date`. Returns false if there was none.
    pub fn delete_entry(&self, date: NaiveDate) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM journal_entries WHERE date = ?",
            params![date_key(date)],
        )?;
        Ok(deleted > 0)
    }

    /// All entries, keyed by date
    pub fn list_entries(&self) -> Result<EntryCollection> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT date, {} FROM journal_entries ORDER BY date",
            ENTRY_COLUMNS
        ))?;

        let rows = stmt
            .query_map([], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        collect_entries(rows)
    }

    /// Entries with `from <= date <= to`. Either bound may be open.
    pub fn list_entries_between(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<EntryCollection> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT date, {} FROM journal_entries
            WHERE (?1 IS NULL OR date >= ?1)
              AND (?2 IS NULL OR date <= ?2)
            ORDER BY date
            "#,
            ENTRY_COLUMNS
        ))?;

        let rows = stmt
            .query_map(
                params![from.map(date_key), to.map(date_key)],
                entry_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        collect_entries(rows)
    }

    pub fn count_entries(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM journal_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Date of the most recent entry
    pub fn latest_entry_date(&self) -> Result<Option<NaiveDate>> {
        let conn = self.conn()?;
        let latest: Option<String> =
            conn.query_row("SELECT MAX(date) FROM journal_entries", [], |row| row.get(0))?;

        latest.map(|d| parse_date_key(&d)).transpose()
    }

    /// Remove every entry. Returns the number of rows deleted.
    pub fn clear_entries(&self) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM journal_entries", [])?;
        tracing::info!(deleted, "Cleared journal entries");
        Ok(deleted)
    }
}
