//! Journal entry commands (log, show, entries, delete)

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use recovery_core::db::Database;
use recovery_core::models::{JournalEntry, TriState};

use super::truncate;

/// Merge `update` into the entry for `date` and store it. Returns the stored entry.
pub fn cmd_log(db: &Database, date: NaiveDate, update: &JournalEntry) -> Result<JournalEntry> {
    if update.is_empty() {
        bail!("Nothing to log. Pass at least one answer, e.g. --cravings no");
    }

    let existing = db
        .get_entry(date)
        .with_context(|| format!("Failed to read entry for {}", date))?;
    let is_update = existing.is_some();

    let mut entry = existing.unwrap_or_default();
    entry.merge(update);
    db.upsert_entry(date, &entry)
        .with_context(|| format!("Failed to store entry for {}", date))?;

    if is_update {
        println!("✏️  Updated entry for {}", date);
    } else {
        println!("📝 Logged entry for {}", date);
    }
    for (label, value) in entry_fields(&entry) {
        println!("   {:<20} {}", label, value);
    }

    Ok(entry)
}

pub fn cmd_show(db: &Database, date: NaiveDate) -> Result<()> {
    let Some(entry) = db.get_entry(date)? else {
        bail!("No entry for {}", date);
    };

    println!();
    println!("📓 {}", date.format("%A, %B %-d, %Y"));
    println!("   ─────────────────────────────");
    let fields = entry_fields(&entry);
    if fields.is_empty() {
        println!("   (nothing recorded)");
    }
    for (label, value) in fields {
        println!("   {:<20} {}", label, value);
    }
    println!();

    Ok(())
}

pub fn cmd_entries(db: &Database, limit: usize) -> Result<()> {
    let entries = db.list_entries()?;

    if entries.is_empty() {
        println!("No entries yet. Start with: recovery log --cravings no");
        return Ok(());
    }

    println!();
    println!(
        "{:<12} {:>5} {:>8} {:>6} {:>7} {:>6}  Notes",
        "Date", "Mood", "Craving", "Sleep", "Stress", "Energy"
    );
    println!("{}", "─".repeat(70));

    for (date, entry) in entries.iter().rev().take(limit) {
        println!(
            "{:<12} {:>5} {:>8} {:>6} {:>7} {:>6}  {}",
            date.to_string(),
            entry.positive_mood.as_str(),
            entry.had_cravings.as_str(),
            entry.sleep_quality.as_str(),
            entry.high_stress.as_str(),
            entry
                .energy()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "-".to_string()),
            truncate(entry.notes.as_deref().unwrap_or(""), 24),
        );
    }

    if entries.len() > limit {
        println!();
        println!("   ... {} more (use --limit)", entries.len() - limit);
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, date: NaiveDate) -> Result<()> {
    if !db.delete_entry(date)? {
        bail!("No entry for {}", date);
    }
    println!("🗑️  Deleted entry for {}", date);
    Ok(())
}

/// Recorded fields as display rows, in questionnaire order
pub fn entry_fields(entry: &JournalEntry) -> Vec<(&'static str, String)> {
    let answers: [(&'static str, TriState); 12] = [
        ("Positive mood", entry.positive_mood),
        ("Cravings", entry.had_cravings),
        ("High stress", entry.high_stress),
        ("Good sleep", entry.sleep_quality),
        ("Breathing exercise", entry.used_breathing),
        ("Mood swings", entry.mood_swings),
        ("Irritability", entry.irritability),
        ("Exercised", entry.exercised),
        ("Headaches", entry.had_headaches),
        ("Social support", entry.social_support),
        ("Avoided triggers", entry.avoided_triggers),
        ("Productive day", entry.productive_day),
    ];

    let scales: [(&'static str, Option<u8>); 5] = [
        ("Craving intensity", entry.craving_intensity),
        ("Anxiety", entry.anxiety_level),
        ("Energy", entry.energy_level),
        ("Concentration", entry.concentration),
        ("Appetite", entry.appetite),
    ];

    let mut rows: Vec<(&'static str, String)> = answers
        .into_iter()
        .filter(|(_, v)| !v.is_unset())
        .map(|(label, v)| (label, v.as_str().to_string()))
        .collect();

    rows.extend(
        scales
            .into_iter()
            .filter_map(|(label, v)| v.map(|v| (label, format!("{}/10", v)))),
    );

    if let Some(hours) = entry.sleep_hours {
        rows.push(("Sleep", format!("{:.1} h", hours)));
    }
    if let Some(m) = entry.meditation_minutes {
        rows.push(("Meditation", format!("{} min", m)));
    }
    if let Some(g) = entry.water_glasses {
        rows.push(("Water", format!("{} glasses", g)));
    }
    if let Some(m) = entry.exercise_minutes {
        rows.push(("Exercise", format!("{} min", m)));
    }
    if let Some(notes) = &entry.notes {
        rows.push(("Notes", notes.clone()));
    }

    rows
}
