//! Entry normalizer: chronological ordering, tiering and freshness labels

use chrono::NaiveDate;

use crate::models::{EntryCollection, JournalEntry};

use super::types::DataQuality;

/// Fewer entries than this skip analysis entirely
pub const MIN_ENTRIES_FOR_ANALYSIS: usize = 5;

/// Number of most recent entries used for pattern detection
pub const RECENT_WINDOW: usize = 30;

/// A dated entry borrowed from the caller's collection
pub type DatedEntry<'a> = (NaiveDate, &'a JournalEntry);

/// Entry collection shaped for analysis
#[derive(Debug, Clone)]
pub struct NormalizedEntries<'a> {
    /// All entries, oldest first
    pub entries: Vec<DatedEntry<'a>>,
    pub data_quality: DataQuality,
}

impl<'a> NormalizedEntries<'a> {
    pub fn from_collection(collection: &'a EntryCollection) -> Self {
        let mut entries: Vec<DatedEntry<'a>> =
            collection.iter().map(|(date, entry)| (*date, entry)).collect();
        // BTreeMap already iterates in key order; sorting keeps the contract explicit
        entries.sort_by_key(|(date, _)| *date);

        let data_quality = DataQuality::for_count(entries.len());
        Self {
            entries,
            data_quality,
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Below the analysis gate
    pub fn is_insufficient(&self) -> bool {
        self.count() < MIN_ENTRIES_FOR_ANALYSIS
    }

    /// The most recent entries (up to 30), oldest first
    pub fn recent(&self) -> &[DatedEntry<'a>] {
        let start = self.entries.len().saturating_sub(RECENT_WINDOW);
        &self.entries[start..]
    }

    /// The last `n` entries, oldest first
    pub fn last(&self, n: usize) -> &[DatedEntry<'a>] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// The first `n` entries
    pub fn first(&self, n: usize) -> &[DatedEntry<'a>] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|(date, _)| *date)
    }

    /// Freshness label for the latest entry relative to `today`
    pub fn last_updated(&self, today: NaiveDate) -> String {
        match self.latest_date() {
            Some(date) => relative_day_label(date, today),
            None => "Never".to_string(),
        }
    }
}

/// Render `date` relative to `today` ("Today", "3 days ago", "2 weeks ago", ...)
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => plural(days / 7, "week"),
        _ => plural(days / 30, "month"),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
