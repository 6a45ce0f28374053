//! Domain models for the recovery journal

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entries keyed by calendar day. One entry per day, iterated in date order.
pub type EntryCollection = BTreeMap<NaiveDate, JournalEntry>;

/// Date key format used in JSON, the database, and CLI arguments
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date key
pub fn parse_date_key(s: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| crate::Error::InvalidData(format!("Invalid date '{}': {}", s, e)))
}

/// A yes/no answer that may not have been recorded.
///
/// Serialized as `true`, `false` or `null`. A missing field is `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    True,
    False,
    #[default]
    Unset,
}

impl TriState {
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unset => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "yes",
            Self::False => "no",
            Self::Unset => "-",
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Unset,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        value.as_bool()
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl std::ops::Not for TriState {
    type Output = TriState;

    fn not(self) -> Self::Output {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unset => Self::Unset,
        }
    }
}

impl std::fmt::Display for TriState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a journal field holds a value
pub trait Recorded {
    fn is_recorded(&self) -> bool;
}

impl Recorded for TriState {
    fn is_recorded(&self) -> bool {
        !self.is_unset()
    }
}

impl<T> Recorded for Option<T> {
    fn is_recorded(&self) -> bool {
        self.is_some()
    }
}

/// Valid range for the 1-10 self-report scales
pub const SCALE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// One day's self-reported journal record.
///
/// Every field is optional. Unrecorded answers are excluded from analysis,
/// never read as "no".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalEntry {
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub positive_mood: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub had_cravings: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub high_stress: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub sleep_quality: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub used_breathing: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub mood_swings: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub irritability: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub exercised: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub had_headaches: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub social_support: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub avoided_triggers: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub productive_day: TriState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub craving_intensity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anxiety_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appetite: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meditation_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_glasses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_minutes: Option<u32>,

    /// Free-text notes. Stored and exported, never analyzed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Overwrite fields of `$dst` with every recorded field of `$src`
macro_rules! merge_recorded {
    ($dst:expr, $src:expr; $($field:ident),+ $(,)?) => {
        $(
            if $src.$field.is_recorded() {
                $dst.$field = $src.$field.clone();
            }
        )+
    };
}

impl JournalEntry {
    /// Energy level, if recorded and within 1-10
    pub fn energy(&self) -> Option<u8> {
        in_scale(self.energy_level)
    }

    pub fn craving_intensity(&self) -> Option<u8> {
        in_scale(self.craving_intensity)
    }

    pub fn anxiety(&self) -> Option<u8> {
        in_scale(self.anxiety_level)
    }

    /// Hours slept, if recorded as a finite non-negative number
    pub fn sleep(&self) -> Option<f64> {
        self.sleep_hours.filter(|h| h.is_finite() && *h >= 0.0)
    }

    /// True when no field at all was recorded
    pub fn is_empty(&self) -> bool {
        !(self.positive_mood.is_recorded()
            || self.had_cravings.is_recorded()
            || self.high_stress.is_recorded()
            || self.sleep_quality.is_recorded()
            || self.used_breathing.is_recorded()
            || self.mood_swings.is_recorded()
            || self.irritability.is_recorded()
            || self.exercised.is_recorded()
            || self.had_headaches.is_recorded()
            || self.social_support.is_recorded()
            || self.avoided_triggers.is_recorded()
            || self.productive_day.is_recorded()
            || self.craving_intensity.is_recorded()
            || self.anxiety_level.is_recorded()
            || self.energy_level.is_recorded()
            || self.concentration.is_recorded()
            || self.appetite.is_recorded()
            || self.sleep_hours.is_recorded()
            || self.meditation_minutes.is_recorded()
            || self.water_glasses.is_recorded()
            || self.exercise_minutes.is_recorded()
            || self.notes.is_recorded())
    }

    /// Apply every recorded field of `update` on top of this entry
    pub fn merge(&mut self, update: &JournalEntry) {
        merge_recorded!(self, update;
            positive_mood, had_cravings, high_stress, sleep_quality, used_breathing,
            mood_swings, irritability, exercised, had_headaches, social_support,
            avoided_triggers, productive_day,
            craving_intensity, anxiety_level, energy_level, concentration, appetite,
            sleep_hours, meditation_minutes, water_glasses, exercise_minutes,
            notes,
        );
    }
}

fn in_scale(value: Option<u8>) -> Option<u8> {
    value.filter(|v| SCALE_RANGE.contains(v))
}
