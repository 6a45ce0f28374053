//! Pattern calculator
//!
//! Every factor is evaluated with the same binary split: the recent window is
//! partitioned into days where the factor held and days where it did not,
//! entries with an unrecorded factor or outcome are dropped from both sides,
//! and the outcome rate (or average) of the two groups is compared.
//!
//! Rates are compared in percentage points, averaged 1-10 scales as a relative
//! percentage. A factor that misses its minimum group size contributes nothing.

use crate::models::{JournalEntry, TriState};

use super::normalizer::{DatedEntry, NormalizedEntries};
use super::stats::{confidence_for_samples, mean, percentage_points, rate, relative_percent};
use super::types::{Pattern, PatternDirection, PatternTrend};

/// Minimum days per group for simple rate and average comparisons
const MIN_GROUP: usize = 2;

/// Minimum days inside the 7-9 hour window before it is evaluated
const MIN_OPTIMAL_SLEEP_DAYS: usize = 5;

/// Minimum complete-routine days before the routine factor is evaluated
const MIN_ROUTINE_DAYS: usize = 5;

/// Recorded samples needed in each half of the window for a trend
const MIN_TREND_SAMPLES: usize = 2;

/// Rate change (0-1) beyond which a behavior counts as moving
const TREND_THRESHOLD: f64 = 0.10;

/// Patterns derived from one entry collection, ranked and truncated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSet {
    pub positive: Vec<Pattern>,
    pub challenging: Vec<Pattern>,
}

impl PatternSet {
    /// The highest ranked positive pattern
    pub fn strongest_positive(&self) -> Option<&Pattern> {
        self.positive.first()
    }
}

/// Evaluate every factor eligible for the collection's tier
pub fn calculate_patterns(entries: &NormalizedEntries<'_>) -> PatternSet {
    let window = entries.recent();
    let profile = entries.data_quality.profile();

    let mut positive: Vec<Pattern> = [
        sleep_quality_vs_cravings(window),
        exercise_vs_energy(window),
        exercise_vs_mood(window),
    ]
    .into_iter()
    .flatten()
    .collect();

    if profile.sleep_window {
        positive.extend(sleep_window_vs_energy(window));
    }
    if profile.morning_routine {
        positive.extend(morning_routine_vs_cravings(window));
    }

    let mut challenging: Vec<Pattern> = [stress_vs_cravings(window), low_support_vs_mood(window)]
        .into_iter()
        .flatten()
        .collect();

    // Positive: biggest confident gain first. Challenging: most damaging first.
    positive.sort_by(|a, b| b.score().cmp(&a.score()));
    challenging.sort_by_key(|p| p.score());

    positive.truncate(profile.max_positive_patterns);
    challenging.truncate(profile.max_challenging_patterns);

    tracing::debug!(
        window = window.len(),
        positive = positive.len(),
        challenging = challenging.len(),
        tier = entries.data_quality.as_str(),
        "Pattern calculation complete"
    );

    PatternSet {
        positive,
        challenging,
    }
}

// ============================================================================
// Binary split
// ============================================================================

/// Outcome samples split by whether a factor held
struct Split<T> {
    held: Vec<T>,
    not_held: Vec<T>,
}

impl<T> Split<T> {
    fn samples(&self) -> usize {
        self.held.len() + self.not_held.len()
    }

    fn has_minimum(&self, min_held: usize, min_not_held: usize) -> bool {
        self.held.len() >= min_held.max(1) && self.not_held.len() >= min_not_held.max(1)
    }
}

impl Split<bool> {
    /// Outcome rate for (held, not held)
    fn rates(&self, min_held: usize, min_not_held: usize) -> Option<(f64, f64)> {
        if !self.has_minimum(min_held, min_not_held) {
            return None;
        }
        Some((
            rate(self.held.iter().copied())?,
            rate(self.not_held.iter().copied())?,
        ))
    }
}

impl Split<f64> {
    /// Outcome average for (held, not held)
    fn means(&self, min_held: usize, min_not_held: usize) -> Option<(f64, f64)> {
        if !self.has_minimum(min_held, min_not_held) {
            return None;
        }
        Some((
            mean(self.held.iter().copied())?,
            mean(self.not_held.iter().copied())?,
        ))
    }
}

fn split_by<T, F, O>(window: &[DatedEntry<'_>], factor: F, outcome: O) -> Split<T>
where
    F: Fn(&JournalEntry) -> TriState,
    O: Fn(&JournalEntry) -> Option<T>,
{
    let mut split = Split {
        held: Vec::new(),
        not_held: Vec::new(),
    };
    for (_, entry) in window {
        let Some(value) = outcome(entry) else {
            continue;
        };
        match factor(entry) {
            TriState::True => split.held.push(value),
            TriState::False => split.not_held.push(value),
            TriState::Unset => {}
        }
    }
    split
}

/// Compare how often a behavior held in the older vs newer half of the window
fn behavior_trend<F>(window: &[DatedEntry<'_>], behavior: F) -> Option<PatternTrend>
where
    F: Fn(&JournalEntry) -> TriState,
{
    let (older, newer) = window.split_at(window.len() / 2);
    let recorded = |half: &[DatedEntry<'_>]| -> Vec<bool> {
        half.iter()
            .filter_map(|(_, entry)| behavior(entry).as_bool())
            .collect()
    };

    let older = recorded(older);
    let newer = recorded(newer);
    if older.len() < MIN_TREND_SAMPLES || newer.len() < MIN_TREND_SAMPLES {
        return None;
    }

    let change = rate(newer)? - rate(older)?;
    Some(if change > TREND_THRESHOLD {
        PatternTrend::Improving
    } else if change < -TREND_THRESHOLD {
        PatternTrend::Declining
    } else {
        PatternTrend::Stable
    })
}

fn positive_pattern(
    factor: &str,
    impact: i32,
    description: String,
    samples: usize,
    trend: Option<PatternTrend>,
) -> Option<Pattern> {
    if impact <= 0 {
        return None;
    }
    Some(Pattern {
        direction: PatternDirection::Positive,
        factor: factor.to_string(),
        impact,
        description,
        confidence: confidence_for_samples(samples),
        trend,
    })
}

/// `cost` is the size of the harm as a positive number; stored negated
fn challenging_pattern(
    factor: &str,
    cost: i32,
    description: String,
    samples: usize,
    trend: Option<PatternTrend>,
) -> Option<Pattern> {
    if cost <= 0 {
        return None;
    }
    Some(Pattern {
        direction: PatternDirection::Challenging,
        factor: factor.to_string(),
        impact: -cost,
        description,
        confidence: confidence_for_samples(samples),
        trend,
    })
}

// ============================================================================
// Outcomes and derived factors
// ============================================================================

fn had_cravings(entry: &JournalEntry) -> Option<bool> {
    entry.had_cravings.as_bool()
}

fn craving_free(entry: &JournalEntry) -> Option<bool> {
    entry.had_cravings.as_bool().map(|c| !c)
}

fn positive_mood(entry: &JournalEntry) -> Option<bool> {
    entry.positive_mood.as_bool()
}

fn energy(entry: &JournalEntry) -> Option<f64> {
    entry.energy().map(f64::from)
}

/// 7-9 hours is the optimal window, under 6 or over 9 is not, 6-7 is neither
fn optimal_sleep(entry: &JournalEntry) -> TriState {
    match entry.sleep() {
        Some(hours) if (7.0..=9.0).contains(&hours) => TriState::True,
        Some(hours) if hours < 6.0 || hours > 9.0 => TriState::False,
        _ => TriState::Unset,
    }
}

/// Exercise, meditation and good sleep on the same day
fn morning_routine(entry: &JournalEntry) -> TriState {
    let meditated = TriState::from(entry.meditation_minutes.map(|m| m > 0));
    let parts = [entry.exercised, meditated, entry.sleep_quality];

    if parts.iter().all(TriState::is_true) {
        TriState::True
    } else if parts.iter().any(TriState::is_false) {
        TriState::False
    } else {
        TriState::Unset
    }
}

// ============================================================================
// Positive factors
// ============================================================================

fn sleep_quality_vs_cravings(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, |e| e.sleep_quality, had_cravings);
    let Some((good_sleep, poor_sleep)) = split.rates(MIN_GROUP, MIN_GROUP) else {
        tracing::debug!(factor = "sleep_quality", "Not enough samples");
        return None;
    };

    let impact = percentage_points(poor_sleep - good_sleep);
    positive_pattern(
        "Good sleep quality",
        impact,
        format!(
            "You had cravings on {}% fewer days when you slept well",
            impact
        ),
        split.samples(),
        behavior_trend(window, |e| e.sleep_quality),
    )
}

fn exercise_vs_energy(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, |e| e.exercised, energy);
    let (active, rest) = split.means(MIN_GROUP, MIN_GROUP)?;

    let impact = relative_percent(active, rest)?;
    positive_pattern(
        "Exercise",
        impact,
        format!("Your energy is {}% higher on days you exercise", impact),
        split.samples(),
        behavior_trend(window, |e| e.exercised),
    )
}

fn exercise_vs_mood(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, |e| e.exercised, positive_mood);
    let (active, rest) = split.rates(MIN_GROUP, MIN_GROUP)?;

    let impact = percentage_points(active - rest);
    positive_pattern(
        "Exercise and mood",
        impact,
        format!(
            "Your mood was positive on {}% more days when you exercised",
            impact
        ),
        split.samples(),
        behavior_trend(window, |e| e.exercised),
    )
}

fn sleep_window_vs_energy(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, optimal_sleep, energy);
    let Some((optimal, other)) = split.means(MIN_OPTIMAL_SLEEP_DAYS, MIN_GROUP) else {
        tracing::debug!(
            factor = "sleep_window",
            optimal_days = split.held.len(),
            "Not enough samples"
        );
        return None;
    };

    let impact = relative_percent(optimal, other)?;
    positive_pattern(
        "7-9 hours of sleep",
        impact,
        format!(
            "Sleeping 7-9 hours gives you {}% more energy than shorter or longer nights",
            impact
        ),
        split.samples(),
        behavior_trend(window, optimal_sleep),
    )
}

fn morning_routine_vs_cravings(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, morning_routine, craving_free);
    let Some((routine, other)) = split.rates(MIN_ROUTINE_DAYS, 1) else {
        tracing::debug!(
            factor = "morning_routine",
            routine_days = split.held.len(),
            "Not enough samples"
        );
        return None;
    };

    let impact = percentage_points(routine - other);
    positive_pattern(
        "Complete morning routine",
        impact,
        format!(
            "Days with exercise, meditation and good sleep were craving-free {}% more often",
            impact
        ),
        split.samples(),
        behavior_trend(window, morning_routine),
    )
}

// ============================================================================
// Challenging factors
// ============================================================================

fn stress_vs_cravings(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, |e| e.high_stress, had_cravings);
    let (stressed, calm) = split.rates(MIN_GROUP, MIN_GROUP)?;

    let cost = percentage_points(stressed - calm);
    challenging_pattern(
        "High stress",
        cost,
        format!("High-stress days had {}% more cravings", cost),
        split.samples(),
        behavior_trend(window, |e| !e.high_stress),
    )
}

fn low_support_vs_mood(window: &[DatedEntry<'_>]) -> Option<Pattern> {
    let split = split_by(window, |e| e.social_support, positive_mood);
    let (supported, alone) = split.rates(MIN_GROUP, MIN_GROUP)?;

    let cost = percentage_points(supported - alone);
    challenging_pattern(
        "Low social support",
        cost,
        format!(
            "Your mood was positive on {}% fewer days without social support",
            cost
        ),
        split.samples(),
        behavior_trend(window, |e| e.social_support),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryCollection;
    use chrono::{Duration, NaiveDate};

    fn collection(entries: Vec<JournalEntry>) -> EntryCollection {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| (start + Duration::days(i as i64), e))
            .collect()
    }

    fn entry(f: impl FnOnce(&mut JournalEntry)) -> JournalEntry {
        let mut e = JournalEntry::default();
        f(&mut e);
        e
    }

    fn patterns_for(entries: Vec<JournalEntry>) -> PatternSet {
        let collection = collection(entries);
        let normalized = NormalizedEntries::from_collection(&collection);
        calculate_patterns(&normalized)
    }

    #[test]
    fn test_sleep_quality_reduces_cravings() {
        let mut entries = Vec::new();
        for _ in 0..5 {
            entries.push(entry(|e| {
                e.sleep_quality = TriState::True;
                e.had_cravings = TriState::False;
            }));
        }
        for _ in 0..5 {
            entries.push(entry(|e| {
                e.sleep_quality = TriState::False;
                e.had_cravings = TriState::True;
            }));
        }

        let patterns = patterns_for(entries);
        let top = patterns.strongest_positive().unwrap();
        assert_eq!(top.factor, "Good sleep quality");
        assert_eq!(top.impact, 100);
        assert_eq!(top.confidence, 70);
        assert_eq!(top.direction, PatternDirection::Positive);
        assert!(patterns.challenging.is_empty());
    }

    #[test]
    fn test_unset_is_excluded_not_false() {
        // Poor-sleep group only has one recorded day; the unset days must not fill it
        let mut entries = Vec::new();
        for _ in 0..5 {
            entries.push(entry(|e| {
                e.sleep_quality = TriState::True;
                e.had_cravings = TriState::False;
            }));
        }
        for _ in 0..5 {
            entries.push(entry(|e| e.had_cravings = TriState::True));
        }
        entries.push(entry(|e| {
            e.sleep_quality = TriState::False;
            e.had_cravings = TriState::True;
        }));

        let patterns = patterns_for(entries);
        assert!(patterns
            .positive
            .iter()
            .all(|p| p.factor != "Good sleep quality"));
    }

    #[test]
    fn test_exercise_energy_is_relative() {
        let mut entries = Vec::new();
        for _ in 0..3 {
            entries.push(entry(|e| {
                e.exercised = TriState::True;
                e.energy_level = Some(6);
            }));
            entries.push(entry(|e| {
                e.exercised = TriState::False;
                e.energy_level = Some(4);
            }));
        }

        let patterns = patterns_for(entries);
        let exercise = patterns
            .positive
            .iter()
            .find(|p| p.factor == "Exercise")
            .unwrap();
        assert_eq!(exercise.impact, 50);
        assert_eq!(exercise.confidence, 50);
    }

    #[test]
    fn test_no_pattern_when_factor_does_not_help() {
        let mut entries = Vec::new();
        for _ in 0..4 {
            entries.push(entry(|e| {
                e.exercised = TriState::True;
                e.positive_mood = TriState::False;
            }));
            entries.push(entry(|e| {
                e.exercised = TriState::False;
                e.positive_mood = TriState::True;
            }));
        }

        let patterns = patterns_for(entries);
        assert!(patterns.positive.is_empty());
    }

    #[test]
    fn test_challenging_patterns_are_negative() {
        let mut entries = Vec::new();
        for _ in 0..4 {
            entries.push(entry(|e| {
                e.high_stress = TriState::True;
                e.had_cravings = TriState::True;
                e.social_support = TriState::False;
                e.positive_mood = TriState::False;
            }));
            entries.push(entry(|e| {
                e.high_stress = TriState::False;
                e.had_cravings = TriState::False;
                e.social_support = TriState::True;
                e.positive_mood = TriState::True;
            }));
        }

        let patterns = patterns_for(entries);
        assert_eq!(patterns.challenging.len(), 2);
        for pattern in &patterns.challenging {
            assert_eq!(pattern.direction, PatternDirection::Challenging);
            assert_eq!(pattern.impact, -100);
        }
        assert!(patterns
            .challenging
            .windows(2)
            .all(|w| w[0].score() <= w[1].score()));
    }

    #[test]
    fn test_sleep_window_gated_by_tier() {
        let optimal_and_short = |i: usize| {
            entry(move |e| {
                if i % 2 == 0 {
                    e.sleep_hours = Some(8.0);
                    e.energy_level = Some(8);
                } else {
                    e.sleep_hours = Some(5.0);
                    e.energy_level = Some(4);
                }
            })
        };

        // 20 entries: limited tier, window factor not evaluated
        let limited = patterns_for((0..20).map(optimal_and_short).collect());
        assert!(limited
            .positive
            .iter()
            .all(|p| p.factor != "7-9 hours of sleep"));

        // 40 entries: good tier
        let good = patterns_for((0..40).map(optimal_and_short).collect());
        let window = good
            .positive
            .iter()
            .find(|p| p.factor == "7-9 hours of sleep")
            .unwrap();
        assert_eq!(window.impact, 100);
        assert_eq!(window.confidence, 85);
        assert_eq!(window.trend, Some(PatternTrend::Stable));
    }

    #[test]
    fn test_sleep_window_needs_five_optimal_days() {
        let mut entries: Vec<JournalEntry> = (0..36)
            .map(|_| entry(|e| e.sleep_hours = Some(6.5)))
            .collect();
        for _ in 0..4 {
            entries.push(entry(|e| {
                e.sleep_hours = Some(8.0);
                e.energy_level = Some(9);
            }));
        }
        for _ in 0..3 {
            entries.push(entry(|e| {
                e.sleep_hours = Some(4.0);
                e.energy_level = Some(3);
            }));
        }

        let patterns = patterns_for(entries);
        assert!(patterns
            .positive
            .iter()
            .all(|p| p.factor != "7-9 hours of sleep"));
    }

    #[test]
    fn test_morning_routine_only_for_excellent() {
        let routine = |i: usize| {
            entry(move |e| {
                if i % 2 == 0 {
                    e.exercised = TriState::True;
                    e.meditation_minutes = Some(10);
                    e.sleep_quality = TriState::True;
                    e.had_cravings = TriState::False;
                } else {
                    e.exercised = TriState::False;
                    e.had_cravings = TriState::True;
                }
            })
        };

        let good = patterns_for((0..60).map(routine).collect());
        assert!(good
            .positive
            .iter()
            .all(|p| p.factor != "Complete morning routine"));

        let excellent = patterns_for((0..120).map(routine).collect());
        let found = excellent
            .positive
            .iter()
            .find(|p| p.factor == "Complete morning routine")
            .unwrap();
        assert_eq!(found.impact, 100);
    }

    fn sleep_window_entries(optimal_days: usize) -> Vec<JournalEntry> {
        let mut entries: Vec<JournalEntry> = (0..40 - 3 - optimal_days)
            .map(|_| entry(|e| e.sleep_hours = Some(6.5)))
            .collect();
        for _ in 0..optimal_days {
            entries.push(entry(|e| {
                e.sleep_hours = Some(8.0);
                e.energy_level = Some(9);
            }));
        }
        for _ in 0..3 {
            entries.push(entry(|e| {
                e.sleep_hours = Some(4.0);
                e.energy_level = Some(3);
            }));
        }
        entries
    }

    #[test]
    fn test_sleep_window_boundary_at_five_days() {
        let four = patterns_for(sleep_window_entries(4));
        assert!(four.positive.iter().all(|p| p.factor != "7-9 hours of sleep"));

        let five = patterns_for(sleep_window_entries(5));
        let found = five
            .positive
            .iter()
            .find(|p| p.factor == "7-9 hours of sleep")
            .unwrap();
        assert_eq!(found.impact, 200);
        assert_eq!(found.confidence, 50);
    }

    fn routine_entries(routine_days: usize) -> Vec<JournalEntry> {
        let mut entries = vec![JournalEntry::default(); 90];
        for i in 0..30 {
            entries.push(entry(|e| {
                if i < routine_days {
                    e.exercised = TriState::True;
                    e.meditation_minutes = Some(15);
                    e.sleep_quality = TriState::True;
                    e.had_cravings = TriState::False;
                } else {
                    e.exercised = TriState::False;
                    e.had_cravings = TriState::True;
                }
            }));
        }
        entries
    }

    #[test]
    fn test_morning_routine_boundary_at_five_days() {
        let four = patterns_for(routine_entries(4));
        assert!(four
            .positive
            .iter()
            .all(|p| p.factor != "Complete morning routine"));

        let five = patterns_for(routine_entries(5));
        let found = five
            .positive
            .iter()
            .find(|p| p.factor == "Complete morning routine")
            .unwrap();
        assert_eq!(found.impact, 100);
        assert_eq!(found.confidence, 85);
    }

    #[test]
    fn test_morning_routine_tristate() {
        let complete = entry(|e| {
            e.exercised = TriState::True;
            e.meditation_minutes = Some(5);
            e.sleep_quality = TriState::True;
        });
        assert_eq!(morning_routine(&complete), TriState::True);

        let no_meditation = entry(|e| {
            e.exercised = TriState::True;
            e.meditation_minutes = Some(0);
        });
        assert_eq!(morning_routine(&no_meditation), TriState::False);

        let unknown = entry(|e| e.exercised = TriState::True);
        assert_eq!(morning_routine(&unknown), TriState::Unset);
    }

    #[test]
    fn test_optimal_sleep_buckets() {
        let hours = |h: f64| optimal_sleep(&entry(|e| e.sleep_hours = Some(h)));
        assert_eq!(hours(7.0), TriState::True);
        assert_eq!(hours(9.0), TriState::True);
        assert_eq!(hours(5.5), TriState::False);
        assert_eq!(hours(9.5), TriState::False);
        assert_eq!(hours(6.5), TriState::Unset);
        assert_eq!(optimal_sleep(&JournalEntry::default()), TriState::Unset);
    }

    #[test]
    fn test_positive_ranking_within_cap() {
        // All three limited-tier factors fire
        let mut entries = Vec::new();
        for _ in 0..6 {
            entries.push(entry(|e| {
                e.sleep_quality = TriState::True;
                e.had_cravings = TriState::False;
                e.exercised = TriState::True;
                e.energy_level = Some(8);
                e.positive_mood = TriState::True;
            }));
            entries.push(entry(|e| {
                e.sleep_quality = TriState::False;
                e.had_cravings = TriState::True;
                e.exercised = TriState::False;
                e.energy_level = Some(4);
                e.positive_mood = TriState::False;
            }));
        }

        let patterns = patterns_for(entries);
        assert_eq!(patterns.positive.len(), 3);
        assert!(patterns
            .positive
            .windows(2)
            .all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn test_behavior_trend() {
        let window_entries: Vec<JournalEntry> = (0..10)
            .map(|i| entry(move |e| e.exercised = TriState::from(i >= 5)))
            .collect();
        let collection = collection(window_entries);
        let normalized = NormalizedEntries::from_collection(&collection);

        assert_eq!(
            behavior_trend(normalized.recent(), |e| e.exercised),
            Some(PatternTrend::Improving)
        );
        assert_eq!(
            behavior_trend(normalized.recent(), |e| !e.exercised),
            Some(PatternTrend::Declining)
        );
        assert_eq!(behavior_trend(normalized.recent(), |e| e.high_stress), None);
    }
}
