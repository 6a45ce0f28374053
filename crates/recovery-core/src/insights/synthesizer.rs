//! Insight synthesizer
//!
//! A fixed pipeline of independent rules. Each rule looks at the entries, the
//! calculated patterns and the insights produced before it, and returns zero
//! or more candidates. The pipeline then sorts all candidates by priority and
//! truncates to the tier's cap in one step.

use std::fmt;

use crate::models::JournalEntry;

use super::normalizer::{DatedEntry, NormalizedEntries, RECENT_WINDOW};
use super::patterns::PatternSet;
use super::stats::{percentage_points, rate};
use super::types::{DataQuality, Insight, InsightCategory};

/// Entries compared at each end of the history for the craving trend
const TREND_SPAN: usize = 30;

/// Minimum qualifying days for a co-occurrence insight
const MIN_CORRELATION_SAMPLES: usize = 10;

/// Craving-free share of good-sleep days needed to call it out
const SLEEP_CRAVING_THRESHOLD: f64 = 0.6;

/// Positive-mood share of exercise days needed to call it out
const EXERCISE_MOOD_THRESHOLD: f64 = 0.5;

/// Confidence the strongest pattern needs to be highlighted
const TOP_PATTERN_MIN_CONFIDENCE: u8 = 70;

/// Entries scanned for a challenging streak
const STREAK_WINDOW: usize = 7;

/// Conditions that must hold at once for a day to count as challenging
const CHALLENGING_CONDITIONS: usize = 3;

/// Consecutive challenging days that trigger a warning
const STREAK_WARNING_LENGTH: usize = 3;

/// Energy at or below this counts toward a challenging day
const LOW_ENERGY: u8 = 3;

/// Identifier for each synthesis rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    CravingTrend,
    SleepCravingCorrelation,
    ExerciseMoodCorrelation,
    TopPattern,
    ChallengingStreak,
    LimitedDataSummary,
    BuildingProfile,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::CravingTrend => "craving_trend",
            RuleId::SleepCravingCorrelation => "sleep_craving_correlation",
            RuleId::ExerciseMoodCorrelation => "exercise_mood_correlation",
            RuleId::TopPattern => "top_pattern",
            RuleId::ChallengingStreak => "challenging_streak",
            RuleId::LimitedDataSummary => "limited_data_summary",
            RuleId::BuildingProfile => "building_profile",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input shared by every rule in one synthesis run
pub struct RuleContext<'a> {
    pub entries: &'a NormalizedEntries<'a>,
    pub patterns: &'a PatternSet,
}

impl<'a> RuleContext<'a> {
    pub fn new(entries: &'a NormalizedEntries<'a>, patterns: &'a PatternSet) -> Self {
        Self { entries, patterns }
    }

    pub fn data_quality(&self) -> DataQuality {
        self.entries.data_quality
    }
}

/// A single insight-generation rule
pub trait InsightRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Candidate insights. `so_far` holds what earlier rules produced.
    fn evaluate(&self, ctx: &RuleContext<'_>, so_far: &[Insight]) -> Vec<Insight>;
}

/// Ordered rule pipeline with a single global sort and truncate
pub struct InsightPipeline {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightPipeline {
    /// Pipeline with the built-in rules in evaluation order
    pub fn new() -> Self {
        let mut pipeline = Self { rules: vec![] };

        pipeline.register(Box::new(CravingTrendRule));
        pipeline.register(Box::new(SleepCravingRule));
        pipeline.register(Box::new(ExerciseMoodRule));
        pipeline.register(Box::new(TopPatternRule));
        pipeline.register(Box::new(ChallengingStreakRule));
        pipeline.register(Box::new(LimitedDataSummaryRule));
        pipeline.register(Box::new(BuildingProfileRule));

        pipeline
    }

    /// Append a rule to the end of the pipeline
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule, then sort by priority (highest first) and cap by tier
    pub fn run(&self, ctx: &RuleContext<'_>) -> Vec<Insight> {
        let mut insights: Vec<Insight> = Vec::new();

        for rule in &self.rules {
            let produced = rule.evaluate(ctx, &insights);
            if !produced.is_empty() {
                tracing::debug!(
                    rule = rule.id().as_str(),
                    count = produced.len(),
                    "Insight rule fired"
                );
            }
            insights.extend(produced);
        }

        // Stable: equal priorities keep pipeline order
        insights.sort_by(|a, b| b.priority.cmp(&a.priority));
        insights.truncate(ctx.data_quality().profile().max_insights);
        insights
    }
}

fn craving_rate(entries: &[DatedEntry<'_>]) -> Option<f64> {
    rate(entries.iter().filter_map(|(_, e)| e.had_cravings.as_bool()))
}

// ============================================================================
// Rules
// ============================================================================

/// Craving rate of the first 30 entries vs the latest 30
pub struct CravingTrendRule;

impl InsightRule for CravingTrendRule {
    fn id(&self) -> RuleId {
        RuleId::CravingTrend
    }

    fn name(&self) -> &'static str {
        "Craving Trend"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, _so_far: &[Insight]) -> Vec<Insight> {
        if ctx.entries.count() < TREND_SPAN {
            return vec![];
        }

        let (Some(early), Some(recent)) = (
            craving_rate(ctx.entries.first(TREND_SPAN)),
            craving_rate(ctx.entries.last(TREND_SPAN)),
        ) else {
            return vec![];
        };

        let improvement = percentage_points(early - recent);
        if improvement <= 0 {
            return vec![];
        }

        vec![Insight::new(
            InsightCategory::Achievement,
            9,
            "📉",
            "Cravings Are Decreasing",
            format!(
                "Your craving days dropped by {} percentage points compared to your first {} entries",
                improvement, TREND_SPAN
            ),
        )]
    }
}

/// Share of good-sleep days that were craving-free
pub struct SleepCravingRule;

impl InsightRule for SleepCravingRule {
    fn id(&self) -> RuleId {
        RuleId::SleepCravingCorrelation
    }

    fn name(&self) -> &'static str {
        "Sleep and Cravings"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, _so_far: &[Insight]) -> Vec<Insight> {
        let craving_free: Vec<bool> = ctx
            .entries
            .recent()
            .iter()
            .filter(|(_, e)| e.sleep_quality.is_true())
            .filter_map(|(_, e)| e.had_cravings.as_bool().map(|c| !c))
            .collect();

        if craving_free.len() < MIN_CORRELATION_SAMPLES {
            return vec![];
        }
        let Some(share) = rate(craving_free) else {
            return vec![];
        };
        if share <= SLEEP_CRAVING_THRESHOLD {
            return vec![];
        }

        vec![Insight::new(
            InsightCategory::Correlation,
            8,
            "😴",
            "Sleep Protects You",
            format!(
                "{}% of your good-sleep days were craving-free",
                percentage_points(share)
            ),
        )]
    }
}

/// Share of exercise days with a positive mood
pub struct ExerciseMoodRule;

impl InsightRule for ExerciseMoodRule {
    fn id(&self) -> RuleId {
        RuleId::ExerciseMoodCorrelation
    }

    fn name(&self) -> &'static str {
        "Exercise and Mood"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, _so_far: &[Insight]) -> Vec<Insight> {
        let good_mood: Vec<bool> = ctx
            .entries
            .recent()
            .iter()
            .filter(|(_, e)| e.exercised.is_true())
            .filter_map(|(_, e)| e.positive_mood.as_bool())
            .collect();

        if good_mood.len() < MIN_CORRELATION_SAMPLES {
            return vec![];
        }
        let Some(share) = rate(good_mood) else {
            return vec![];
        };
        if share <= EXERCISE_MOOD_THRESHOLD {
            return vec![];
        }

        vec![Insight::new(
            InsightCategory::Correlation,
            7,
            "🏃",
            "Exercise Lifts Your Mood",
            format!(
                "Your mood was positive on {}% of the days you exercised",
                percentage_points(share)
            ),
        )]
    }
}

/// Call out the strongest positive pattern once it is confident enough
pub struct TopPatternRule;

impl InsightRule for TopPatternRule {
    fn id(&self) -> RuleId {
        RuleId::TopPattern
    }

    fn name(&self) -> &'static str {
        "Top Pattern"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, _so_far: &[Insight]) -> Vec<Insight> {
        let Some(top) = ctx.patterns.strongest_positive() else {
            return vec![];
        };
        if top.confidence < TOP_PATTERN_MIN_CONFIDENCE {
            return vec![];
        }

        vec![Insight::new(
            InsightCategory::Correlation,
            8,
            "💡",
            format!("Key Pattern: {}", top.factor),
            format!("{} ({}% confidence)", top.description, top.confidence),
        )]
    }
}

/// Warn about a run of hard days in the last week of entries
pub struct ChallengingStreakRule;

/// A day is challenging when several warning signs coincide, not just a low mood
pub fn is_challenging_day(entry: &JournalEntry) -> bool {
    let signs = [
        entry.had_cravings.is_true(),
        entry.high_stress.is_true(),
        entry.positive_mood.is_false(),
        entry.sleep_quality.is_false(),
        entry.energy().is_some_and(|e| e <= LOW_ENERGY),
    ];
    signs.iter().filter(|s| **s).count() >= CHALLENGING_CONDITIONS
}

/// Longest run of consecutive challenging entries
pub fn longest_challenging_run(entries: &[DatedEntry<'_>]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for (_, entry) in entries {
        if is_challenging_day(entry) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

impl InsightRule for ChallengingStreakRule {
    fn id(&self) -> RuleId {
        RuleId::ChallengingStreak
    }

    fn name(&self) -> &'static str {
        "Challenging Streak"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, _so_far: &[Insight]) -> Vec<Insight> {
        let run = longest_challenging_run(ctx.entries.last(STREAK_WINDOW));
        if run < STREAK_WARNING_LENGTH {
            return vec![];
        }

        vec![Insight::new(
            InsightCategory::Warning,
            10,
            "⚠️",
            "Tough Stretch",
            format!(
                "You've had {} challenging days in a row. Consider reaching out to your support network.",
                run
            ),
        )]
    }
}

/// Simple counts for new users before patterns become meaningful
pub struct LimitedDataSummaryRule;

impl InsightRule for LimitedDataSummaryRule {
    fn id(&self) -> RuleId {
        RuleId::LimitedDataSummary
    }

    fn name(&self) -> &'static str {
        "Limited Data Summary"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, so_far: &[Insight]) -> Vec<Insight> {
        if ctx.data_quality() != DataQuality::Limited || !so_far.is_empty() {
            return vec![];
        }

        let entries = &ctx.entries.entries;
        let total = entries.len();
        let count = |pred: fn(&JournalEntry) -> bool| {
            entries.iter().filter(|(_, e)| pred(e)).count()
        };

        let craving_free = count(|e| e.had_cravings.is_false());
        let good_mood = count(|e| e.positive_mood.is_true());
        let active = count(|e| e.exercised.is_true());

        let mut insights = Vec::new();
        if craving_free > 0 {
            insights.push(Insight::new(
                InsightCategory::Achievement,
                7,
                "🌟",
                format!("{} Craving-Free Days", craving_free),
                format!(
                    "You've stayed craving-free on {} of your {} logged days",
                    craving_free, total
                ),
            ));
        }
        if good_mood > 0 {
            insights.push(Insight::new(
                InsightCategory::Trend,
                6,
                "😊",
                format!("{} Positive Mood Days", good_mood),
                format!(
                    "You felt positive on {} of your {} logged days",
                    good_mood, total
                ),
            ));
        }
        if active > 0 {
            insights.push(Insight::new(
                InsightCategory::Achievement,
                5,
                "💪",
                format!("{} Active Days", active),
                format!("You exercised on {} of your {} logged days", active, total),
            ));
        }
        insights
    }
}

/// Last resort so the list is never empty past the entry gate
pub struct BuildingProfileRule;

impl InsightRule for BuildingProfileRule {
    fn id(&self) -> RuleId {
        RuleId::BuildingProfile
    }

    fn name(&self) -> &'static str {
        "Building Your Profile"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, so_far: &[Insight]) -> Vec<Insight> {
        if !so_far.is_empty() {
            return vec![];
        }

        let count = ctx.entries.count();
        let description = if count < RECENT_WINDOW {
            format!(
                "You've logged {} entries. {} more until the {}-entry milestone unlocks deeper pattern analysis.",
                count,
                RECENT_WINDOW - count,
                RECENT_WINDOW
            )
        } else {
            format!(
                "You've logged {} entries and passed the {}-entry milestone. Keep logging to sharpen your patterns.",
                count, RECENT_WINDOW
            )
        };

        vec![Insight::new(
            InsightCategory::Trend,
            5,
            "📊",
            "Building Your Profile",
            description,
        )]
    }
}
