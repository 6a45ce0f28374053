//! Insight Engine - composes normalizer, pattern calculator and synthesizer

use chrono::NaiveDate;

use crate::models::EntryCollection;

use super::normalizer::NormalizedEntries;
use super::patterns::calculate_patterns;
use super::synthesizer::{InsightPipeline, RuleContext};
use super::types::{DataQuality, InsightsData};

/// The main insight engine. Holds the rule pipeline and nothing else.
pub struct InsightEngine {
    pipeline: InsightPipeline,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the built-in rule pipeline
    pub fn new() -> Self {
        Self::with_pipeline(InsightPipeline::new())
    }

    pub fn with_pipeline(pipeline: InsightPipeline) -> Self {
        Self { pipeline }
    }

    /// Analyze `entries` as of `today`
    pub fn analyze(&self, entries: &EntryCollection, today: NaiveDate) -> InsightsData {
        let normalized = NormalizedEntries::from_collection(entries);
        let last_updated = normalized.last_updated(today);

        if normalized.is_insufficient() {
            tracing::debug!(
                entries = normalized.count(),
                "Not enough entries for analysis"
            );
            return InsightsData {
                entry_count: normalized.count(),
                last_updated,
                positive_patterns: vec![],
                challenging_patterns: vec![],
                insights: vec![],
                data_quality: DataQuality::Limited,
            };
        }

        let patterns = calculate_patterns(&normalized);
        let insights = self
            .pipeline
            .run(&RuleContext::new(&normalized, &patterns));

        tracing::debug!(
            entries = normalized.count(),
            tier = normalized.data_quality.as_str(),
            positive = patterns.positive.len(),
            challenging = patterns.challenging.len(),
            insights = insights.len(),
            "Insight analysis complete"
        );

        InsightsData {
            entry_count: normalized.count(),
            last_updated,
            positive_patterns: patterns.positive,
            challenging_patterns: patterns.challenging,
            insights,
            data_quality: normalized.data_quality,
        }
    }
}

/// Analyze `entries` as of the local calendar day
pub fn generate_insights(entries: &EntryCollection) -> InsightsData {
    generate_insights_at(entries, chrono::Local::now().date_naive())
}

/// Analyze `entries` with a frozen clock. Same input, same output.
pub fn generate_insights_at(entries: &EntryCollection, today: NaiveDate) -> InsightsData {
    InsightEngine::new().analyze(entries, today)
}
