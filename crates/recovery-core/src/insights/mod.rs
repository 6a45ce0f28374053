//! Insights Engine - patterns and insights from journal entries
//!
//! A pure computation over an [`EntryCollection`](crate::models::EntryCollection).
//! It never touches storage and never fails for well-formed input.
//!
//! ## Stages
//!
//! - **Normalizer** orders entries, assigns the data-quality tier and renders
//!   the freshness label
//! - **Pattern calculator** compares outcomes across binary splits of the
//!   recent window
//! - **Synthesizer** runs a pipeline of rules, then sorts by priority and caps
//!   the list by tier
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recovery_core::insights::generate_insights_at;
//!
//! let entries = db.list_entries()?;
//! let data = generate_insights_at(&entries, today);
//! for insight in &data.insights {
//!     println!("{} {}", insight.icon, insight.title);
//! }
//! ```

pub mod engine;
pub mod normalizer;
pub mod patterns;
pub mod stats;
pub mod synthesizer;
pub mod types;

pub use engine::{generate_insights, generate_insights_at, InsightEngine};
pub use normalizer::{NormalizedEntries, MIN_ENTRIES_FOR_ANALYSIS, RECENT_WINDOW};
pub use patterns::{calculate_patterns, PatternSet};
pub use synthesizer::{InsightPipeline, InsightRule, RuleContext, RuleId};
pub use types::{
    DataQuality, Insight, InsightCategory, InsightsData, Pattern, PatternDirection, PatternTrend,
    TierProfile, TIER_PROFILES,
};
