//! Recovery Journal Core Library
//!
//! Shared functionality for the recovery journal:
//! - Journal entry model with explicit "not recorded" answers
//! - Insights engine: patterns and prioritized insights from entries
//! - Encrypted journal store with connection pooling
//! - JSON export and import
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;

pub use config::AppConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use export::{ImportMode, ImportStats, JournalExport};
pub use insights::{generate_insights, generate_insights_at, InsightsData};
pub use models::{EntryCollection, JournalEntry, TriState};
