//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db)
//! - `entries` - Log, show, list and delete journal entries
//! - `insights` - Pattern and insight report
//! - `export` - JSON export and import
//! - `serve` - Web server command
//! - `status` - Journal status

pub mod core;
pub mod entries;
pub mod export;
pub mod insights;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use core::*;
pub use entries::*;
pub use export::*;
pub use insights::*;
pub use serve::*;
pub use status::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
