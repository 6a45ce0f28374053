//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the journal
//! - `cmd_init` - Initialize the journal

use std::path::Path;

use anyhow::{Context, Result};
use recovery_core::db::{Database, DB_KEY_ENV};

/// Open the journal with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open journal (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open journal")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing journal at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let existing = db.count_entries()?;
    if existing > 0 {
        println!("   Found {} existing entries", existing);
    }

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED ({})", DB_KEY_ENV);
    }

    println!("✅ Journal ready!");
    println!();
    println!("Next steps:");
    println!("  1. Log today: recovery log --cravings no --good-sleep yes --energy 7");
    println!("  2. After 5 entries: recovery insights");
    println!("  3. Start web UI: recovery serve");

    Ok(())
}
