//! Export and import commands

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use recovery_core::db::Database;
use recovery_core::export::{import_entries, write_export, ImportMode, ImportStats};

pub fn cmd_export(db: &Database, file: &Path) -> Result<usize> {
    let out = File::create(file).with_context(|| format!("Failed to create {}", file.display()))?;
    let count = write_export(db, BufWriter::new(out)).context("Failed to write export")?;

    println!("📤 Exported {} entries to {}", count, file.display());
    Ok(count)
}

pub fn cmd_import(db: &Database, file: &Path, replace: bool) -> Result<ImportStats> {
    let input = File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let stats = import_entries(db, BufReader::new(input), mode)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!("📥 Imported {} entries from {}", stats.imported, file.display());
    if stats.replaced > 0 {
        println!("   {} existing days overwritten", stats.replaced);
    }
    if stats.cleared > 0 {
        println!("   {} previous entries cleared (--replace)", stats.cleared);
    }
    Ok(stats)
}
