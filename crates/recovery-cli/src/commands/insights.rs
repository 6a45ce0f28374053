//! Insight report command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use recovery_core::db::Database;
use recovery_core::insights::{generate_insights_at, InsightsData, MIN_ENTRIES_FOR_ANALYSIS};

pub fn cmd_insights(db: &Database, json: bool, today: Option<NaiveDate>) -> Result<InsightsData> {
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let entries = db.list_entries().context("Failed to load journal")?;

    let data = generate_insights_at(&entries, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_report(&data);
    }

    Ok(data)
}

fn print_report(data: &InsightsData) {
    println!();
    println!("🧭 Recovery Insights");
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Entries: {}   Data quality: {}   Last entry: {}",
        data.entry_count, data.data_quality, data.last_updated
    );

    if data.entry_count < MIN_ENTRIES_FOR_ANALYSIS {
        println!();
        println!(
            "   Log at least {} entries to unlock insights ({} more to go).",
            MIN_ENTRIES_FOR_ANALYSIS,
            MIN_ENTRIES_FOR_ANALYSIS - data.entry_count
        );
        println!();
        return;
    }

    println!();
    for insight in &data.insights {
        println!("   {} {}", insight.icon, insight.title);
        println!("      {}", insight.description);
    }

    if !data.positive_patterns.is_empty() {
        println!();
        println!("   What helps");
        for p in &data.positive_patterns {
            println!(
                "   ✅ {}: {} ({}% confidence)",
                p.factor, p.description, p.confidence
            );
        }
    }

    if !data.challenging_patterns.is_empty() {
        println!();
        println!("   What's hard");
        for p in &data.challenging_patterns {
            println!(
                "   ⚠️  {}: {} ({}% confidence)",
                p.factor, p.description, p.confidence
            );
        }
    }
    println!();
}
