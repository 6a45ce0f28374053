//! Status command implementation

use std::fs;
use std::path::Path;

use anyhow::Result;
use recovery_core::db::DB_KEY_ENV;
use recovery_core::insights::normalizer::relative_day_label;
use recovery_core::insights::{DataQuality, MIN_ENTRIES_FOR_ANALYSIS};

use super::open_db;

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!();
    println!("📊 Recovery Journal Status");
    println!("   ─────────────────────────────────────────────");
    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (journal not initialized, run 'recovery init')");
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                let count = db.count_entries()?;
                let today = chrono::Local::now().date_naive();

                println!();
                println!("   Entries: {}", count);
                println!("   Data quality: {}", DataQuality::for_count(count));
                match db.latest_entry_date()? {
                    Some(date) => println!(
                        "   Last entry: {} ({})",
                        date,
                        relative_day_label(date, today)
                    ),
                    None => println!("   Last entry: Never"),
                }
                if count < MIN_ENTRIES_FOR_ANALYSIS {
                    println!(
                        "   💡 {} more entries until insights unlock",
                        MIN_ENTRIES_FOR_ANALYSIS - count
                    );
                }
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening journal: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
