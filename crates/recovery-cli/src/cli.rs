//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{builder::BoolishValueParser, Args, Parser, Subcommand};

use recovery_core::models::{JournalEntry, TriState};

/// Recovery Journal - daily check-ins and the patterns behind them
#[derive(Parser)]
#[command(name = "recovery")]
#[command(about = "Private recovery journal with pattern insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the configured journal location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to <data dir>/recovery-journal/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended)
    ///
    /// By default, the journal is encrypted using SQLCipher.
    /// Set RECOVERY_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the journal
    Init,

    /// Record answers for a day (merged into any existing entry)
    Log(LogArgs),

    /// Show one day's entry
    Show {
        /// Day to show (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },

    /// List recent entries, newest first
    Entries {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "14")]
        limit: usize,
    },

    /// Delete one day's entry
    Delete {
        /// Day to delete (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },

    /// Show patterns and insights from your journal
    Insights {
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,

        /// Reference day for "last updated" (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Export the journal as JSON
    Export {
        /// Output file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Import a JSON export (or a bare date-keyed entry object)
    Import {
        /// Input file
        #[arg(short, long)]
        file: PathBuf,

        /// Clear the journal before importing
        #[arg(long)]
        replace: bool,
    },

    /// Show journal status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Directory of static frontend files
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

/// Answers for `recovery log`. Anything not passed stays unrecorded.
///
/// Yes/no questions accept yes, no, true, false, 1 or 0.
#[derive(Args, Debug, Default, Clone)]
pub struct LogArgs {
    /// Day to record (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub positive_mood: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub cravings: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub high_stress: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub good_sleep: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub breathing: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub mood_swings: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub irritability: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub exercised: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub headaches: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub social_support: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub avoided_triggers: Option<bool>,
    #[arg(long, value_name = "YES/NO", value_parser = BoolishValueParser::new())]
    pub productive: Option<bool>,

    /// Craving intensity, 1-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub craving_intensity: Option<u8>,
    /// Anxiety level, 1-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub anxiety: Option<u8>,
    /// Energy level, 1-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub energy: Option<u8>,
    /// Concentration, 1-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub concentration: Option<u8>,
    /// Appetite, 1-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub appetite: Option<u8>,

    /// Hours slept
    #[arg(long)]
    pub sleep_hours: Option<f64>,
    #[arg(long)]
    pub meditation_minutes: Option<u32>,
    #[arg(long)]
    pub water_glasses: Option<u32>,
    #[arg(long)]
    pub exercise_minutes: Option<u32>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl LogArgs {
    /// The answers as a partial entry
    pub fn to_entry(&self) -> JournalEntry {
        JournalEntry {
            positive_mood: TriState::from(self.positive_mood),
            had_cravings: TriState::from(self.cravings),
            high_stress: TriState::from(self.high_stress),
            sleep_quality: TriState::from(self.good_sleep),
            used_breathing: TriState::from(self.breathing),
            mood_swings: TriState::from(self.mood_swings),
            irritability: TriState::from(self.irritability),
            exercised: TriState::from(self.exercised),
            had_headaches: TriState::from(self.headaches),
            social_support: TriState::from(self.social_support),
            avoided_triggers: TriState::from(self.avoided_triggers),
            productive_day: TriState::from(self.productive),
            craving_intensity: self.craving_intensity,
            anxiety_level: self.anxiety,
            energy_level: self.energy,
            concentration: self.concentration,
            appetite: self.appetite,
            sleep_hours: self.sleep_hours,
            meditation_minutes: self.meditation_minutes,
            water_glasses: self.water_glasses,
            exercise_minutes: self.exercise_minutes,
            notes: self.notes.clone(),
        }
    }
}
