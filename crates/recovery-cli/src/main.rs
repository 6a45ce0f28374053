//! Recovery Journal CLI
//!
//! Usage:
//!   recovery init                         Initialize the journal
//!   recovery log --cravings no --energy 7 Record today's answers
//!   recovery insights                     Patterns and insights
//!   recovery serve --port 3000            Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use recovery_core::config::AppConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let db_path = cli.db.clone().unwrap_or_else(|| config.database.path.clone());
    tracing::debug!(db = %db_path.display(), "Resolved journal path");

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path, cli.no_encrypt),
        Commands::Log(args) => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            let date = args
                .date
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            commands::cmd_log(&db, date, &args.to_entry()).map(|_| ())
        }
        Commands::Show { date } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_show(&db, date)
        }
        Commands::Entries { limit } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_entries(&db, limit)
        }
        Commands::Delete { date } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_delete(&db, date)
        }
        Commands::Insights { json, today } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_insights(&db, json, today).map(|_| ())
        }
        Commands::Export { file } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_export(&db, &file).map(|_| ())
        }
        Commands::Import { file, replace } => {
            let db = commands::open_db(&db_path, cli.no_encrypt)?;
            commands::cmd_import(&db, &file, replace).map(|_| ())
        }
        Commands::Status => commands::cmd_status(&db_path, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let mut settings = config.server.clone();
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(dir) = static_dir {
                settings.static_dir = Some(dir);
            }
            commands::cmd_serve(&db_path, cli.no_encrypt, &settings).await
        }
    }
}
