//! Server command implementation

use std::path::Path;

use anyhow::Result;
use recovery_core::config::ServerSettings;

use super::open_db;

pub async fn cmd_serve(db_path: &Path, no_encrypt: bool, settings: &ServerSettings) -> Result<()> {
    println!("🚀 Starting recovery journal server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", settings.host, settings.port);
    if let Some(dir) = &settings.static_dir {
        println!("   Static files: {}", dir.display());
    }
    if settings.allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", settings.allowed_origins.join(", "));
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = recovery_server::ServerConfig {
        allowed_origins: settings.allowed_origins.clone(),
    };

    recovery_server::serve(
        db,
        &settings.host,
        settings.port,
        settings.static_dir.as_deref(),
        config,
    )
    .await?;

    Ok(())
}
