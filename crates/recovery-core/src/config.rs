//! Application configuration
//!
//! Loaded from an optional TOML override (explicit path, else the user's data
//! directory), applied over the built-in defaults in `config/recovery.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Built-in defaults, shipped with the source tree
const DEFAULT_CONFIG: &str = include_str!("../../../config/recovery.toml");

/// Application directory under the platform data dir
const APP_DIR: &str = "recovery-journal";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Empty: same-origin only
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: default_database_path(),
            },
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
                allowed_origins: vec![],
                static_dir: None,
            },
        }
    }
}

impl AppConfig {
    /// Load defaults, then the override at `path` or the default override location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = parse_config(DEFAULT_CONFIG)?;

        let override_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(p) = override_path {
            let content = fs::read_to_string(&p)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", p.display(), e)))?;
            apply_config(&mut config, &content)?;
            tracing::debug!(path = %p.display(), "Loaded config override");
        }

        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default journal location, falling back to the working directory
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join("journal.db"))
        .unwrap_or_else(|| PathBuf::from("journal.db"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: Option<RawDatabase>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatabase {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
    static_dir: Option<PathBuf>,
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let mut config = AppConfig::default();
    apply_config(&mut config, content)?;
    Ok(config)
}

/// Apply every key present in `content` over `config`
fn apply_config(config: &mut AppConfig, content: &str) -> Result<()> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(database) = raw.database {
        if let Some(path) = database.path {
            config.database.path = path;
        }
    }

    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
        if let Some(origins) = server.allowed_origins {
            config.server.allowed_origins = origins;
        }
        if let Some(dir) = server.static_dir {
            config.server.static_dir = Some(dir);
        }
    }

    Ok(())
}
