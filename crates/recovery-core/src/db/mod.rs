//! Database access layer with connection pooling and migrations
//!
//! Organized by domain:
//! - `entries` - Journal entry CRUD and range queries

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::{Error, Result};

mod entries;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "RECOVERY_DB_KEY";

/// Derive an encryption key from a passphrase using Argon2
///
/// Fixed application salt: the same passphrase always yields the same key,
/// so the database file can be moved or restored freely.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Changing this invalidates every existing encrypted journal
    const APP_SALT: &[u8; 16] = b"recovery-journal";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    let output = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(output.as_bytes()))
}

/// Journal database with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
    encrypted: bool,
}

impl Database {
    /// Open an encrypted journal
    ///
    /// Requires `RECOVERY_DB_KEY`. The SQLCipher key is derived from the
    /// passphrase via Argon2id. Use `new_unencrypted()` for throwaway data.
    pub fn new(path: &str) -> Result<Self> {
        match std::env::var(DB_KEY_ENV) {
            Ok(key) => Self::new_with_key(path, Some(&key)),
            Err(_) => Err(Error::Encryption(format!(
                "Journal encryption required. Set {} with your passphrase, \
                or use --no-encrypt for an unencrypted journal.",
                DB_KEY_ENV
            ))),
        }
    }

    /// Open an unencrypted journal
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Open a journal with an explicit passphrase (or none)
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            // Every pooled connection needs the key before its first query
            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(8).build(manager)?
        } else {
            Pool::builder().max_size(8).build(manager)?
        };

        let db = Self {
            pool,
            db_path: path.to_string(),
            encrypted: passphrase.is_some(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Fresh unencrypted journal for tests
    ///
    /// Backed by a unique temp file: SQLCipher misbehaves with pooled `:memory:`.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "recovery_test_{}_{}.db",
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path.to_string_lossy())
    }

    /// Whether SQLCipher encryption is active on this journal
    pub fn is_encrypted(&self) -> Result<bool> {
        let conn = self.conn()?;
        // cipher_version only answers on a SQLCipher build
        let cipher: rusqlite::Result<String> =
            conn.query_row("PRAGMA cipher_version;", [], |row| row.get(0));
        Ok(cipher.is_ok() && self.encrypted)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;

            -- One row per calendar day. NULL means "not recorded".
            CREATE TABLE IF NOT EXISTS journal_entries (
                date TEXT PRIMARY KEY,

                positive_mood INTEGER,
                had_cravings INTEGER,
                high_stress INTEGER,
                sleep_quality INTEGER,
                used_breathing INTEGER,
                mood_swings INTEGER,
                irritability INTEGER,
                exercised INTEGER,
                had_headaches INTEGER,
                social_support INTEGER,
                avoided_triggers INTEGER,
                productive_day INTEGER,

                craving_intensity INTEGER,
                anxiety_level INTEGER,
                energy_level INTEGER,
                concentration INTEGER,
                appetite INTEGER,

                sleep_hours REAL,
                meditation_minutes INTEGER,
                water_glasses INTEGER,
                exercise_minutes INTEGER,

                notes TEXT,

                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
