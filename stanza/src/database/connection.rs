//! Database connection management.
//!
//! Provides the SQLite-backed store type with proper initialization and
//! PRAGMA settings for concurrent access.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// The SQLite storage backend.
///
/// Wraps a `SQLite` connection configured with WAL mode and a busy
/// timeout. The connection sits behind a mutex so the store can be
/// shared across threads; record mutations additionally run inside
/// IMMEDIATE transactions (see the trait implementations).
///
/// # Examples
///
/// ```no_run
/// use stanza::database::{DatabaseConfig, SqliteStore};
///
/// let store = SqliteStore::open(DatabaseConfig::new("/tmp/stanza.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    pub(super) conn: Mutex<Connection>,
    #[allow(dead_code)]
    config: DatabaseConfig,
}

impl SqliteStore {
    /// Opens the store with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode and the busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, PRAGMA settings
    /// cannot be applied, or schema verification fails.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // PRAGMA journal_mode returns a row, so query_row is required
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// Locks and returns the underlying connection.
    pub(super) fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
