//! Database configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for opening the SQLite store.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stanza::database::DatabaseConfig;
///
/// let config = DatabaseConfig::new("/tmp/stanza.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new configuration with default settings.
    ///
    /// Defaults: 5 second busy timeout, auto-create on, read-write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Opens the database in read-only mode.
    ///
    /// Read-only mode disables `auto_create`.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.stanza`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use stanza::database::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// assert!(data_dir.ends_with(".stanza"));
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".stanza"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Resolves the database path from an optional data directory override.
///
/// The resolution order is:
/// 1. `<data_dir>/stanza.db` if an override is given
/// 2. `$STANZA_DATA_DIR/stanza.db` if the environment variable is set
/// 3. `~/.stanza/stanza.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and no
/// override applies.
pub fn resolve_database_path(data_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = data_dir {
        return Ok(dir.join("stanza.db"));
    }
    if let Ok(dir) = std::env::var("STANZA_DATA_DIR") {
        return Ok(PathBuf::from(dir).join("stanza.db"));
    }
    Ok(default_data_dir()?.join("stanza.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DatabaseConfig::new("/tmp/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.auto_create);
        assert!(!config.read_only);
    }

    #[test]
    fn test_config_read_only_disables_auto_create() {
        let config = DatabaseConfig::new("/tmp/test.db").read_only();
        assert!(config.read_only);
        assert!(!config.auto_create);
    }

    #[test]
    fn test_resolve_with_explicit_dir() {
        let path = resolve_database_path(Some(Path::new("/custom/data"))).unwrap();
        assert_eq!(path, PathBuf::from("/custom/data/stanza.db"));
    }
}
