//! Configuration system for stanza.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (STANZA_*)
//! 3. User config (`~/.stanza/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use stanza::config::{Config, ConfigBuilder, OutputFormat};
//!
//! let custom = Config {
//!     output_format: Some(OutputFormat::Json),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_format, Some(OutputFormat::Json));
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::default_data_dir;
use crate::error::{Error, Result};

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use stanza::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// YAML output format.
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

/// Top-level configuration.
///
/// All fields are optional; unset fields fall back to built-in defaults
/// through the accessor methods.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file.
    pub data_dir: Option<PathBuf>,

    /// Busy timeout for database lock contention, in milliseconds.
    pub busy_timeout_ms: Option<u64>,

    /// Default output format for listing commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the effective busy timeout (default 5 seconds).
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms.unwrap_or(5000))
    }

    /// Returns the effective output format (default table).
    #[must_use]
    pub fn effective_output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Builder for loading and merging configuration.
///
/// # Examples
///
/// ```no_run
/// use stanza::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// println!("format: {}", config.effective_output_format());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    skip_files: bool,
    skip_env: bool,
    config_path: Option<PathBuf>,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with all sources enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips loading configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips environment variable overrides.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads the user config from an explicit path instead of
    /// `~/.stanza/config.yaml`.
    #[must_use]
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Applies programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed, if an environment variable holds an invalid value, or if
    /// the merged configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            if let Some(file_config) = self.load_user_config()? {
                merge(&mut config, file_config);
            }
        }

        if !self.skip_env {
            merge(&mut config, env_overrides()?);
        }

        if let Some(overrides) = self.overrides {
            merge(&mut config, overrides);
        }

        validate(&config)?;
        Ok(config)
    }

    fn load_user_config(&self) -> Result<Option<Config>> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => match default_data_dir() {
                Ok(dir) => dir.join("config.yaml"),
                // No home directory means no user config to load.
                Err(_) => return Ok(None),
            },
        };

        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(Some(config))
    }
}

/// Overlays `higher` onto `base`, field by field.
fn merge(base: &mut Config, higher: Config) {
    if higher.data_dir.is_some() {
        base.data_dir = higher.data_dir;
    }
    if higher.busy_timeout_ms.is_some() {
        base.busy_timeout_ms = higher.busy_timeout_ms;
    }
    if higher.output_format.is_some() {
        base.output_format = higher.output_format;
    }
}

/// Reads STANZA_* environment variables into a config overlay.
fn env_overrides() -> Result<Config> {
    let mut config = Config::default();

    if let Ok(dir) = env::var("STANZA_DATA_DIR") {
        config.data_dir = Some(PathBuf::from(dir));
    }

    if let Ok(ms) = env::var("STANZA_BUSY_TIMEOUT_MS") {
        config.busy_timeout_ms = Some(ms.parse().map_err(|_| Error::Validation {
            field: "STANZA_BUSY_TIMEOUT_MS".into(),
            message: "must be a positive integer".into(),
        })?);
    }

    if let Ok(format) = env::var("STANZA_OUTPUT_FORMAT") {
        config.output_format = Some(format.parse().map_err(|message| Error::Validation {
            field: "STANZA_OUTPUT_FORMAT".into(),
            message,
        })?);
    }

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.busy_timeout_ms == Some(0) {
        return Err(Error::Validation {
            field: "busy_timeout_ms".into(),
            message: "must be greater than zero".into(),
        });
    }
    Ok(())
}
