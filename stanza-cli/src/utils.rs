//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI
//! commands: configuration loading, opening the front desk over the
//! SQLite store, and output formatting helpers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use stanza::database::{resolve_database_path, DatabaseConfig, SqliteStore};
use stanza::desk::FrontDesk;
use stanza::{Config, ConfigBuilder, OutputFormat};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Verbosity fields are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Configuration files
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(_global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the front desk over the persistent store.
///
/// The data directory comes from the global option, the configuration,
/// or the default location, in that order. The busy timeout follows the
/// same precedence.
pub fn open_desk(global: &GlobalOptions) -> Result<FrontDesk, CliError> {
    let config = load_configuration(global)?;

    let data_dir = global.data_dir.clone().or_else(|| config.data_dir.clone());
    let db_path = resolve_database_path(data_dir.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut db_config = DatabaseConfig::new(db_path);
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds.into()));
    } else {
        db_config = db_config.with_busy_timeout(config.busy_timeout());
    }

    let store = SqliteStore::open(db_config)?;
    Ok(FrontDesk::from_shared(Arc::new(store)))
}

/// Resolve the output format from a command flag and the configuration.
pub fn resolve_format(
    flag: Option<OutputFormat>,
    global: &GlobalOptions,
) -> Result<OutputFormat, CliError> {
    if let Some(format) = flag {
        return Ok(format);
    }
    Ok(load_configuration(global)?.effective_output_format())
}

/// Print a serializable value as JSON or YAML to stdout.
pub fn print_serialized<T: Serialize>(format: OutputFormat, value: &T) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(value)
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{rendered}");
        }
        OutputFormat::Yaml => {
            let rendered =
                serde_yaml::to_string(value).map_err(|e| CliError::Config(e.to_string()))?;
            print!("{rendered}");
        }
        OutputFormat::Table => {
            unreachable!("table output is rendered by the individual commands")
        }
    }
    Ok(())
}
