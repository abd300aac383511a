//! Runtime configuration for the inventory store.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Keep lookup injectable so resolution is testable without touching
//!   process-wide environment state.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `log_dir`, when set, is an absolute path.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "STOCKROOM_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STOCKROOM_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STOCKROOM_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "stockroom.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(value) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Log level name (`trace|debug|info|warn|error`).
    pub log_level: String,
    /// Rolling log directory; file logging is off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, applying defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let db_path = value(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match value(LOG_DIR_ENV) {
            Some(raw) if !Path::new(&raw).is_absolute() => {
                return Err(ConfigError::RelativeLogDir(raw));
            }
            Some(raw) => Some(PathBuf::from(raw)),
            None => None,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
