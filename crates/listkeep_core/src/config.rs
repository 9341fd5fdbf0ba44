//! Runtime configuration values for logging and storage.
//!
//! # Invariants
//! - Log directories and database paths are absolute.
//! - Log levels are normalized to `trace|debug|info|warn|error`.

use crate::store::DEFAULT_STORAGE_KEY;
use std::path::{Path, PathBuf};

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Parses user-supplied level and directory strings.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: absolute_path("log_dir", log_dir)?,
        })
    }
}

/// Where and under which key the collection is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    /// Uses the default storage key.
    pub fn new(db_path: &str) -> Result<Self, String> {
        Ok(Self {
            db_path: absolute_path("db_path", db_path)?,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        })
    }

    pub fn with_storage_key(mut self, key: &str) -> Result<Self, String> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err("storage_key cannot be empty".to_string());
        }
        self.storage_key = trimmed.to_string();
        Ok(self)
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn absolute_path(field: &str, value: &str) -> Result<PathBuf, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("{field} must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}
