//! Environment-driven process configuration.
//!
//! # Responsibility
//! - Resolve store path, logging and listen address for the binaries.
//!
//! # Invariants
//! - Blank or whitespace-only variables fall back to defaults.
//! - `log_dir` is always absolute, as `init_logging` requires.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "STUDENTS_DB_PATH";
pub const LOG_DIR_ENV: &str = "STUDENTS_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "STUDENTS_LOG_LEVEL";
pub const API_ADDR_ENV: &str = "STUDENTS_API_ADDR";

const DEFAULT_DB_FILE_NAME: &str = "students.json";
const DEFAULT_LOG_DIR_NAME: &str = "logs";
const DEFAULT_API_ADDR: &str = "127.0.0.1:8000";

/// Settings shared by the console and HTTP front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub api_addr: String,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };
        let cwd = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());

        let db_path = value(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let log_dir = value(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR_NAME));
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        };

        Self {
            db_path,
            log_dir,
            log_level: value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            api_addr: value(API_ADDR_ENV).unwrap_or_else(|| DEFAULT_API_ADDR.to_string()),
        }
    }
}
