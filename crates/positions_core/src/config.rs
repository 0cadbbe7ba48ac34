//! Runtime settings resolution.
//!
//! Precedence for every setting: explicit value, then environment, then the
//! built-in default. Blank values count as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment override for the database file.
pub const DB_PATH_ENV: &str = "POSITIONS_DB_PATH";
/// Environment override for the log level.
pub const LOG_LEVEL_ENV: &str = "POSITIONS_LOG_LEVEL";
/// Database file name used under the temp directory by default.
pub const DEFAULT_DB_FILE_NAME: &str = "positions_tracker.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: String,
}

impl TrackerConfig {
    /// Resolves settings against the process environment.
    pub fn resolve(db_path: Option<PathBuf>, log_level: Option<String>) -> Self {
        Self::resolve_with(db_path, log_level, |name| std::env::var(name).ok())
    }

    /// Resolves settings against an arbitrary environment lookup.
    pub fn resolve_with(
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let db_path = db_path
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| env(DB_PATH_ENV).and_then(non_blank).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = log_level
            .and_then(non_blank)
            .or_else(|| env(LOG_LEVEL_ENV).and_then(non_blank))
            .unwrap_or_else(|| default_log_level().to_string());

        Self { db_path, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::{TrackerConfig, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::path::PathBuf;

    #[test]
    fn explicit_values_win() {
        let config = TrackerConfig::resolve_with(
            Some(PathBuf::from("/data/picks.db")),
            Some("warn".to_string()),
            |_| Some("/env/ignored.db".to_string()),
        );
        assert_eq!(config.db_path, PathBuf::from("/data/picks.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn environment_then_defaults() {
        let config = TrackerConfig::resolve_with(None, None, |name| match name {
            DB_PATH_ENV => Some(" /env/picks.db ".to_string()),
            LOG_LEVEL_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/env/picks.db"));
        assert_eq!(config.log_level, default_log_level());

        let defaults = TrackerConfig::resolve_with(None, None, |_| None);
        assert!(defaults.db_path.ends_with(DEFAULT_DB_FILE_NAME));
    }
}
