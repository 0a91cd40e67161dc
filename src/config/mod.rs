//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, and `BOOK_BOUND_<SECTION>__<KEY>` environment variables
//! (e.g. `BOOK_BOUND_LOOKUP__TIMEOUT_SECONDS=3`).

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::manager::DuplicatePolicy;
use crate::models::DEFAULT_MAX_RESULTS;
use crate::sources::OPEN_LIBRARY_API_BASE;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BOOK_BOUND";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "book-bound.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Search result settings
    #[serde(default)]
    pub search: SearchConfig,

    /// TBR list settings
    #[serde(default)]
    pub list: ListConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Whether to query the remote service at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the Open Library compatible service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout; 0 disables the timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    OPEN_LIBRARY_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Search result configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum results kept per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Show a "No results" entry instead of an empty set
    #[serde(default = "default_true")]
    pub sentinel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            sentinel: true,
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// TBR list configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// Default per-user config file location
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("book-bound").join("config.toml"))
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    user_config_path().filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // tests that read BOOK_BOUND_* variables must not overlap with ones that set them
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.lookup.enabled);
        assert_eq!(config.lookup.base_url, "https://openlibrary.org");
        assert_eq!(config.lookup.timeout_seconds, 10);
        assert_eq!(config.search.max_results, 5);
        assert!(config.search.sentinel);
        assert_eq!(config.list.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_config_partial_file() {
        let _guard = env_guard();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[lookup]
enabled = false

[list]
duplicates = "allow"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.lookup.enabled);
        assert_eq!(config.lookup.timeout_seconds, 10);
        assert_eq!(config.list.duplicates, DuplicatePolicy::Allow);
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/book-bound.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = env_guard();
        std::env::set_var("BOOK_BOUND_LOOKUP__TIMEOUT_SECONDS", "3");
        std::env::set_var("BOOK_BOUND_LIST__DUPLICATES", "allow");

        let from_env = get_config();

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[lookup]\ntimeout_seconds = 20\nenabled = false\n").unwrap();
        let from_file = load_config(&path);

        std::env::remove_var("BOOK_BOUND_LOOKUP__TIMEOUT_SECONDS");
        std::env::remove_var("BOOK_BOUND_LIST__DUPLICATES");

        let config = from_env.unwrap();
        assert_eq!(config.lookup.timeout_seconds, 3);
        assert_eq!(config.list.duplicates, DuplicatePolicy::Allow);
        assert!(config.lookup.enabled);

        // the environment wins over the file, untouched file keys survive
        let config = from_file.unwrap();
        assert_eq!(config.lookup.timeout_seconds, 3);
        assert!(!config.lookup.enabled);
        assert_eq!(config.list.duplicates, DuplicatePolicy::Allow);
    }
}
