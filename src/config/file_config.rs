//! Reading and writing the TOML config file.
//!
//! # Configuration File Format
//!
//! ```toml
//! [lookup]
//! enabled = true
//! base_url = "https://openlibrary.org"
//! timeout_seconds = 10
//!
//! [search]
//! max_results = 5
//! sentinel = true
//!
//! [list]
//! duplicates = "reject"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::path::Path;

use super::Config;

/// A config file on disk, without environment overrides
#[derive(Debug, Default)]
pub struct ConfigFile {
    pub config: Config,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        let config = toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))?;
        Ok(Self { config })
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use crate::manager::DuplicatePolicy;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[lookup]
base_url = "http://localhost:8080"
timeout_seconds = 0

[search]
max_results = 3
sentinel = false

[list]
duplicates = "allow"

[logging]
level = "debug"
format = "json"
"#;
        std::fs::write(&path, toml_content).unwrap();

        let config = ConfigFile::load(&path).unwrap().config;
        assert!(config.lookup.enabled);
        assert_eq!(config.lookup.base_url, "http://localhost:8080");
        assert_eq!(config.lookup.timeout_seconds, 0);
        assert_eq!(config.search.max_results, 3);
        assert!(!config.search.sentinel);
        assert_eq!(config.list.duplicates, DuplicatePolicy::Allow);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut file = ConfigFile::default();
        file.config.search.max_results = 8;
        file.config.lookup.enabled = false;
        file.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.config, file.config);
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(matches!(ConfigFile::load(&path), Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = ConfigFile::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }
}
