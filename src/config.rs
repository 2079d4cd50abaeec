//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.yuag.toml` files.

use crate::cli::OutputFormat;
use crate::query::MAX_RESULTS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".yuag.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite catalog.
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Upper bound on a single search or detail request.
    #[serde(default = "default_timeout")]
    pub query_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            query_timeout_seconds: default_timeout(),
        }
    }
}

fn default_database_path() -> String {
    "lux.sqlite".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum rows per search; values above 1000 are clamped.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    MAX_RESULTS
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Rendering format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Include the thumbnail URL in object details.
    #[serde(default = "default_true")]
    pub thumbnails: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            thumbnails: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref database) = args.database {
            self.database.path = database.display().to_string();
        }
        if let Some(timeout) = args.timeout {
            self.database.query_timeout_seconds = timeout;
        }
        if let Some(limit) = args.limit {
            self.search.limit = limit;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }

        self.search.limit = self.search.limit.min(MAX_RESULTS);
    }

    /// Path to the catalog database.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database.path)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, Command};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, "lux.sqlite");
        assert_eq!(config.database.query_timeout_seconds, 30);
        assert_eq!(config.search.limit, 1000);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(config.output.thumbnails);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[database]
path = "/data/lux.sqlite"
query_timeout_seconds = 5

[search]
limit = 50

[output]
format = "json"
thumbnails = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.database.path, "/data/lux.sqlite");
        assert_eq!(config.database.query_timeout_seconds, 5);
        assert_eq!(config.search.limit, 50);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.thumbnails);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[search]\nlimit = 10\n").unwrap();
        assert_eq!(config.search.limit, 10);
        assert_eq!(config.database.path, "lux.sqlite");
        assert!(config.output.thumbnails);
    }

    #[test]
    fn test_merge_with_args() {
        let args = Args {
            command: Some(Command::Show { id: 1 }),
            database: Some(PathBuf::from("other.sqlite")),
            config: None,
            format: Some(OutputFormat::Json),
            output: None,
            limit: None,
            timeout: Some(3),
            verbose: false,
            quiet: false,
            init_config: false,
        };

        let mut config: Config = toml::from_str("[search]\nlimit = 5000\n").unwrap();
        config.merge_with_args(&args);

        assert_eq!(config.database_path(), PathBuf::from("other.sqlite"));
        assert_eq!(config.database.query_timeout_seconds, 3);
        assert_eq!(config.output.format, OutputFormat::Json);
        // Config values above the cap are clamped.
        assert_eq!(config.search.limit, MAX_RESULTS);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[database]\npath = \"catalog.sqlite\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database.path, "catalog.sqlite");

        std::fs::write(&path, "[database\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("format = \"markdown\""));
    }
}
