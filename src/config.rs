//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::HttpSourceConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote customers/transactions service
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://summit-api-kappa.vercel.app".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn http(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Runs before logging is set up, so nothing is logged here; call
    /// [`ConfigLoad::report`] once the subscriber is installed.
    pub fn load_default() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("summit").join("config.toml")),
            Some(PathBuf::from("/etc/summit/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate that exists and parses, remembering the
    /// ones that exist but could not be loaded
    pub fn load_first(paths: &[PathBuf]) -> ConfigLoad {
        let mut failures = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return ConfigLoad {
                            config,
                            path: Some(path.clone()),
                            failures,
                        };
                    }
                    Err(e) => failures.push(e),
                }
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            path: None,
            failures,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Source overrides
        if let Some(url) = lookup("SUMMIT_BASE_URL") {
            self.source.base_url = url;
        }
        if let Some(timeout) = lookup("SUMMIT_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.source.timeout_secs = timeout;
        }

        // API overrides
        if let Some(host) = lookup("SUMMIT_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("SUMMIT_API_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = port;
        }

        // Logging overrides
        if let Some(level) = lookup("SUMMIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SUMMIT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching for a config file
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub path: Option<PathBuf>,
    /// Files that exist but failed to load, in search order
    pub failures: Vec<ConfigError>,
}

impl ConfigLoad {
    /// A config loaded from an explicitly named file
    pub fn explicit(path: &Path, config: Config) -> Self {
        Self {
            config,
            path: Some(path.to_path_buf()),
            failures: Vec::new(),
        }
    }

    /// Log where the config came from and every file that was skipped
    pub fn report(&self) {
        for failure in &self.failures {
            tracing::warn!("{}; skipping it", failure);
        }
        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Summit Configuration
#
# Environment variables override these settings:
# - SUMMIT_BASE_URL
# - SUMMIT_TIMEOUT_SECS
# - SUMMIT_API_HOST
# - SUMMIT_API_PORT
# - SUMMIT_LOG_LEVEL
# - SUMMIT_LOG_FORMAT

[source]
# Service exposing GET /customers and GET /transactions
base_url = "https://summit-api-kappa.vercel.app"

# Request timeout in seconds
timeout_secs = 30

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "https://summit-api-kappa.vercel.app");
        assert_eq!(config.api.addr(), "0.0.0.0:8090");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.source.base_url, defaults.source.base_url);
        assert_eq!(config.source.timeout_secs, defaults.source.timeout_secs);
        assert_eq!(config.api.port, defaults.api.port);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source]\nbase_url = \"http://localhost:3000\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source.base_url, "http://localhost:3000");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.api.port, 8090);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = \"not a port\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SUMMIT_BASE_URL", "http://mirror.test"),
            ("SUMMIT_API_PORT", "9000"),
            ("SUMMIT_TIMEOUT_SECS", "soon"),
            ("SUMMIT_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.base_url, "http://mirror.test");
        assert_eq!(config.api.port, 9000);
        // Unparseable values keep the previous setting
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_load_first_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[api]\nport = \"oops\"\n").unwrap();
        std::fs::write(&good, "[api]\nport = 9100\n").unwrap();

        let loaded = Config::load_first(&[missing, broken.clone(), good.clone()]);

        assert_eq!(loaded.path, Some(good));
        assert_eq!(loaded.config.api.port, 9100);
        assert_eq!(loaded.failures.len(), 1);
        assert!(matches!(
            &loaded.failures[0],
            ConfigError::Parse { path, .. } if *path == broken
        ));
    }

    #[test]
    fn test_load_first_falls_back_with_failures_kept() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[api]\nport = \"oops\"\n").unwrap();

        let loaded = Config::load_first(&[broken]);

        assert!(loaded.path.is_none());
        assert_eq!(loaded.failures.len(), 1);
    }
}
