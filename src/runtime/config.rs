//! # Client configuration
//!
//! Read from `<config_dir>/catalog-client/config.toml` when the file exists, defaults
//! otherwise. `CATALOG_BASE_URL` overrides the file's `base_url`.
//!
//! ```toml
//! base_url = "https://catalog.example.org/catalog/"
//! max_visible_pages = 5
//! timeout_secs = 10
//! ```

use crate::state::DEFAULT_MAX_VISIBLE_PAGES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "CATALOG_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/catalog/";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the catalog API; endpoint paths are resolved against it.
    pub base_url: String,
    /// Width of the page-number window of listings.
    pub max_visible_pages: u64,
    /// Per-request timeout. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Directory holding the config file and the saved token.
    ///
    /// Falls back to the current directory if the platform has no config dir.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("catalog-client")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Loads the default config file, applies the environment override and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`ClientConfig::load`] without the validation, for callers that apply further
    /// overrides first.
    pub fn load_unvalidated() -> Result<Self, ConfigError> {
        Ok(Self::load_from(&Self::config_path())?
            .with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Parses `path`, or returns the defaults when it does not exist. Does not validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Replaces `base_url` when `base_url` is a non-empty value.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Checks:
    /// - `base_url` is an absolute http(s) URL
    /// - `max_visible_pages` is at least 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid base_url '{}': {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("base_url must be http or https, got '{}'", url.scheme()),
            });
        }
        if self.max_visible_pages == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_visible_pages must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8000/catalog/");
        assert_eq!(config.max_visible_pages, 3);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_visible_pages = \"many\"\n").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig::default()
            .with_base_url_override(Some("https://api.example.org/catalog/".to_string()));
        assert_eq!(config.base_url, "https://api.example.org/catalog/");

        let unchanged = ClientConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(unchanged.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_override_repairs_invalid_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"not a url\"\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert!(config.validate().is_err());

        let repaired =
            config.with_base_url_override(Some("https://api.example.org/catalog/".to_string()));
        assert!(repaired.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_ok());

        let relative = ClientConfig {
            base_url: "/catalog/".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            relative.validate(),
            Err(ConfigError::ValidationError { .. })
        ));

        let ftp = ClientConfig {
            base_url: "ftp://host/catalog/".to_string(),
            ..Default::default()
        };
        assert!(ftp.validate().is_err());

        let no_window = ClientConfig {
            max_visible_pages: 0,
            ..Default::default()
        };
        assert!(no_window.validate().is_err());
    }
}
