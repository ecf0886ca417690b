//! Studio Configuration
//!
//! Where the studio backend lives and how the progress channel behaves when
//! the server drops it.
//!
//! # Configuration Priority
//!
//! Highest first:
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The file lives at `$XDG_CONFIG_HOME/scriptreel/studio.toml` (typically
//! `~/.config/scriptreel/studio.toml`). A missing file is not an error.
//!
//! # Example Configuration
//!
//! ```toml
//! backend_url = "https://studio.example.com"
//!
//! [reconnect]
//! mode = "bounded"
//! max_attempts = 5
//! initial_backoff_ms = 500
//! max_backoff_ms = 8000
//! ```
//!
//! # Environment Variables
//!
//! - `SCRIPTREEL_BACKEND_URL` - backend base URL (http or https)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::subscriber::ReconnectPolicy;

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Environment variable overriding the backend URL
pub const BACKEND_URL_ENV: &str = "SCRIPTREEL_BACKEND_URL";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Environment variable
    Env,
    /// TOML configuration file
    File,
    /// Default values
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// On-disk TOML layout
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioToml {
    /// Backend base URL
    pub backend_url: Option<String>,

    /// Progress channel reconnect policy
    pub reconnect: Option<ReconnectPolicy>,
}

/// Resolved configuration
#[derive(Clone, Debug, PartialEq)]
pub struct StudioConfig {
    /// Backend base URL (http or https)
    pub backend_url: Url,

    /// Progress channel reconnect policy
    pub reconnect: ReconnectPolicy,

    /// File the configuration was read from, if any
    pub config_file_path: Option<PathBuf>,

    /// Highest-priority source that contributed a value
    source: ConfigSource,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            reconnect: ReconnectPolicy::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl StudioConfig {
    /// Get the configuration source
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

fn default_backend_url() -> Url {
    match Url::parse(DEFAULT_BACKEND_URL) {
        Ok(url) => url,
        Err(e) => unreachable!("default backend URL is valid: {e}"),
    }
}

/// Overrides applied on top of the file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Backend base URL
    pub backend_url: Option<String>,
}

impl ConfigOverrides {
    /// Read overrides from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var(BACKEND_URL_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Set the backend URL
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }
}

/// Get the default configuration file path
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("scriptreel").join("studio.toml"))
}

/// Load configuration from the default file and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or a
/// configured URL is not a usable http(s) URL.
pub fn load_config() -> Result<StudioConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from `path` and the environment
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<StudioConfig, ConfigError> {
    load_config_with_overrides(path.as_deref(), &ConfigOverrides::from_env())
}

/// Load configuration from `path`, then apply `overrides`
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<StudioConfig, ConfigError> {
    let mut config = StudioConfig::default();

    if let Some(config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            let toml_config: StudioToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.to_path_buf());
            config.source = ConfigSource::File;

            tracing::info!(path = %config_path.display(), "Loaded configuration from file");
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    if let Some(ref url) = overrides.backend_url {
        config.backend_url = parse_backend_url(url)?;
        config.source = ConfigSource::Env;
    }

    tracing::debug!(
        backend_url = %config.backend_url,
        source = %config.source,
        "Resolved studio configuration"
    );

    Ok(config)
}

fn apply_toml_config(config: &mut StudioConfig, toml: &StudioToml) -> Result<(), ConfigError> {
    if let Some(ref url) = toml.backend_url {
        config.backend_url = parse_backend_url(url)?;
    }
    if let Some(policy) = toml.reconnect {
        validate_policy(&policy)?;
        config.reconnect = policy;
    }
    Ok(())
}

/// Parse and check a backend base URL
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::ValidationError(format!("backend_url '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::ValidationError(format!(
            "backend_url must be http or https, got '{other}'"
        ))),
    }
}

fn validate_policy(policy: &ReconnectPolicy) -> Result<(), ConfigError> {
    if let ReconnectPolicy::Bounded {
        initial_backoff_ms,
        max_backoff_ms,
        ..
    } = *policy
    {
        if max_backoff_ms < initial_backoff_ms {
            return Err(ConfigError::ValidationError(
                "reconnect.max_backoff_ms must be >= reconnect.initial_backoff_ms".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = StudioConfig::default();
        assert_eq!(config.backend_url.as_str(), "http://localhost:8001/");
        assert_eq!(config.reconnect, ReconnectPolicy::Never);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("scriptreel/studio.toml"));
        }
    }

    #[test]
    fn test_no_path_uses_defaults() {
        let config = load_config_with_overrides(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_missing_file_graceful() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = load_config_with_overrides(Some(&path), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_parse_file() {
        let file = write_toml(
            r#"
backend_url = "https://studio.example.com"

[reconnect]
mode = "bounded"
max_attempts = 5
initial_backoff_ms = 500
max_backoff_ms = 8000
"#,
        );

        let config =
            load_config_with_overrides(Some(file.path()), &ConfigOverrides::default()).unwrap();

        assert_eq!(config.backend_url.as_str(), "https://studio.example.com/");
        assert_eq!(
            config.reconnect,
            ReconnectPolicy::Bounded {
                max_attempts: 5,
                initial_backoff_ms: 500,
                max_backoff_ms: 8_000,
            }
        );
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file = write_toml("");
        let config =
            load_config_with_overrides(Some(file.path()), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:8001/");
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_toml("backend_url = \"http://from-file:8001\"\n");
        let overrides = ConfigOverrides::default().with_backend_url("http://from-env:9000");

        let config = load_config_with_overrides(Some(file.path()), &overrides).unwrap();

        assert_eq!(config.backend_url.as_str(), "http://from-env:9000/");
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_malformed_toml_error() {
        let file = write_toml("backend_url = [");
        let err =
            load_config_with_overrides(Some(file.path()), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let overrides = ConfigOverrides::default().with_backend_url("ftp://example.com");
        let err = load_config_with_overrides(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let overrides = ConfigOverrides::default().with_backend_url("not a url");
        assert!(load_config_with_overrides(None, &overrides).is_err());
    }

    #[test]
    fn test_rejects_inverted_backoff() {
        let file = write_toml(
            "[reconnect]\nmode = \"bounded\"\nmax_attempts = 1\ninitial_backoff_ms = 900\nmax_backoff_ms = 100\n",
        );
        let err =
            load_config_with_overrides(Some(file.path()), &ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("max_backoff_ms"));
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }
}
