//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PORTAL_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTAL_PORT` - Listen port (default: 3000)
//! - `PORTAL_STORAGE` - Storage backend, `file` or `memory` (default: file)
//! - `PORTAL_DATA_DIR` - Directory for the file backend (default: ./data)
//! - `PORTAL_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend holds the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    /// One file per key under the data directory.
    #[default]
    File,
    /// Process memory; lost on exit.
    Memory,
}

impl std::str::FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'file' or 'memory', got '{other}'")),
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: BackendType,
    /// Only used by [`BackendType::File`].
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::File,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl StorageConfig {
    /// In-memory storage.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: BackendType::Memory,
            ..Self::default()
        }
    }

    /// File storage rooted at `data_dir`.
    #[must_use]
    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendType::File,
            data_dir: data_dir.into(),
        }
    }

    /// Load storage settings from `PORTAL_STORAGE` and `PORTAL_DATA_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for an unknown backend name.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = get_env_or_default("PORTAL_STORAGE", "file")
            .parse::<BackendType>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_STORAGE".to_string(), e))?;
        let data_dir = PathBuf::from(get_env_or_default("PORTAL_DATA_DIR", "./data"));

        Ok(Self { backend, data_dir })
    }
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where persisted state lives
    pub storage: StorageConfig,
    /// Emit JSON formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking (contains the project key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            storage: StorageConfig::default(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PORTAL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_HOST".to_string(), e.to_string()))?;

        let port = get_env_or_default("PORTAL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_PORT".to_string(), e.to_string()))?;

        let storage = StorageConfig::from_env()?;

        let log_json = get_optional_env("PORTAL_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true"));

        let sentry_dsn = get_optional_env("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_sample_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = get_sample_rate("SENTRY_TRACES_SAMPLE_RATE", 0.1)?;

        Ok(Self {
            host,
            port,
            storage,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn get_sample_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("sample rate must be between 0.0 and 1.0, got {rate}"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_from_str() {
        assert_eq!("file".parse::<BackendType>().unwrap(), BackendType::File);
        assert_eq!("Memory".parse::<BackendType>().unwrap(), BackendType::Memory);
        assert!("postgres".parse::<BackendType>().is_err());
    }

    #[test]
    fn test_storage_config_constructors() {
        assert_eq!(StorageConfig::memory().backend, BackendType::Memory);

        let file = StorageConfig::file("/tmp/portal");
        assert_eq!(file.backend, BackendType::File);
        assert_eq!(file.data_dir, PathBuf::from("/tmp/portal"));
    }

    #[test]
    fn test_socket_addr() {
        let config = PortalConfig {
            port: 8080,
            ..PortalConfig::default()
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageConfig::default());
        assert!(config.sentry_dsn.is_none());
        assert!(!config.log_json);
    }
}
