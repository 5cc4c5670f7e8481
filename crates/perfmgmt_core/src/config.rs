//! Runtime configuration for the local store and remote client.
//!
//! # Responsibility
//! - Hold the database path and remote server settings.
//! - Load them from `PERFMGMT_*` environment variables.
//!
//! # Invariants
//! - `RemoteConfig::base_url` is an absolute `http`/`https` URL without a
//!   trailing slash.
//! - Remote timeouts are always finite and non-zero.

use reqwest::Url;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "PERFMGMT_DB_PATH";
pub const ENV_SERVER_URL: &str = "PERFMGMT_SERVER_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "PERFMGMT_HTTP_TIMEOUT_SECS";

const DEFAULT_DB_FILE: &str = "perfmgmt.db";
/// Default bound for every remote request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidUrl { value: String, reason: String },
    InvalidTimeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
            Self::InvalidUrl { value, reason } => {
                write!(f, "invalid server url `{value}`: {reason}")
            }
            Self::InvalidTimeout(value) => write!(
                f,
                "invalid http timeout `{value}`; expected a positive number of seconds"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Local store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Reads `PERFMGMT_DB_PATH`, falling back to `perfmgmt.db`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = lookup(ENV_DB_PATH)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_FILE.to_string());
        Self::new(path)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}

/// Remote server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Server root, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Per-request timeout covering connect and body transfer.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Validates `base_url` and uses the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&base_url.into())?;
        Ok(Self {
            base_url,
            timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }

    /// Overrides the request timeout. Zero durations fall back to the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_HTTP_TIMEOUT
        } else {
            timeout
        };
        self
    }

    /// Reads `PERFMGMT_SERVER_URL` (required) and
    /// `PERFMGMT_HTTP_TIMEOUT_SECS` (optional, a positive number of seconds).
    ///
    /// # Errors
    /// - `InvalidTimeout` when the timeout is zero or not an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(ENV_SERVER_URL).ok_or(ConfigError::MissingVar(ENV_SERVER_URL))?;
        let config = Self::new(base_url)?;
        match lookup(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, RemoteConfig, StoreConfig, DEFAULT_HTTP_TIMEOUT, ENV_DB_PATH,
        ENV_HTTP_TIMEOUT_SECS, ENV_SERVER_URL,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn base_url_is_normalized_and_validated() {
        let config = RemoteConfig::new(" http://127.0.0.1:5000/ ").unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout, DEFAULT_HTTP_TIMEOUT);

        assert!(matches!(
            RemoteConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            RemoteConfig::new("ftp://example.com"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn remote_config_reads_env_values() {
        let config = RemoteConfig::from_lookup(lookup(&[
            (ENV_SERVER_URL, "https://hr.example.com"),
            (ENV_HTTP_TIMEOUT_SECS, "12"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://hr.example.com");
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn remote_config_rejects_missing_url_and_bad_timeout() {
        assert_eq!(
            RemoteConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingVar(ENV_SERVER_URL)
        );
        let err = RemoteConfig::from_lookup(lookup(&[
            (ENV_SERVER_URL, "http://localhost:5000"),
            (ENV_HTTP_TIMEOUT_SECS, "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("0".to_string()));
    }

    #[test]
    fn zero_timeout_override_keeps_default() {
        let config = RemoteConfig::new("http://localhost:5000")
            .unwrap()
            .with_timeout(Duration::ZERO);
        assert_eq!(config.timeout, DEFAULT_HTTP_TIMEOUT);
    }

    #[test]
    fn store_config_falls_back_to_default_file() {
        assert_eq!(
            StoreConfig::from_lookup(lookup(&[])).database_path,
            PathBuf::from("perfmgmt.db")
        );
        assert_eq!(
            StoreConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/var/lib/hr.db")])).database_path,
            PathBuf::from("/var/lib/hr.db")
        );
    }
}
