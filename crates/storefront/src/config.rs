//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point at the public Fake Store
//! API and a per-user session file.
//!
//! - `CHAIKART_API_BASE_URL` - API origin (default: <https://fakestoreapi.com>)
//! - `CHAIKART_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CHAIKART_SESSION_FILE` - Session persistence path (default: platform
//!   config dir, e.g. `~/.config/chaikart/session.json`)

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const SESSION_FILE_NAME: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No config directory available for session storage; set CHAIKART_SESSION_FILE")]
    NoConfigDir,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the Fake Store API
    pub api_base_url: Url,
    /// HTTP request timeout
    pub http_timeout: Duration,
    /// Path where the login session is persisted
    pub session_file: PathBuf,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable, or if no
    /// session path can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("CHAIKART_API_BASE_URL", DEFAULT_API_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CHAIKART_API_BASE_URL".to_string(), e.to_string())
            })?;

        let http_timeout = match get_optional_env("CHAIKART_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "CHAIKART_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let session_file = match get_optional_env("CHAIKART_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };

        Ok(Self {
            api_base_url,
            http_timeout,
            session_file,
        })
    }
}

impl Default for StoreConfig {
    /// Defaults without touching the environment. The session path falls back
    /// to `session.json` in the working directory if no config dir exists.
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base URL is valid"),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            session_file: default_session_file()
                .unwrap_or_else(|_| PathBuf::from(SESSION_FILE_NAME)),
        }
    }
}

/// Session file under the platform config directory
/// (`~/.config/chaikart/session.json` on Linux).
fn default_session_file() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("shop", "chaikart", "chaikart").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join(SESSION_FILE_NAME))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_parses() {
        let config = StoreConfig::default();
        assert_eq!(config.api_base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_session_file_name() {
        let config = StoreConfig::default();
        assert_eq!(
            config.session_file.file_name().unwrap().to_str().unwrap(),
            "session.json"
        );
    }
}
