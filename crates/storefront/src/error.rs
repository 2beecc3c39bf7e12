//! Unified error handling for the storefront.
//!
//! Provides a unified [`AppError`] for callers that need a single error
//! surface (the CLI, integration tests). Inside the [`crate::store::Store`],
//! fetch failures never propagate as `Err`; they land on the owning slice
//! as a display message. [`AppError::Fetch`] and [`AppError::Login`] exist
//! so a binary can lift those slice messages back into a `Result` at the
//! process boundary.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::persist::PersistError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session persistence failed.
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A load operation settled with an error on its slice. Carries the
    /// display message the store shaped (`Failed to fetch products: ...`).
    #[error("{0}")]
    Fetch(String),

    /// A login attempt was rejected. Carries the display message the
    /// session shaped (`Login failed: ...`).
    #[error("{0}")]
    Login(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::Fetch("Failed to fetch products: HTTP 500".to_string());
        assert_eq!(err.to_string(), "Failed to fetch products: HTTP 500");

        let err = AppError::Login("Login failed: username or password is incorrect".to_string());
        assert_eq!(
            err.to_string(),
            "Login failed: username or password is incorrect"
        );
    }

    #[test]
    fn test_app_error_wraps_config_error() {
        let err = AppError::from(ConfigError::InvalidEnvVar(
            "CHAIKART_HTTP_TIMEOUT_SECS".to_string(),
            "invalid digit".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Config error: Invalid environment variable CHAIKART_HTTP_TIMEOUT_SECS: invalid digit"
        );
    }
}
