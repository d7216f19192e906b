//! Configuration error types

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more Spotify credentials are absent
    #[error("missing Spotify credentials: please set {}", .0.join(" and "))]
    MissingCredentials(Vec<String>),

    /// Invalid value for environment variable
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Invalid URL format
    #[error("invalid URL format for {0}: {1}")]
    InvalidUrl(String, String),
}

impl ConfigError {
    /// Whether the process cannot continue without the user fixing the environment
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConfigError::MissingCredentials(_))
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
