//! Shared configuration types for tunectl
//!
//! Configuration is read from the environment (optionally seeded from a
//! `.env` file by the binary) and handed to each component explicitly at
//! construction time.

mod error;
mod ollama;
mod spotify;

pub use error::{ConfigError, ConfigResult};
pub use ollama::OllamaConfig;
pub use spotify::{SpotifyConfig, DEFAULT_REDIRECT_URI};

use std::env;

/// Configuration shared by every tunectl component
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Spotify credentials and endpoints
    pub spotify: SpotifyConfig,

    /// Ollama query enhancement configuration
    pub ollama: OllamaConfig,
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            spotify: SpotifyConfig::from_env()?,
            ollama: OllamaConfig::from_env()?,
        })
    }

    /// Check if query enhancement should be attempted
    pub fn has_enhancement(&self) -> bool {
        self.ollama.enabled
    }
}

/// Log filter used when neither RUST_LOG nor LOG_LEVEL is set
pub const DEFAULT_LOG_FILTER: &str = "tunectl=warn";

/// Log filter directives from RUST_LOG, then LOG_LEVEL. Does not need a
/// loaded [`CommonConfig`].
pub fn log_filter() -> String {
    env::var("RUST_LOG")
        .or_else(|_| env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
