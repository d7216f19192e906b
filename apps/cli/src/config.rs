//! tunectl configuration loaded from environment variables
//!
//! Wraps the shared configuration and adds the settings only the command
//! surface needs.

use std::env;

use anyhow::{Context, Result};
use tunectl_shared_config::{CommonConfig, OllamaConfig, SpotifyConfig};

use crate::resolver::{ResolverSettings, DEFAULT_CANDIDATE_LIMIT};

/// Command surface configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with the client packages
    pub common: CommonConfig,

    /// Candidates offered by `play`
    pub search_limit: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load config")?;

        let search_limit: u32 = env::var("TUNECTL_SEARCH_LIMIT")
            .unwrap_or_else(|_| DEFAULT_CANDIDATE_LIMIT.to_string())
            .parse()
            .context("Invalid TUNECTL_SEARCH_LIMIT value")?;
        anyhow::ensure!(
            (1..=50).contains(&search_limit),
            "TUNECTL_SEARCH_LIMIT must be between 1 and 50, got {}",
            search_limit
        );

        Ok(Self {
            common,
            search_limit,
        })
    }

    /// Get Spotify configuration
    pub fn spotify(&self) -> &SpotifyConfig {
        &self.common.spotify
    }

    /// Get Ollama configuration
    pub fn ollama(&self) -> &OllamaConfig {
        &self.common.ollama
    }

    /// Settings for the resolution pipeline
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            candidate_limit: self.search_limit,
            device_id: self.common.spotify.device_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ErrorSeverity};
    use tunectl_shared_config::ConfigError;

    const CREDENTIALS: [(&str, Option<&str>); 2] = [
        ("SPOTIFY_CLIENT_ID", Some("id")),
        ("SPOTIFY_CLIENT_SECRET", Some("secret")),
    ];

    #[test]
    fn test_config_defaults() {
        let vars = [
            CREDENTIALS[0],
            CREDENTIALS[1],
            ("TUNECTL_SEARCH_LIMIT", None),
            ("SPOTIFY_DEVICE_ID", None),
        ];
        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.search_limit, 5);
            assert_eq!(config.resolver_settings(), ResolverSettings::default());
        });
    }

    #[test]
    fn test_resolver_settings_carry_device_and_limit() {
        let vars = [
            CREDENTIALS[0],
            CREDENTIALS[1],
            ("TUNECTL_SEARCH_LIMIT", Some("8")),
            ("SPOTIFY_DEVICE_ID", Some("kitchen")),
        ];
        temp_env::with_vars(vars, || {
            let settings = Config::from_env().unwrap().resolver_settings();
            assert_eq!(settings.candidate_limit, 8);
            assert_eq!(settings.device_id.as_deref(), Some("kitchen"));
        });
    }

    #[test]
    fn test_invalid_search_limit() {
        let vars = [
            CREDENTIALS[0],
            CREDENTIALS[1],
            ("TUNECTL_SEARCH_LIMIT", Some("0")),
        ];
        temp_env::with_vars(vars, || {
            let err = CliError::from(Config::from_env().unwrap_err());
            assert!(matches!(err, CliError::Internal(ref msg) if msg.contains("between 1 and 50")));
            assert_eq!(err.severity(), ErrorSeverity::Error);
        });
    }

    #[test]
    fn test_missing_credentials_are_reported() {
        let vars: [(&str, Option<&str>); 2] =
            [("SPOTIFY_CLIENT_ID", None), ("SPOTIFY_CLIENT_SECRET", None)];
        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            let cause = err.downcast_ref::<ConfigError>().unwrap();
            assert!(cause.is_fatal());
            assert!(format!("{:#}", err).contains("SPOTIFY_CLIENT_SECRET"));

            let err = CliError::from(err);
            assert_eq!(err.severity(), ErrorSeverity::Critical);
        });
    }
}
