//! Error handling for the tunectl command surface
//!
//! Every collaborator error is folded into [`CliError`] so the pipeline can
//! log it with a consistent severity and render a status line. No error
//! escapes a single command.

use thiserror::Error;
use tunectl_ollama_client::OllamaError;
use tunectl_shared_config::ConfigError;
use tunectl_spotify_client::SpotifyError;

/// Unified error type for the command surface
#[derive(Error, Debug)]
pub enum CliError {
    // ========== Startup Errors ==========
    /// Configuration could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    // ========== Collaborator Errors ==========
    /// Spotify Web API or OAuth failure
    #[error("{0}")]
    Spotify(#[from] SpotifyError),

    /// Ollama generate endpoint failure
    #[error("{0}")]
    Ollama(#[from] OllamaError),

    // ========== Terminal Errors ==========
    /// Reading from or writing to the terminal failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (catch-all for unexpected errors)
    #[error("internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Spotify(e) => e.is_retryable(),
            Self::Ollama(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Get a severity level for logging
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(e) if e.is_fatal() => ErrorSeverity::Critical,
            Self::Config(_) | Self::Internal(_) => ErrorSeverity::Error,

            Self::Spotify(SpotifyError::NotAuthorized | SpotifyError::Auth(_)) => {
                ErrorSeverity::Error
            }

            // The enhancer is optional, so its failures are expected
            Self::Ollama(_) => ErrorSeverity::Info,

            Self::Spotify(_) | Self::Io(_) => ErrorSeverity::Warning,
        }
    }

    /// The collaborator this error came from
    pub fn service(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Spotify(_) => "spotify",
            Self::Ollama(_) => "ollama",
            Self::Io(_) => "terminal",
            Self::Internal(_) => "general",
        }
    }

    /// Log the error with appropriate severity
    pub fn log(&self) {
        let service = self.service();
        match self.severity() {
            ErrorSeverity::Critical => {
                tracing::error!(
                    error = %self,
                    service = service,
                    retryable = self.is_retryable(),
                    "Critical tunectl error"
                );
            }
            ErrorSeverity::Error => {
                tracing::error!(
                    error = %self,
                    service = service,
                    retryable = self.is_retryable(),
                    "tunectl error"
                );
            }
            ErrorSeverity::Warning => {
                tracing::warn!(
                    error = %self,
                    service = service,
                    retryable = self.is_retryable(),
                    "tunectl warning"
                );
            }
            ErrorSeverity::Info => {
                tracing::info!(
                    error = %self,
                    service = service,
                    retryable = self.is_retryable(),
                    "tunectl info"
                );
            }
        }
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Startup cannot continue
    Critical,
    /// Standard errors
    Error,
    /// Warnings for expected remote failures
    Warning,
    /// Informational messages
    Info,
}

/// Result type alias for command surface operations
pub type CliResult<T> = Result<T, CliError>;

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CliError>() {
            Ok(cli_err) => return cli_err,
            Err(err) => err,
        };
        match err.downcast::<ConfigError>() {
            Ok(config_err) => Self::Config(config_err),
            Err(err) => Self::Internal(format!("{:#}", err)),
        }
    }
}
