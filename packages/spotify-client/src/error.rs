//! Spotify Web API error types

use thiserror::Error;

/// Spotify API client errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// No usable access token; the authorization flow has not been completed
    #[error("not authorized with Spotify; restart tunectl to sign in")]
    NotAuthorized,

    /// Token exchange or refresh was rejected
    #[error("Spotify authorization failed: {0}")]
    Auth(String),

    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse Spotify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Spotify API returned an error
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Playback command issued while no device is active
    #[error("No active device found. Open Spotify on one of your devices")]
    NoActiveDevice,

    /// Rate limited by Spotify
    #[error("Rate limited by Spotify API")]
    RateLimited,

    /// Request timeout
    #[error("Request to Spotify timed out")]
    Timeout,

    /// Token cache could not be written
    #[error("token cache error: {0}")]
    TokenCache(#[from] std::io::Error),
}

impl SpotifyError {
    /// Check if this error is retryable (transient failure)
    ///
    /// Retries on timeouts, rate limiting, transport errors and server
    /// errors (5xx). Client errors are returned immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            SpotifyError::Timeout | SpotifyError::RateLimited => true,
            SpotifyError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return true;
                }
                matches!(e.status(), Some(status) if status.is_server_error())
            }
            SpotifyError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the user has to (re)authorize before anything will work
    pub fn needs_authorization(&self) -> bool {
        matches!(
            self,
            SpotifyError::NotAuthorized | SpotifyError::Api { status: 401, .. }
        )
    }
}

/// Result type for Spotify operations
pub type SpotifyResult<T> = Result<T, SpotifyError>;
