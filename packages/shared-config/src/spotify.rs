//! Spotify Web API configuration types

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

/// Redirect address registered with the Spotify developer dashboard by default
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Spotify application credentials and endpoints
#[derive(Clone)]
pub struct SpotifyConfig {
    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Redirect address used by the authorization-code flow
    pub redirect_uri: String,

    /// Web API base URL
    pub api_url: String,

    /// Accounts service base URL (authorize and token endpoints)
    pub accounts_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Where the OAuth token is persisted between runs
    pub token_cache_path: PathBuf,

    /// Target device for playback; `None` means the currently active device
    pub device_id: Option<String>,
}

impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("api_url", &self.api_url)
            .field("accounts_url", &self.accounts_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_cache_path", &self.token_cache_path)
            .field("device_id", &self.device_id)
            .finish()
    }
}

impl SpotifyConfig {
    /// Load Spotify configuration from environment variables
    ///
    /// Both `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` are required; when
    /// either is absent or blank the error names every missing variable.
    pub fn from_env() -> ConfigResult<Self> {
        let client_id = non_blank_env("SPOTIFY_CLIENT_ID");
        let client_secret = non_blank_env("SPOTIFY_CLIENT_SECRET");

        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            (id, secret) => {
                let mut missing = Vec::new();
                if id.is_none() {
                    missing.push("SPOTIFY_CLIENT_ID".to_string());
                }
                if secret.is_none() {
                    missing.push("SPOTIFY_CLIENT_SECRET".to_string());
                }
                return Err(ConfigError::MissingCredentials(missing));
            }
        };

        let redirect_uri = get_env_or_default("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI);
        url::Url::parse(&redirect_uri).map_err(|e| {
            ConfigError::InvalidUrl("SPOTIFY_REDIRECT_URI".to_string(), e.to_string())
        })?;

        let token_cache_path = env::var("SPOTIFY_TOKEN_CACHE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_cache_path());

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            api_url: get_env_or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            accounts_url: get_env_or_default("SPOTIFY_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL),
            timeout_secs: parse_env("SPOTIFY_TIMEOUT", 10)?,
            token_cache_path,
            device_id: non_blank_env("SPOTIFY_DEVICE_ID"),
        })
    }

    /// Create a configuration pointing both API and accounts endpoints at
    /// `base_url` (useful for testing against a mock server)
    pub fn with_base_url(base_url: impl Into<String>, token_cache_path: impl Into<PathBuf>) -> Self {
        let base_url = base_url.into();
        Self {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            api_url: format!("{}/v1", base_url.trim_end_matches('/')),
            accounts_url: base_url,
            timeout_secs: 5,
            token_cache_path: token_cache_path.into(),
            device_id: None,
        }
    }

    /// Get the full URL for an API path such as `/me/player`
    pub fn api_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Get the authorization page URL
    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.accounts_url.trim_end_matches('/'))
    }

    /// Get the token exchange URL
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_token_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunectl")
        .join("token.json")
}
