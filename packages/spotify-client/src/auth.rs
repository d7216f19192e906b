//! OAuth authorization-code flow and token persistence

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tunectl_shared_config::SpotifyConfig;
use url::Url;

use crate::error::{SpotifyError, SpotifyResult};
use crate::models::TokenResponse;

/// Scopes needed for device listing, transport control and now-playing
pub const SCOPES: &[&str] = &[
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
];

/// Refresh this long before the server-side expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

/// An access token plus what is needed to renew it
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Token {
    /// A token that never expires within a test run
    pub fn long_lived(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::days(365),
            scope: None,
        }
    }

    /// Whether the token should be refreshed before use
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Build a token from an endpoint response. Refresh responses may omit
    /// the refresh token, in which case the previous one stays valid.
    pub(crate) fn from_response(
        response: TokenResponse,
        now: DateTime<Utc>,
        previous_refresh: Option<String>,
    ) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: now + Duration::seconds(response.expires_in),
            scope: response.scope,
        }
    }
}

/// Token persisted as JSON between runs
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached token. A missing or unreadable cache means "not signed in".
    pub fn load(&self) -> Option<Token> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No cached Spotify token");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt token cache");
                None
            }
        }
    }

    pub fn save(&self, token: &Token) -> SpotifyResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(token)?)?;
        debug!(path = %self.path.display(), "Saved Spotify token");
        Ok(())
    }
}

/// Build the page the user opens to grant access
pub fn authorize_url(config: &SpotifyConfig) -> SpotifyResult<String> {
    let scope = SCOPES.join(" ");
    let url = Url::parse_with_params(
        &config.authorize_url(),
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| SpotifyError::InvalidInput(format!("invalid accounts URL: {}", e)))?;
    Ok(url.into())
}

/// Pull the authorization code out of the address the browser was sent to.
///
/// Accepts either the full redirect URL or the bare code.
pub fn extract_auth_code(redirected: &str) -> SpotifyResult<String> {
    let redirected = redirected.trim();
    if redirected.is_empty() {
        return Err(SpotifyError::InvalidInput(
            "no redirect URL provided".to_string(),
        ));
    }

    let url = match Url::parse(redirected) {
        Ok(url) => url,
        Err(_) if !redirected.contains(char::is_whitespace) && !redirected.contains('/') => {
            return Ok(redirected.to_string());
        }
        Err(e) => {
            return Err(SpotifyError::InvalidInput(format!(
                "not a redirect URL: {}",
                e
            )))
        }
    };

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(SpotifyError::Auth(value.into_owned())),
            "code" => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.filter(|c| !c.is_empty()).ok_or_else(|| {
        SpotifyError::InvalidInput("redirect URL does not contain a code".to_string())
    })
}
