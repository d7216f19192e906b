//! Spotify Web API client implementation

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use tunectl_shared_config::SpotifyConfig;

use crate::auth::{self, Token, TokenCache};
use crate::error::{SpotifyError, SpotifyResult};
use crate::models::{
    Device, DevicesResponse, ErrorResponse, OAuthErrorResponse, PlaybackState, RawPlaybackState,
    SearchResponse, TokenResponse, Track,
};

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum number of search results the API accepts per request
const MAX_SEARCH_LIMIT: u32 = 50;

/// Maximum search query length
const MAX_QUERY_LENGTH: usize = 256;

/// Default number of retry attempts for transient failures
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds)
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Maximum error body size kept in error messages
const MAX_ERROR_BODY_SIZE: usize = 500;

/// Spotify Web API client
///
/// Cheap to clone; clones share the HTTP connection pool and the token.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    config: SpotifyConfig,
    token: Arc<Mutex<Option<Token>>>,
    cache: TokenCache,
    max_retries: u32,
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("config", &self.config)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl SpotifyClient {
    /// Create a new client, picking up a previously cached token if present
    pub fn new(config: &SpotifyConfig) -> SpotifyResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("tunectl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = TokenCache::new(&config.token_cache_path);
        let token = cache.load();

        Ok(Self {
            http_client,
            config: config.clone(),
            token: Arc::new(Mutex::new(token)),
            cache,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Replace the current token (useful for testing)
    pub fn with_token(self, token: Token) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token))),
            ..self
        }
    }

    /// Set how many times transient read failures are retried
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Whether a token (possibly expired but refreshable) is available
    pub async fn is_authorized(&self) -> bool {
        self.token.lock().await.is_some()
    }

    /// The page the user must open to grant access
    pub fn authorize_url(&self) -> SpotifyResult<String> {
        auth::authorize_url(&self.config)
    }

    /// Finish the authorization-code flow with the URL the browser landed on
    #[instrument(skip(self, redirected))]
    pub async fn authorize_with_redirect(&self, redirected: &str) -> SpotifyResult<()> {
        let code = auth::extract_auth_code(redirected)?;
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        let token = self.request_token(&form, None).await?;
        self.store_token(token).await;
        info!("Spotify authorization complete");
        Ok(())
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh: Option<String>,
    ) -> SpotifyResult<Token> {
        let response = self
            .http_client
            .post(self.config.token_url())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let reason = match serde_json::from_str::<OAuthErrorResponse>(&text) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("status {}", status),
            };
            return Err(SpotifyError::Auth(reason));
        }

        let response: TokenResponse = serde_json::from_str(&text)?;
        Ok(Token::from_response(response, Utc::now(), previous_refresh))
    }

    async fn store_token(&self, token: Token) {
        if let Err(e) = self.cache.save(&token) {
            warn!(path = %self.cache.path().display(), error = %e, "Could not persist Spotify token");
        }
        *self.token.lock().await = Some(token);
    }

    /// Return a usable access token, refreshing it first when close to expiry
    async fn access_token(&self) -> SpotifyResult<String> {
        let mut guard = self.token.lock().await;
        let current = guard.as_ref().ok_or(SpotifyError::NotAuthorized)?;

        if !current.is_expired(Utc::now()) {
            return Ok(current.access_token.clone());
        }

        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or(SpotifyError::NotAuthorized)?;

        debug!("Refreshing Spotify access token");
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];
        let token = self.request_token(&form, Some(refresh_token.clone())).await?;
        if let Err(e) = self.cache.save(&token) {
            warn!(path = %self.cache.path().display(), error = %e, "Could not persist refreshed token");
        }
        let access = token.access_token.clone();
        *guard = Some(token);
        Ok(access)
    }

    /// Execute an operation with retry logic for transient failures
    async fn with_retry<T, F, Fut>(&self, operation: F) -> SpotifyResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SpotifyResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay_ms = RETRY_BASE_DELAY_MS * 2u64.pow(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Spotify request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Send one request and return the body, or `None` for empty responses
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> SpotifyResult<Option<String>> {
        let access_token = self.access_token().await?;

        let is_read = method == Method::GET;
        let mut request = self
            .http_client
            .request(method, self.config.api_endpoint(path))
            .bearer_auth(access_token)
            .query(query);
        request = match body {
            Some(body) => request.json(body),
            // The player endpoints reject body-less PUT/POST without a length
            None if !is_read => request.header(reqwest::header::CONTENT_LENGTH, 0),
            None => request,
        };

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(path, "Spotify API rate limited");
            return Err(SpotifyError::RateLimited);
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(parse_api_error(status, &text));
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(text))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> SpotifyResult<Option<T>> {
        let text = self
            .with_retry(|| self.send(Method::GET, path, query, None))
            .await?;

        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn validate_query(query: &str) -> SpotifyResult<&str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SpotifyError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_QUERY_LENGTH {
            return Err(SpotifyError::InvalidInput(format!(
                "search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Search the catalog for tracks, in Spotify's relevance order
    #[instrument(skip(self))]
    pub async fn search_tracks(&self, query: &str, limit: u32) -> SpotifyResult<Vec<Track>> {
        let query = Self::validate_query(query)?;
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT).to_string();

        debug!(query = %query, limit = %limit, "Searching Spotify tracks");

        let response: Option<SearchResponse> = self
            .get_json(
                "/search",
                &[("q", query), ("type", "track"), ("limit", limit.as_str())],
            )
            .await?;

        let tracks: Vec<Track> = response
            .map(|r| r.tracks.items)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(Into::into)
            .collect();

        debug!(query = %query, result_count = tracks.len(), "Search complete");

        Ok(tracks)
    }

    /// List the user's available Spotify Connect devices
    #[instrument(skip(self))]
    pub async fn devices(&self) -> SpotifyResult<Vec<Device>> {
        let response: Option<DevicesResponse> = self.get_json("/me/player/devices", &[]).await?;
        let devices: Vec<Device> = response
            .map(|r| r.devices)
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(device_count = devices.len(), "Fetched devices");
        Ok(devices)
    }

    /// Start playing the given track URIs, optionally on a specific device
    #[instrument(skip(self))]
    pub async fn start_playback(
        &self,
        uris: &[String],
        device_id: Option<&str>,
    ) -> SpotifyResult<()> {
        if uris.is_empty() {
            return Err(SpotifyError::InvalidInput(
                "at least one track URI is required".to_string(),
            ));
        }

        let body = serde_json::json!({ "uris": uris });
        let query: Vec<(&str, &str)> = device_id.map(|id| ("device_id", id)).into_iter().collect();
        self.send(Method::PUT, "/me/player/play", &query, Some(&body))
            .await?;
        Ok(())
    }

    /// Resume whatever was playing
    #[instrument(skip(self))]
    pub async fn resume(&self) -> SpotifyResult<()> {
        self.send(Method::PUT, "/me/player/play", &[], None).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn pause(&self) -> SpotifyResult<()> {
        self.send(Method::PUT, "/me/player/pause", &[], None).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn next_track(&self) -> SpotifyResult<()> {
        self.send(Method::POST, "/me/player/next", &[], None).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn previous_track(&self) -> SpotifyResult<()> {
        self.send(Method::POST, "/me/player/previous", &[], None)
            .await?;
        Ok(())
    }

    /// Current playback state; `None` when nothing is playing anywhere
    #[instrument(skip(self))]
    pub async fn current_playback(&self) -> SpotifyResult<Option<PlaybackState>> {
        let raw: Option<RawPlaybackState> = self.get_json("/me/player", &[]).await?;
        Ok(raw.map(Into::into))
    }

    /// Set the volume of the active device
    #[instrument(skip(self))]
    pub async fn set_volume(&self, percent: u8) -> SpotifyResult<()> {
        if percent > 100 {
            return Err(SpotifyError::InvalidInput(format!(
                "volume must be between 0 and 100, got {}",
                percent
            )));
        }
        let percent = percent.to_string();
        self.send(
            Method::PUT,
            "/me/player/volume",
            &[("volume_percent", percent.as_str())],
            None,
        )
        .await?;
        Ok(())
    }
}

fn map_transport_error(e: reqwest::Error) -> SpotifyError {
    if e.is_timeout() {
        SpotifyError::Timeout
    } else {
        SpotifyError::Http(e)
    }
}

/// Turn a non-success response into the most specific error available
fn parse_api_error(status: StatusCode, text: &str) -> SpotifyError {
    if let Ok(ErrorResponse { error }) = serde_json::from_str::<ErrorResponse>(text) {
        let no_device = error.reason.as_deref() == Some("NO_ACTIVE_DEVICE")
            || error.message.contains("No active device");
        if no_device {
            return SpotifyError::NoActiveDevice;
        }
        return SpotifyError::Api {
            status: error.status,
            message: error.message,
        };
    }

    let mut message = text.trim().to_string();
    if message.len() > MAX_ERROR_BODY_SIZE {
        let cut = (0..=MAX_ERROR_BODY_SIZE)
            .rev()
            .find(|i| message.is_char_boundary(*i))
            .unwrap_or(0);
        message.truncate(cut);
    }
    if message.is_empty() {
        message = status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string();
    }

    SpotifyError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, dir: &tempfile::TempDir) -> SpotifyClient {
        let config = SpotifyConfig::with_base_url(server.uri(), dir.path().join("token.json"));
        SpotifyClient::new(&config)
            .unwrap()
            .with_token(Token::long_lived("test-token"))
            .with_max_retries(0)
    }

    fn track_json(id: &str, name: &str, artists: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "uri": format!("spotify:track:{}", id),
            "name": name,
            "artists": artists.iter().map(|a| serde_json::json!({"name": a})).collect::<Vec<_>>(),
            "duration_ms": 200000,
            "album": {"name": "Album"}
        })
    }

    #[test]
    fn test_validate_query() {
        assert_matches!(SpotifyClient::validate_query("   "), Err(SpotifyError::InvalidInput(_)));
        assert_matches!(SpotifyClient::validate_query(" lofi "), Ok("lofi"));
        let long = "a".repeat(MAX_QUERY_LENGTH + 1);
        assert_matches!(SpotifyClient::validate_query(&long), Err(SpotifyError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_query_counts_characters() {
        let multibyte = "東京の夜東京の夜東京の夜".repeat(8);
        assert!(multibyte.len() > MAX_QUERY_LENGTH);
        assert_matches!(SpotifyClient::validate_query(&multibyte), Ok(q) if q == multibyte);

        let too_long = "夜".repeat(MAX_QUERY_LENGTH + 1);
        assert_matches!(SpotifyClient::validate_query(&too_long), Err(SpotifyError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_api_error_no_active_device() {
        let body = r#"{"error":{"status":404,"message":"Player command failed: No active device found","reason":"NO_ACTIVE_DEVICE"}}"#;
        assert_matches!(
            parse_api_error(StatusCode::NOT_FOUND, body),
            SpotifyError::NoActiveDevice
        );
    }

    #[test]
    fn test_parse_api_error_plain_body() {
        assert_matches!(
            parse_api_error(StatusCode::BAD_GATEWAY, ""),
            SpotifyError::Api { status: 502, message } if message == "Bad Gateway"
        );
    }

    #[tokio::test]
    async fn test_unauthorized_client_fails_fast() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = SpotifyConfig::with_base_url(server.uri(), dir.path().join("token.json"));
        let client = SpotifyClient::new(&config).unwrap();

        assert!(!client.is_authorized().await);
        assert_matches!(client.devices().await, Err(SpotifyError::NotAuthorized));
    }

    #[tokio::test]
    async fn test_search_tracks_preserves_order() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("q", "chill lofi"))
            .and(query_param("type", "track"))
            .and(query_param("limit", "5"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": {"items": [
                    track_json("b", "Second Best", &["Z"]),
                    track_json("a", "Alpha", &["A", "B"])
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, &dir);
        let tracks = client.search_tracks("chill lofi", 5).await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Second Best");
        assert_eq!(tracks[1].artist_line(), "A, B");
    }

    #[tokio::test]
    async fn test_search_retries_server_errors() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": {"items": [track_json("a", "Alpha", &["A"])]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, &dir).with_max_retries(1);
        let tracks = client.search_tracks("alpha", 1).await.unwrap();
        assert_eq!(tracks.len(), 1);
    }

    #[tokio::test]
    async fn test_devices() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/v1/me/player/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "devices": [
                    {"id": "d1", "name": "Laptop", "type": "Computer", "is_active": false, "volume_percent": 50},
                    {"id": "d2", "name": "Phone", "type": "Smartphone", "is_active": true, "volume_percent": 80}
                ]
            })))
            .mount(&server)
            .await;

        let devices = test_client(&server, &dir).devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Laptop");
        assert!(devices[1].is_active);
    }

    #[tokio::test]
    async fn test_start_playback_sends_uris_and_device() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("PUT"))
            .and(path("/v1/me/player/play"))
            .and(query_param("device_id", "d1"))
            .and(body_json(serde_json::json!({"uris": ["spotify:track:a"]})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, &dir);
        client
            .start_playback(&["spotify:track:a".to_string()], Some("d1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_start_playback_without_device_reports_no_active_device() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("PUT"))
            .and(path("/v1/me/player/play"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"status": 404, "message": "Player command failed: No active device found", "reason": "NO_ACTIVE_DEVICE"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, &dir);
        let result = client
            .start_playback(&["spotify:track:a".to_string()], None)
            .await;
        assert_matches!(result, Err(SpotifyError::NoActiveDevice));
    }

    #[tokio::test]
    async fn test_current_playback_nothing_playing() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/v1/me/player"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let state = test_client(&server, &dir).current_playback().await.unwrap();
        assert!(state.is_none());
    }

    #[tokio::test]
    async fn test_set_volume() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("PUT"))
            .and(path("/v1/me/player/volume"))
            .and(query_param("volume_percent", "100"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, &dir);
        client.set_volume(100).await.unwrap();
        assert_matches!(client.set_volume(101).await, Err(SpotifyError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_transport_commands_are_not_retried() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/v1/me/player/next"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, &dir).with_max_retries(3);
        assert_matches!(client.next_track().await, Err(SpotifyError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_authorize_with_redirect_stores_token() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "refresh-me"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token_path = dir.path().join("token.json");
        let config = SpotifyConfig::with_base_url(server.uri(), &token_path);
        let client = SpotifyClient::new(&config).unwrap();

        client
            .authorize_with_redirect("http://127.0.0.1:8080/callback?code=the-code")
            .await
            .unwrap();

        assert!(client.is_authorized().await);
        let cached = TokenCache::new(&token_path).load().unwrap();
        assert_eq!(cached.access_token, "fresh");
        assert_eq!(cached.refresh_token.as_deref(), Some("refresh-me"));
    }

    #[tokio::test]
    async fn test_authorize_rejected_code() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Invalid authorization code"
            })))
            .mount(&server)
            .await;

        let config = SpotifyConfig::with_base_url(server.uri(), dir.path().join("token.json"));
        let client = SpotifyClient::new(&config).unwrap();

        let result = client.authorize_with_redirect("bad-code").await;
        assert_matches!(result, Err(SpotifyError::Auth(reason)) if reason == "Invalid authorization code");
        assert!(!client.is_authorized().await);
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_before_request() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=keep-me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "renewed",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1/me/player/pause"))
            .and(header("authorization", "Bearer renewed"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let expired = Token {
            access_token: "stale".to_string(),
            refresh_token: Some("keep-me".to_string()),
            expires_at: Utc::now() - chrono::Duration::minutes(5),
            scope: None,
        };
        let token_path = dir.path().join("token.json");
        let config = SpotifyConfig::with_base_url(server.uri(), &token_path);
        let client = SpotifyClient::new(&config).unwrap().with_token(expired);

        client.pause().await.unwrap();

        let cached = TokenCache::new(&token_path).load().unwrap();
        assert_eq!(cached.access_token, "renewed");
        assert_eq!(cached.refresh_token.as_deref(), Some("keep-me"));
    }
}
