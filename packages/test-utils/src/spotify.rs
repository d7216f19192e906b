//! Mock Spotify Web API for pipeline and command tests
//!
//! Serves the accounts token endpoint at `/api/token` and the Web API under
//! `/v1`, matching the layout `SpotifyConfig::with_base_url` expects.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// A track fixture rendered the way the search endpoint returns it
#[derive(Debug, Clone)]
pub struct TrackFixture {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub duration_ms: u64,
}

impl TrackFixture {
    pub fn new(id: &str, name: &str, artists: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            duration_ms: 180_000,
        }
    }

    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "uri": self.uri(),
            "name": self.name,
            "type": "track",
            "duration_ms": self.duration_ms,
            "artists": self.artists.iter().map(|a| json!({"name": a})).collect::<Vec<_>>(),
            "album": {"name": format!("{} (Single)", self.name)}
        })
    }
}

/// A Spotify Connect device fixture
#[derive(Debug, Clone)]
pub struct DeviceFixture {
    pub id: String,
    pub name: String,
    pub device_type: String,
    pub is_active: bool,
}

impl DeviceFixture {
    pub fn new(id: &str, name: &str, device_type: &str, is_active: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            device_type: device_type.to_string(),
            is_active,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "type": self.device_type,
            "is_active": self.is_active,
            "is_restricted": false,
            "volume_percent": 60
        })
    }
}

/// Mock Spotify server
pub struct MockSpotifyServer {
    server: MockServer,
}

impl MockSpotifyServer {
    /// Start a new mock Spotify server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to `SpotifyConfig::with_base_url`
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount search results; every search returns these tracks in order
    pub async fn mock_search(&self, tracks: &[TrackFixture]) {
        let items: Vec<Value> = tracks.iter().map(TrackFixture::to_json).collect();
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tracks": {"items": items, "total": items.len()}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a failing search endpoint
    pub async fn mock_search_failure(&self, status_code: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": {"status": status_code, "message": message}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount the device list
    pub async fn mock_devices(&self, devices: &[DeviceFixture]) {
        let devices: Vec<Value> = devices.iter().map(DeviceFixture::to_json).collect();
        Mock::given(method("GET"))
            .and(path("/v1/me/player/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": devices })))
            .mount(&self.server)
            .await;
    }

    /// Accept every player command (play, pause, next, previous, volume)
    pub async fn mock_player_commands(&self) {
        for (verb, endpoint) in [
            ("PUT", "/v1/me/player/play"),
            ("PUT", "/v1/me/player/pause"),
            ("POST", "/v1/me/player/next"),
            ("POST", "/v1/me/player/previous"),
            ("PUT", "/v1/me/player/volume"),
        ] {
            Mock::given(method(verb))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(204))
                .mount(&self.server)
                .await;
        }
    }

    /// Make the play endpoint fail the way Spotify does with no active device
    pub async fn mock_play_no_active_device(&self) {
        Mock::given(method("PUT"))
            .and(path("/v1/me/player/play"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "status": 404,
                    "message": "Player command failed: No active device found",
                    "reason": "NO_ACTIVE_DEVICE"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount the now-playing endpoint; `None` answers 204 (nothing playing)
    pub async fn mock_current_playback(
        &self,
        track: Option<&TrackFixture>,
        is_playing: bool,
        progress_ms: u64,
    ) {
        let template = match track {
            Some(track) => ResponseTemplate::new(200).set_body_json(json!({
                "is_playing": is_playing,
                "progress_ms": progress_ms,
                "item": track.to_json(),
                "currently_playing_type": "track"
            })),
            None => ResponseTemplate::new(204),
        };
        Mock::given(method("GET"))
            .and(path("/v1/me/player"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Mount the token endpoint for both code exchange and refresh
    pub async fn mock_token(&self, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "scope": "user-read-playback-state user-modify-playback-state",
                "expires_in": 3600,
                "refresh_token": "mock-refresh-token"
            })))
            .mount(&self.server)
            .await;
    }

    async fn requests_to(&self, verb: &str, endpoint: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.to_string() == verb && r.url.path() == endpoint)
            .collect()
    }

    /// Bodies of every play request, in order
    pub async fn play_requests(&self) -> Vec<Value> {
        self.requests_to("PUT", "/v1/me/player/play")
            .await
            .into_iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Track URIs sent to the play endpoint, in order
    pub async fn played_uris(&self) -> Vec<String> {
        self.play_requests()
            .await
            .iter()
            .filter_map(|body| body["uris"].as_array().cloned())
            .flatten()
            .filter_map(|uri| uri.as_str().map(str::to_string))
            .collect()
    }

    /// Query strings of every search request, in order
    pub async fn search_queries(&self) -> Vec<String> {
        self.requests_to("GET", "/v1/search")
            .await
            .into_iter()
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "q")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    /// Volume percentages sent to the volume endpoint, in order
    pub async fn volume_requests(&self) -> Vec<String> {
        self.requests_to("PUT", "/v1/me/player/volume")
            .await
            .into_iter()
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "volume_percent")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    /// Number of requests to a player endpoint such as `/v1/me/player/pause`
    pub async fn calls_to(&self, verb: &str, endpoint: &str) -> usize {
        self.requests_to(verb, endpoint).await.len()
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }
}
