//! Spotify Web API response models

use serde::{Deserialize, Serialize};

/// A playable track returned by search or the player endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Spotify URI (e.g. `spotify:track:...`), passed back verbatim to play
    pub uri: String,
    /// Track title
    pub name: String,
    /// Artist names in credit order
    pub artists: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Album title, when known
    pub album: Option<String>,
}

impl Track {
    /// Artist names joined for display
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

/// A Spotify Connect device snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier; restricted devices may not expose one
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Device type tag (Computer, Smartphone, Speaker, ...)
    pub device_type: String,
    /// Whether this device is the current playback target
    pub is_active: bool,
    /// Current volume, if the device reports it
    pub volume_percent: Option<u8>,
}

/// What the user's player is doing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    /// Whether audio is playing (false when paused)
    pub is_playing: bool,
    /// Position in the current item, in milliseconds
    pub progress_ms: u64,
    /// The current track, if the item is a track
    pub item: Option<Track>,
    /// The device the state belongs to
    pub device: Option<Device>,
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: Paging<Option<RawTrack>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub album: Option<RawAlbum>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    pub name: String,
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        Self {
            uri: raw.uri,
            name: raw.name,
            artists: raw.artists.into_iter().map(|a| a.name).collect(),
            duration_ms: raw.duration_ms,
            album: raw.album.map(|a| a.name).filter(|name| !name.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<RawDevice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDevice {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub volume_percent: Option<u32>,
}

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        Self {
            id: raw.id.filter(|id| !id.is_empty()),
            name: raw.name,
            device_type: raw.device_type,
            is_active: raw.is_active,
            volume_percent: raw.volume_percent.map(|v| v.min(100) as u8),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<RawPlayingItem>,
    #[serde(default)]
    pub device: Option<RawDevice>,
}

/// The player reports episodes and tracks through the same field
#[derive(Debug, Deserialize)]
pub(crate) struct RawPlayingItem {
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(flatten)]
    pub track: RawTrack,
}

impl From<RawPlaybackState> for PlaybackState {
    fn from(raw: RawPlaybackState) -> Self {
        let item = raw
            .item
            .filter(|item| item.item_type.as_deref().map_or(true, |t| t == "track"))
            .map(|item| item.track.into());

        Self {
            is_playing: raw.is_playing,
            progress_ms: raw.progress_ms.unwrap_or(0),
            item,
            device: raw.device.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Token endpoint failures use the OAuth error shape instead
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}
