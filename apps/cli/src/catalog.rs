//! Catalog and playback capability
//!
//! The resolution pipeline and transport commands talk to the music service
//! only through [`Catalog`], so tests can substitute an in-memory fake.
//! Production code uses [`SpotifyClient`].

use async_trait::async_trait;
use tunectl_spotify_client::{Device, PlaybackState, SpotifyClient, Track};

use crate::error::CliResult;

/// Search and transport operations against the remote music service
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search for tracks, in the service's relevance order
    async fn search_tracks(&self, query: &str, limit: u32) -> CliResult<Vec<Track>>;

    /// Start playing the given URIs; `None` targets the active device
    async fn start_playback(&self, uris: &[String], device_id: Option<&str>) -> CliResult<()>;

    /// Snapshot of the available playback devices
    async fn list_devices(&self) -> CliResult<Vec<Device>>;

    async fn pause(&self) -> CliResult<()>;

    async fn resume(&self) -> CliResult<()>;

    async fn next_track(&self) -> CliResult<()>;

    async fn previous_track(&self) -> CliResult<()>;

    /// What is playing right now, if anything
    async fn current_playback(&self) -> CliResult<Option<PlaybackState>>;

    async fn set_volume(&self, percent: u8) -> CliResult<()>;
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> CliResult<Vec<Track>> {
        Ok(SpotifyClient::search_tracks(self, query, limit).await?)
    }

    async fn start_playback(&self, uris: &[String], device_id: Option<&str>) -> CliResult<()> {
        Ok(SpotifyClient::start_playback(self, uris, device_id).await?)
    }

    async fn list_devices(&self) -> CliResult<Vec<Device>> {
        Ok(self.devices().await?)
    }

    async fn pause(&self) -> CliResult<()> {
        Ok(SpotifyClient::pause(self).await?)
    }

    async fn resume(&self) -> CliResult<()> {
        Ok(SpotifyClient::resume(self).await?)
    }

    async fn next_track(&self) -> CliResult<()> {
        Ok(SpotifyClient::next_track(self).await?)
    }

    async fn previous_track(&self) -> CliResult<()> {
        Ok(SpotifyClient::previous_track(self).await?)
    }

    async fn current_playback(&self) -> CliResult<Option<PlaybackState>> {
        Ok(SpotifyClient::current_playback(self).await?)
    }

    async fn set_volume(&self, percent: u8) -> CliResult<()> {
        Ok(SpotifyClient::set_volume(self, percent).await?)
    }
}
