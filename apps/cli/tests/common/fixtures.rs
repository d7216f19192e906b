//! Test fixtures for tunectl integration tests
//!
//! Provides tracks, devices and ready-made resolvers over the fakes.

use tunectl::{QueryEnhancer, Resolver, ResolverSettings};
use tunectl_spotify_client::{Device, PlaybackState, Track};

use super::fakes::{FakeCatalog, FakeGenerator};

/// A track with a predictable URI
pub fn track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        uri: format!("spotify:track:{}", id),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        duration_ms: 180_000,
        album: None,
    }
}

/// Five search results in relevance order
pub fn lofi_tracks() -> Vec<Track> {
    vec![
        track("lofi1", "Snowman", &["WYS"]),
        track("lofi2", "Coffee", &["beabadoobee", "Powfu"]),
        track("lofi3", "Affection", &["Jinsang"]),
        track("lofi4", "Sunday Morning", &["Kupla"]),
        track("lofi5", "Dreams", &["Nohidea", "Kudasai"]),
    ]
}

pub fn eye_of_the_tiger() -> Track {
    Track {
        duration_ms: 246_000,
        ..track("tiger", "Eye of the Tiger", &["Survivor"])
    }
}

pub fn device(id: &str, name: &str, device_type: &str, is_active: bool) -> Device {
    Device {
        id: Some(id.to_string()),
        name: name.to_string(),
        device_type: device_type.to_string(),
        is_active,
        volume_percent: Some(50),
    }
}

/// One inactive laptop, enough to count as ready
pub fn laptop() -> Device {
    device("laptop", "My Laptop", "Computer", false)
}

pub fn playing(track: Track, is_playing: bool, progress_ms: u64) -> PlaybackState {
    PlaybackState {
        is_playing,
        progress_ms,
        item: Some(track),
        device: Some(laptop()),
    }
}

/// Resolver over the fakes with default settings
pub fn resolver(catalog: &FakeCatalog, generator: &FakeGenerator) -> Resolver<FakeCatalog, FakeGenerator> {
    Resolver::new(
        catalog.clone(),
        QueryEnhancer::new(generator.clone()),
        ResolverSettings::default(),
    )
}
