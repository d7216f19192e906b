//! Shared test utilities for the tunectl workspace
//!
//! This crate provides wiremock-backed stand-ins for the two HTTP services
//! tunectl talks to, so client and pipeline tests run without network access.
//!
//! # Mock Services
//!
//! - [`MockOllamaServer`] - Mock Ollama generate endpoint for query enhancement
//! - [`MockSpotifyServer`] - Mock Spotify Web API and accounts token endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use tunectl_test_utils::{MockSpotifyServer, TrackFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let spotify = MockSpotifyServer::start().await;
//!     spotify.mock_search(&[TrackFixture::new("1", "Song", &["Artist"])]).await;
//!
//!     // Use spotify.url() to configure your client
//! }
//! ```

mod ollama;
mod spotify;

pub use ollama::MockOllamaServer;
pub use spotify::{DeviceFixture, MockSpotifyServer, TrackFixture};
