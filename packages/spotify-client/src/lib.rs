//! Spotify Web API client for tunectl
//!
//! This crate provides a client for the subset of the Spotify Web API a
//! terminal remote needs:
//! - Track search
//! - Spotify Connect device listing
//! - Transport control (play, pause, skip, volume) and now-playing state
//!
//! Authentication uses the OAuth authorization-code flow. The resulting
//! token is cached on disk and refreshed automatically.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunectl_shared_config::SpotifyConfig;
//! use tunectl_spotify_client::SpotifyClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new(&SpotifyConfig::from_env()?)?;
//!
//! if !client.is_authorized().await {
//!     println!("Open {}", client.authorize_url()?);
//!     // ...read the redirected URL from the user...
//!     client.authorize_with_redirect("http://127.0.0.1:8080/callback?code=...").await?;
//! }
//!
//! for track in client.search_tracks("Eye of the Tiger - Survivor", 5).await? {
//!     println!("{} - {}", track.name, track.artist_line());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`: application credentials (required)
//! - `SPOTIFY_REDIRECT_URI`: redirect registered for the application

mod auth;
mod client;
mod error;
mod models;

pub use auth::{authorize_url, extract_auth_code, Token, TokenCache, SCOPES};
pub use client::SpotifyClient;
pub use error::{SpotifyError, SpotifyResult};
pub use models::{Device, PlaybackState, Track};
