//! Search-to-playback resolution
//!
//! Turns loosely specified user text into one concrete track and a play
//! command. Two entry points share the same search and playback steps:
//!
//! - [`Resolver::search_and_play`] enhances the query, lists candidates and
//!   asks the user to pick one
//! - [`Resolver::play_best_match`] plays the top result of an already
//!   enhanced query without asking
//!
//! Every outcome is reported to the user and returned as a [`Resolution`];
//! collaborator errors never propagate out of the pipeline.

use tracing::{debug, instrument};
use tunectl_spotify_client::Track;

use crate::catalog::Catalog;
use crate::console::{Console, Prompt, PromptInput};
use crate::devices::has_ready_device;
use crate::enhancer::{QueryEnhancer, TextGenerator};

/// Number of candidates offered by interactive resolution
pub const DEFAULT_CANDIDATE_LIMIT: u32 = 5;

/// Selection prompt shown after the candidate list
pub const SELECTION_PROMPT: &str = "\nEnter number to play (or press Enter for #1): ";

/// How one resolution ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The play command was accepted
    Played(Track),
    /// The search succeeded but returned nothing
    NoTracks,
    /// The search itself failed
    SearchFailed(String),
    /// The user's choice did not name a candidate
    InvalidSelection(String),
    /// The user interrupted the selection prompt
    Cancelled,
    /// No playback device was available; play was not attempted
    DeviceNotReady(Track),
    /// The play command was rejected
    PlaybackFailed { track: Track, reason: String },
}

impl Resolution {
    /// Whether a play command was issued and accepted
    pub fn is_played(&self) -> bool {
        matches!(self, Self::Played(_))
    }
}

/// Settings fixed for the lifetime of a resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Candidates shown by interactive resolution
    pub candidate_limit: u32,
    /// Target device for playback; `None` uses the active device
    pub device_id: Option<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            device_id: None,
        }
    }
}

/// Map the user's answer to a zero-based candidate index.
///
/// Empty input picks the first candidate; `k` picks candidate `k` when it
/// is in `1..=count`. Anything else is not a selection.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return (count > 0).then_some(0);
    }

    match input.parse::<usize>() {
        Ok(k) if (1..=count).contains(&k) => Some(k - 1),
        _ => None,
    }
}

/// Resolves user requests against a catalog
pub struct Resolver<C, G> {
    catalog: C,
    enhancer: QueryEnhancer<G>,
    settings: ResolverSettings,
}

impl<C: Catalog, G: TextGenerator> Resolver<C, G> {
    pub fn new(catalog: C, enhancer: QueryEnhancer<G>, settings: ResolverSettings) -> Self {
        Self {
            catalog,
            enhancer,
            settings,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Enhance `query`, telling the user when the searched text differs
    pub async fn enhance_query(&self, query: &str, console: &mut Console) -> String {
        let enhanced = self.enhancer.enhance(query).await;
        if enhanced != query {
            console.line(format!("Enhanced search: '{}'", enhanced));
        }
        enhanced
    }

    /// Enhance, search, let the user choose, then play
    #[instrument(skip(self, prompt, console))]
    pub async fn search_and_play<P: Prompt + ?Sized>(
        &self,
        query: &str,
        prompt: &mut P,
        console: &mut Console,
    ) -> Resolution {
        let query = self.enhance_query(query, console).await;

        let mut tracks = match self.search(&query, self.settings.candidate_limit, console).await {
            Ok(tracks) => tracks,
            Err(resolution) => return resolution,
        };

        console.line(format!("Search results for '{}':", query));
        for (i, track) in tracks.iter().enumerate() {
            console.line(format!("  {}. {}", i + 1, describe(track)));
        }

        console.prompt(SELECTION_PROMPT);
        let input = match prompt.read_line().await {
            PromptInput::Line(input) => input,
            PromptInput::Interrupted | PromptInput::Closed => {
                console.line("\nCancelled");
                return Resolution::Cancelled;
            }
        };

        let Some(index) = parse_selection(&input, tracks.len()) else {
            debug!(input = %input, candidates = tracks.len(), "Invalid selection");
            console.line("Invalid selection");
            return Resolution::InvalidSelection(input);
        };

        let track = tracks.swap_remove(index);
        console.line(format!("Selected: {}", describe(&track)));
        self.play_track(track, console).await
    }

    /// Play the top result for an already enhanced query, without asking
    #[instrument(skip(self, console))]
    pub async fn play_best_match(&self, query: &str, console: &mut Console) -> Resolution {
        let tracks = match self.search(query, 1, console).await {
            Ok(tracks) => tracks,
            Err(resolution) => return resolution,
        };

        match tracks.into_iter().next() {
            Some(track) => {
                console.line(format!("Playing: {}", describe(&track)));
                self.play_track(track, console).await
            }
            None => Resolution::NoTracks,
        }
    }

    /// Check device readiness, then issue the play command for `track`
    #[instrument(skip(self, track, console), fields(uri = %track.uri))]
    pub async fn play_track(&self, track: Track, console: &mut Console) -> Resolution {
        if !has_ready_device(&self.catalog).await {
            console.line("No Spotify devices found! Please:");
            console.line("  1. Open Spotify on your computer or phone");
            console.line("  2. Run 'devices' to verify it is detected");
            console.line("  3. Try playing the track again");
            return Resolution::DeviceNotReady(track);
        }

        let uris = [track.uri.clone()];
        match self
            .catalog
            .start_playback(&uris, self.settings.device_id.as_deref())
            .await
        {
            Ok(()) => {
                console.line("Playing track...");
                Resolution::Played(track)
            }
            Err(e) => {
                e.log();
                console.line(format!("Error playing track: {}", e));
                Resolution::PlaybackFailed {
                    track,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Search and report empty or failed results, keeping relevance order
    async fn search(
        &self,
        query: &str,
        limit: u32,
        console: &mut Console,
    ) -> Result<Vec<Track>, Resolution> {
        match self.catalog.search_tracks(query, limit).await {
            Ok(tracks) if tracks.is_empty() => {
                console.line("No tracks found");
                Err(Resolution::NoTracks)
            }
            Ok(mut tracks) => {
                tracks.truncate(limit as usize);
                Ok(tracks)
            }
            Err(e) => {
                e.log();
                console.line(format!("Error searching: {}", e));
                Err(Resolution::SearchFailed(e.to_string()))
            }
        }
    }
}

/// `Title - Artist, Artist` as shown to the user
pub fn describe(track: &Track) -> String {
    format!("{} - {}", track.name, track.artist_line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 5, Some(0))]
    #[case("   ", 5, Some(0))]
    #[case("1", 5, Some(0))]
    #[case("3", 5, Some(2))]
    #[case(" 5 ", 5, Some(4))]
    #[case("6", 5, None)]
    #[case("0", 5, None)]
    #[case("-1", 5, None)]
    #[case("two", 5, None)]
    #[case("1.5", 5, None)]
    #[case("2", 1, None)]
    #[case("", 0, None)]
    fn test_parse_selection(
        #[case] input: &str,
        #[case] count: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(parse_selection(input, count), expected);
    }

    #[test]
    fn test_parse_selection_covers_every_candidate() {
        for count in 1..=5 {
            for k in 1..=count {
                assert_eq!(parse_selection(&k.to_string(), count), Some(k - 1));
            }
            assert_eq!(parse_selection(&(count + 1).to_string(), count), None);
        }
    }

    #[test]
    fn test_describe_joins_artists() {
        let track = Track {
            uri: "spotify:track:1".to_string(),
            name: "Under Pressure".to_string(),
            artists: vec!["Queen".to_string(), "David Bowie".to_string()],
            duration_ms: 248_000,
            album: None,
        };
        assert_eq!(describe(&track), "Under Pressure - Queen, David Bowie");
    }

    #[test]
    fn test_default_settings() {
        let settings = ResolverSettings::default();
        assert_eq!(settings.candidate_limit, 5);
        assert!(settings.device_id.is_none());
    }
}
