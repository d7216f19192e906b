//! In-memory fakes for the pipeline's capabilities
//!
//! Each fake records every call it receives so tests can assert on what
//! reached the remote service, not just on what was printed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tunectl::{CliError, CliResult, Catalog, Interrupt, Prompt, PromptInput, TextGenerator};
use tunectl_ollama_client::OllamaError;
use tunectl_spotify_client::{Device, PlaybackState, SpotifyError, Track};

/// Everything the fake catalog was asked to do
#[derive(Debug, Default, Clone)]
pub struct CatalogCalls {
    pub searches: Vec<(String, u32)>,
    pub plays: Vec<(Vec<String>, Option<String>)>,
    pub device_listings: usize,
    pub volumes: Vec<u8>,
    pub transport: Vec<&'static str>,
}

/// Scriptable catalog; clones share the recorded calls
#[derive(Clone, Default)]
pub struct FakeCatalog {
    tracks: Vec<Track>,
    devices: Vec<Device>,
    current: Option<PlaybackState>,
    search_delay: Option<Duration>,
    search_fails: bool,
    devices_fail: bool,
    play_fails: bool,
    transport_fails: bool,
    calls: Arc<Mutex<CatalogCalls>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search results, returned for every query
    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_current(mut self, state: PlaybackState) -> Self {
        self.current = Some(state);
        self
    }

    /// Searches take this long before answering
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }

    pub fn failing_devices(mut self) -> Self {
        self.devices_fail = true;
        self
    }

    pub fn failing_play(mut self) -> Self {
        self.play_fails = true;
        self
    }

    pub fn failing_transport(mut self) -> Self {
        self.transport_fails = true;
        self
    }

    pub fn calls(&self) -> CatalogCalls {
        self.calls.lock().unwrap().clone()
    }

    pub fn played_uris(&self) -> Vec<String> {
        self.calls()
            .plays
            .into_iter()
            .flat_map(|(uris, _)| uris)
            .collect()
    }

    fn transport(&self, name: &'static str) -> CliResult<()> {
        self.calls.lock().unwrap().transport.push(name);
        if self.transport_fails {
            return Err(SpotifyError::NoActiveDevice.into());
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_tracks(&self, query: &str, limit: u32) -> CliResult<Vec<Track>> {
        self.calls
            .lock()
            .unwrap()
            .searches
            .push((query.to_string(), limit));
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        if self.search_fails {
            return Err(SpotifyError::Timeout.into());
        }
        Ok(self.tracks.iter().take(limit as usize).cloned().collect())
    }

    async fn start_playback(&self, uris: &[String], device_id: Option<&str>) -> CliResult<()> {
        self.calls
            .lock()
            .unwrap()
            .plays
            .push((uris.to_vec(), device_id.map(str::to_string)));
        if self.play_fails {
            return Err(SpotifyError::Api {
                status: 403,
                message: "Player command failed: Premium required".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn list_devices(&self) -> CliResult<Vec<Device>> {
        self.calls.lock().unwrap().device_listings += 1;
        if self.devices_fail {
            return Err(SpotifyError::Timeout.into());
        }
        Ok(self.devices.clone())
    }

    async fn pause(&self) -> CliResult<()> {
        self.transport("pause")
    }

    async fn resume(&self) -> CliResult<()> {
        self.transport("resume")
    }

    async fn next_track(&self) -> CliResult<()> {
        self.transport("next")
    }

    async fn previous_track(&self) -> CliResult<()> {
        self.transport("previous")
    }

    async fn current_playback(&self) -> CliResult<Option<PlaybackState>> {
        self.transport("current")?;
        Ok(self.current.clone())
    }

    async fn set_volume(&self, percent: u8) -> CliResult<()> {
        self.calls.lock().unwrap().volumes.push(percent);
        self.transport("volume")
    }
}

/// Text generator with a fixed reply, or none to act like Ollama is down
#[derive(Clone, Default)]
pub struct FakeGenerator {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> CliResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(CliError::Ollama(OllamaError::ConnectionRefused(
                "http://localhost:11434".to_string(),
            ))),
        }
    }
}

/// Prompt that replays scripted input, then reports end of input
#[derive(Default)]
pub struct ScriptedPrompt {
    inputs: VecDeque<PromptInput>,
    reads: usize,
}

impl ScriptedPrompt {
    pub fn lines(lines: &[&str]) -> Self {
        Self::from_inputs(
            lines
                .iter()
                .map(|line| PromptInput::Line(line.to_string()))
                .collect(),
        )
    }

    pub fn from_inputs(inputs: Vec<PromptInput>) -> Self {
        Self {
            inputs: inputs.into(),
            reads: 0,
        }
    }

    /// Number of lines requested so far
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn read_line(&mut self) -> PromptInput {
        self.reads += 1;
        self.inputs.pop_front().unwrap_or(PromptInput::Closed)
    }
}

/// Interrupt source that fires never, at once, or after a delay
#[derive(Clone, Copy)]
pub enum FakeInterrupt {
    Never,
    Immediately,
    After(Duration),
}

#[async_trait]
impl Interrupt for FakeInterrupt {
    async fn interrupted(&self) {
        match self {
            FakeInterrupt::Never => std::future::pending::<()>().await,
            FakeInterrupt::Immediately => {}
            FakeInterrupt::After(delay) => tokio::time::sleep(*delay).await,
        }
    }
}
