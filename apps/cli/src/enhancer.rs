//! Query enhancement
//!
//! Rewrites a free-text request ("workout music") into a canonical
//! `Title - Artist` search string using a local text-generation model.
//! Enhancement is best effort: any failure or malformed reply means the
//! user's text is searched unchanged.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use tunectl_ollama_client::OllamaClient;

use crate::error::{CliError, CliResult};

/// Separator between title and artist in a canonical query
pub const SEPARATOR: &str = " - ";

/// Text-generation capability used by the enhancer
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> CliResult<String>;
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> CliResult<String> {
        OllamaClient::generate(self, prompt)
            .await
            .map_err(CliError::from)
    }
}

/// Build the few-shot prompt for one request
pub fn build_prompt(user_text: &str) -> String {
    format!(
        "<system>You are a music search assistant. You MUST respond with ONLY a song \
         name and artist in the exact format 'Song Name - Artist'. No explanation, \
         no options, no additional text.</system>\n\
         \n\
         Convert this request into a single specific song:\n\
         Request: {user_text}\n\
         Format: Song Name - Artist\n\
         \n\
         Examples:\n\
         Request: something chill\n\
         Response: Weightless - Marconi Union\n\
         \n\
         Request: workout music\n\
         Response: Eye of the Tiger - Survivor\n\
         \n\
         Request: {user_text}\n\
         Response:"
    )
}

/// Accept a model reply only if it is exactly `Title - Artist`.
///
/// The reply is trimmed and must split on [`SEPARATOR`] into exactly two
/// non-blank parts. The accepted reply is returned as-is after trimming.
pub fn validate_reply(reply: &str) -> Option<String> {
    let reply = reply.trim();
    let parts: Vec<&str> = reply.split(SEPARATOR).collect();
    match parts.as_slice() {
        [title, artist] if !title.trim().is_empty() && !artist.trim().is_empty() => {
            Some(reply.to_string())
        }
        _ => None,
    }
}

/// Turns free text into a canonical query, or passes it through
pub struct QueryEnhancer<G> {
    generator: Option<G>,
}

impl<G: TextGenerator> QueryEnhancer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// An enhancer that never calls out and always passes text through
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Return the canonical query for `user_text`, or `user_text` unchanged.
    ///
    /// Never fails; problems are logged and degrade to passthrough.
    pub async fn enhance(&self, user_text: &str) -> String {
        let Some(generator) = &self.generator else {
            return user_text.to_string();
        };

        let reply = match generator.generate(&build_prompt(user_text)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Query enhancement unavailable, using original query");
                return user_text.to_string();
            }
        };

        match validate_reply(&reply) {
            Some(canonical) => {
                info!(original = %user_text, enhanced = %canonical, "Enhanced search query");
                canonical
            }
            None => {
                debug!(reply = %reply.trim(), "Rejected malformed enhancement reply");
                user_text.to_string()
            }
        }
    }
}
