//! Ollama query-enhancement configuration

use crate::{get_env_or_default, parse_env, ConfigResult};

const DEFAULT_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "mistral";

/// Local Ollama endpoint used to rewrite free-text requests
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Ollama server URL
    pub url: String,

    /// LLM model for generation (e.g., mistral, llama3)
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens for generation
    pub max_tokens: u32,

    /// Temperature for generation (0.0 - 1.0)
    pub temperature: f32,

    /// When false the enhancer passes every query through untouched
    pub enabled: bool,
}

impl OllamaConfig {
    /// Load Ollama configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            url: get_env_or_default("OLLAMA_URL", DEFAULT_URL),
            model: get_env_or_default("OLLAMA_MODEL", DEFAULT_MODEL),
            timeout_secs: parse_env("OLLAMA_TIMEOUT", 10)?,
            max_tokens: parse_env("OLLAMA_MAX_TOKENS", 64)?,
            temperature: parse_env("OLLAMA_TEMPERATURE", 0.2)?,
            enabled: parse_env("OLLAMA_ENABLED", true)?,
        })
    }

    /// Create a configuration with a custom URL (useful for testing)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Get the full URL for the generation endpoint
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.url.trim_end_matches('/'))
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 10,
            max_tokens: 64,
            temperature: 0.2,
            enabled: true,
        }
    }
}
