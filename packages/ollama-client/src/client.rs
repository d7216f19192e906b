//! Ollama HTTP client with bounded retry and connection pooling

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use tunectl_shared_config::OllamaConfig;

use crate::error::{OllamaError, OllamaResult};
use crate::models::{GenerateOptions, GenerateRequest, GenerateResponse};

/// Maximum error body size to prevent memory exhaustion
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Default retry configuration
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Ollama API client with retry logic and connection pooling
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// HTTP client with connection pool
    http_client: Client,
    /// Configuration
    config: OllamaConfig,
    /// Total attempts per request (1 = no retry)
    retry_attempts: u32,
    /// Base delay for exponential backoff (milliseconds)
    retry_base_delay_ms: u64,
}

impl OllamaClient {
    /// Create a new Ollama client from configuration
    pub fn new(config: &OllamaConfig) -> OllamaResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(5)))
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(OllamaError::HttpError)?;

        Ok(Self::with_client(config, http_client))
    }

    /// Create a client with custom HTTP client (for testing)
    pub fn with_client(config: &OllamaConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: config.clone(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }

    /// Set retry configuration
    pub fn with_retry_config(mut self, attempts: u32, base_delay_ms: u64) -> Self {
        self.retry_attempts = attempts;
        self.retry_base_delay_ms = base_delay_ms;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Execute an async operation with retry logic
    async fn with_retry<T, F, Fut>(&self, operation: F) -> OllamaResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = OllamaResult<T>>,
    {
        // Zero or one attempt means run exactly once and surface the raw error
        if self.retry_attempts <= 1 {
            return operation().await;
        }

        let mut last_error = None;

        for attempt in 0..self.retry_attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt < self.retry_attempts - 1 => {
                    let delay = self.retry_base_delay_ms * 2_u64.pow(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.retry_attempts,
                        delay_ms = delay,
                        error = %e,
                        "Retrying after transient error"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    last_error = Some(e);
                }
                Err(e) => {
                    last_error = Some(e);
                    break;
                }
            }
        }

        Err(OllamaError::RetriesExhausted {
            attempts: self.retry_attempts,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
        })
    }

    /// Truncate error body to prevent memory exhaustion
    /// Safely handles UTF-8 boundaries to avoid panics on multi-byte characters
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }

    fn default_options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: Some(self.config.temperature),
            num_predict: Some(self.config.max_tokens),
            ..Default::default()
        }
    }

    /// Internal text generation (single request, no retry)
    async fn generate_internal(
        &self,
        prompt: &str,
        options: Option<GenerateOptions>,
    ) -> OllamaResult<String> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: Some(options.unwrap_or_else(|| self.default_options())),
        };

        let response = self
            .http_client
            .post(self.config.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    OllamaError::ConnectionRefused(self.config.url.clone())
                } else if e.is_timeout() {
                    OllamaError::Timeout(self.config.timeout_secs)
                } else {
                    OllamaError::HttpError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::truncate_error_body(response.text().await.unwrap_or_default());

            if body.contains("model") && body.contains("not found") {
                return Err(OllamaError::ModelNotFound(self.config.model.clone()));
            }

            return Err(OllamaError::ApiError(format!("Status {}: {}", status, body)));
        }

        let body = response.text().await?;
        let generate_response: GenerateResponse = serde_json::from_str(&body)?;
        Ok(generate_response.response)
    }

    /// Generate text from a prompt using the configured defaults
    pub async fn generate(&self, prompt: &str) -> OllamaResult<String> {
        self.generate_with_options(prompt, None).await
    }

    /// Generate text with custom options
    pub async fn generate_with_options(
        &self,
        prompt: &str,
        options: Option<GenerateOptions>,
    ) -> OllamaResult<String> {
        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            attempts = self.retry_attempts,
            "Generating text"
        );

        let result = self
            .with_retry(|| {
                let options = options.clone();
                async move { self.generate_internal(prompt, options).await }
            })
            .await?;

        debug!(response_len = result.len(), "Text generated");

        Ok(result)
    }
}
