//! Mock Ollama server for testing query enhancement
//!
//! Provides a [`MockOllamaServer`] that simulates the `/api/generate`
//! endpoint without a real Ollama instance.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock Ollama server for testing generation
///
/// # Example
///
/// ```rust,ignore
/// use tunectl_test_utils::MockOllamaServer;
///
/// #[tokio::test]
/// async fn test_enhancement() {
///     let server = MockOllamaServer::start().await;
///     server.mock_generate_success("Eye of the Tiger - Survivor").await;
///
///     let config = OllamaConfig::with_url(server.url());
///     // ... run your test
/// }
/// ```
pub struct MockOllamaServer {
    server: MockServer,
}

impl MockOllamaServer {
    /// Start a new mock Ollama server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a mock for successful text generation
    pub async fn mock_generate_success(&self, response_text: &str) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "mistral",
                "response": response_text,
                "done": true
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for text generation failure
    pub async fn mock_generate_failure(&self, status_code: u16, error_message: &str) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": error_message
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock for the model not being pulled
    pub async fn mock_model_not_found(&self, model: &str) {
        self.mock_generate_failure(
            404,
            &format!("model '{}' not found, try pulling it first", model),
        )
        .await;
    }

    /// Mount a generate mock that answers 200 with a non-JSON body
    pub async fn mock_generate_garbage(&self) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mount a mock that answers only after `delay_ms` (for client timeouts)
    pub async fn mock_timeout(&self, delay_ms: u64) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(delay_ms))
                    .set_body_json(json!({"response": "Too Late - Nobody", "done": true})),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of generate requests received so far
    pub async fn generate_calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/api/generate")
            .count()
    }

    /// Prompt text of the most recent generate request
    pub async fn last_prompt(&self) -> Option<String> {
        let requests = self.server.received_requests().await.unwrap_or_default();
        let last = requests
            .iter()
            .rev()
            .find(|r| r.url.path() == "/api/generate")?;
        let body: serde_json::Value = serde_json::from_slice(&last.body).ok()?;
        body["prompt"].as_str().map(str::to_string)
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ollama_server_starts() {
        let server = MockOllamaServer::start().await;
        assert!(server.url().starts_with("http://"));
        assert_eq!(server.generate_calls().await, 0);
    }

    #[tokio::test]
    async fn test_mock_generate_records_prompt() {
        let server = MockOllamaServer::start().await;
        server.mock_generate_success("Song - Artist").await;

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/api/generate", server.url()))
            .json(&serde_json::json!({"model": "mistral", "prompt": "find me a song", "stream": false}))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["response"], "Song - Artist");
        assert_eq!(server.generate_calls().await, 1);
        assert_eq!(server.last_prompt().await.as_deref(), Some("find me a song"));
    }

    #[tokio::test]
    async fn test_mock_generate_failure() {
        let server = MockOllamaServer::start().await;
        server.mock_generate_failure(500, "Internal error").await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/generate", server.url()))
            .json(&serde_json::json!({"model": "mistral", "prompt": "x"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 500);
    }
}
