//! Ollama API client for tunectl query enhancement
//!
//! This crate wraps the non-streaming `/api/generate` endpoint of a local
//! Ollama instance. tunectl treats the endpoint as optional: callers are
//! expected to degrade gracefully when it is absent.
//!
//! # Requirements
//!
//! - Ollama must be running and accessible at the configured URL
//! - The configured model must be pulled before use:
//!   ```bash
//!   ollama pull mistral
//!   ```
//!
//! # Example
//!
//! ```no_run
//! use tunectl_ollama_client::OllamaClient;
//! use tunectl_shared_config::OllamaConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OllamaConfig::default();
//! let client = OllamaClient::new(&config)?.with_retry_config(1, 0);
//!
//! let response = client.generate("Name one song by Queen.").await?;
//! println!("Response: {}", response);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::OllamaClient;
pub use error::{OllamaError, OllamaResult};
pub use models::{GenerateOptions, GenerateRequest, GenerateResponse};
