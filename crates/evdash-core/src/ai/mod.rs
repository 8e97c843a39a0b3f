//! Pluggable generation backend abstraction
//!
//! The insight proxy treats the text-generation service as an opaque
//! function from prompt to text. This module provides a backend-agnostic
//! interface for that call:
//!
//! - `InsightBackend` trait: the interface every backend implements
//! - `InsightClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//!
//! No backend retries internally; retry policy belongs to the caller.
//!
//! # Configuration
//!
//! Environment variables:
//! - `INSIGHT_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: Access credential for the Gemini API
//! - `GEMINI_MODEL`: Model name (default: gemini-2.0-flash-exp)
//! - `GEMINI_HOST`: API base URL override (for proxies and tests)

mod gemini;
mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Interface to a text-generation service
///
/// Backends are Send + Sync so a single client can be shared across async
/// tasks.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    /// Send a prompt, returning the generated text verbatim
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Whether the backend is reachable and able to serve requests
    async fn health_check(&self) -> bool;

    /// Model name (for logging)
    fn model(&self) -> &str;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete generation client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum InsightClient {
    /// Google Gemini (HTTP API)
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl InsightClient {
    /// Create a client from environment variables
    ///
    /// Checks `INSIGHT_BACKEND` to determine which backend to use:
    /// - `gemini` (default): uses GEMINI_API_KEY / GEMINI_MODEL / GEMINI_HOST
    /// - `mock`: canned responses for testing
    ///
    /// A Gemini client without a configured credential is still returned;
    /// its calls fail with `MissingCredential` so the condition is reported
    /// distinctly from transient errors.
    pub fn from_env() -> Self {
        let backend = std::env::var("INSIGHT_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "mock" => InsightClient::Mock(MockBackend::new()),
            "gemini" => InsightClient::Gemini(GeminiBackend::from_env()),
            _ => {
                tracing::warn!(backend = %backend, "Unknown INSIGHT_BACKEND, falling back to gemini");
                InsightClient::Gemini(GeminiBackend::from_env())
            }
        }
    }

    /// Create a Gemini backend directly
    pub fn gemini(host: &str, model: &str, api_key: Option<String>) -> Self {
        InsightClient::Gemini(GeminiBackend::new(host, model, api_key))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        InsightClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            InsightClient::Gemini(b) => InsightClient::Gemini(b.with_model(model)),
            InsightClient::Mock(b) => InsightClient::Mock(b.with_model(model)),
        }
    }
}

// Implement InsightBackend for InsightClient by delegating to the inner
// backend
#[async_trait]
impl InsightBackend for InsightClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            InsightClient::Gemini(b) => b.generate(prompt).await,
            InsightClient::Mock(b) => b.generate(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            InsightClient::Gemini(b) => b.health_check().await,
            InsightClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            InsightClient::Gemini(b) => b.model(),
            InsightClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            InsightClient::Gemini(b) => b.host(),
            InsightClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_mock() {
        let client = InsightClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = InsightClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_generates_text() {
        let client = InsightClient::mock();
        let text = client.generate("Analyze adoption trends").await.unwrap();
        assert!(!text.is_empty());
    }
}
