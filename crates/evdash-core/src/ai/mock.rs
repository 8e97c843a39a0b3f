//! Mock backend for testing
//!
//! Returns deterministic responses without a network. Useful for unit
//! tests, server integration tests, and development without a Gemini
//! credential.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::InsightBackend;

const DEFAULT_REPLY: &str =
    "The data shows steady growth in EV registrations, led by a small number of makes.";

/// Mock generation backend
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check and generate should succeed
    pub healthy: bool,
    reply: String,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            healthy: true,
            reply: DEFAULT_REPLY.to_string(),
        }
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unhealthy mock backend; its calls fail as unreachable
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::default()
        }
    }

    /// Set the canned reply returned by `generate`
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }

    /// Create a new instance with a different model (no-op for mock)
    pub fn with_model(&self, _model: &str) -> Self {
        self.clone()
    }
}

#[async_trait]
impl InsightBackend for MockBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        if !self.healthy {
            return Err(Error::ServiceUnavailable("mock backend is down".into()));
        }
        Ok(self.reply.clone())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
