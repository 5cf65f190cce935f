//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the pharmacy API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: 30_000,
        }
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, millis: u64) -> Self {
        self.timeout_ms = millis;
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}
