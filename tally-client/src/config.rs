//! Client configuration

use crate::{ClientError, OrderClient};

/// Environment variable overriding the order-store base URL.
pub const API_URL_ENV: &str = "TALLY_API_URL";

/// Configuration for connecting to the order store.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store base URL (e.g. "http://localhost:8080/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Read the base URL from the environment, falling back to the
    /// local development endpoint.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| shared::DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an order client from this configuration.
    pub fn build_client(&self) -> Result<OrderClient, ClientError> {
        OrderClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(shared::DEFAULT_API_URL)
    }
}
