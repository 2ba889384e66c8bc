// file: src/config/mod.rs
// version: 2.0.0
// guid: a1b2c3d4-e5f6-7a8b-9c0d-1e2f3a4b5c6d

//! Configuration module for the filter client
//!
//! Handles loading and validation of the Katello server connection settings.

pub mod loader;

use crate::error::FilterError;
use crate::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default server location when nothing is configured
pub const DEFAULT_SERVER_URL: &str = "https://localhost/katello";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Katello server connection settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Katello server connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server, including any path prefix such as `/katello`
    pub url: String,
    /// Username for HTTP basic authentication
    pub username: Option<String>,
    /// Password for HTTP basic authentication
    pub password: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Verify the server TLS certificate
    pub verify_tls: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            username: None,
            password: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()
    }
}

impl ServerConfig {
    /// Parse the configured base URL
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FilterError::config(format!(
                "Unsupported URL scheme '{}' in server url {}",
                other, self.url
            ))),
        }
    }

    /// Validate connection settings
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.timeout_seconds == 0 {
            return Err(FilterError::config("timeout_seconds must be greater than 0"));
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(FilterError::config(
                "A password was configured without a username",
            ));
        }

        Ok(())
    }
}
