//! Configuration types for the gateway.

use hook_relay_core::SourceKind;
use serde::{Deserialize, Serialize};

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Downstream notification API settings.
    #[serde(default)]
    pub downstream: DownstreamConfig,

    /// Secret store settings.
    #[serde(default)]
    pub secrets: SecretsConfig,

    /// Hook endpoints to register at startup.
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl GatewayConfig {
    /// Validate cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty downstream base URL,
    /// an empty secret directory, or an endpoint with an empty key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.downstream.base_url.is_empty() {
            return Err(ConfigError::Invalid {
                message: "downstream.base_url must be set".to_string(),
            });
        }
        if self.secrets.dir.is_empty() {
            return Err(ConfigError::Invalid {
                message: "secrets.dir must be set".to_string(),
            });
        }
        for endpoint in &self.endpoints {
            if endpoint.key.is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("endpoint for {} has an empty key", endpoint.source),
                });
            }
        }
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Graceful shutdown timeout in seconds.
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

/// Downstream notification API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Base URL of the downstream API; the notify path is appended.
    pub base_url: String,

    /// Per-request timeout in seconds for the outbound call.
    pub timeout_seconds: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: 10,
        }
    }
}

/// Secret store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Directory holding one key file per configured endpoint.
    pub dir: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            dir: "/etc/hook-relay/keys".to_string(),
        }
    }
}

/// One hook endpoint: provider kind plus the key file it authenticates
/// with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Provider this endpoint accepts traffic from.
    pub source: SourceKind,

    /// Key file name under the secret directory.
    pub key: String,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
