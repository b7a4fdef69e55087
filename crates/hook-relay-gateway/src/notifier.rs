//! Downstream notification client.
//!
//! The gateway's single outbound call: POST the canonical update document
//! to the downstream API's notify path and relay its status. Delivery is
//! fire-and-forget per request, with no retries and no buffering, so a transport
//! failure surfaces straight back to the dispatcher.

use async_trait::async_trait;
use hook_relay_core::Update;
use std::time::Duration;
use tracing::instrument;

/// Fixed notify path on the downstream base URL.
pub const NOTIFY_PATH: &str = "/v11/notify";

// ============================================================================
// NotifyError
// ============================================================================

/// Failure to deliver an update downstream.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The downstream could not be reached or the request did not complete.
    #[error("downstream request failed: {message}")]
    Transport { message: String },

    /// The notifier could not be constructed from configuration.
    #[error("notifier configuration is invalid: {message}")]
    Configuration { message: String },
}

// ============================================================================
// Notifier
// ============================================================================

/// Forwarding client for canonical updates.
///
/// Implementations return the downstream's HTTP status so the dispatcher
/// can relay it to the original caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one update downstream.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] when the request does not
    /// complete; a completed request with a non-2xx status is not an error
    /// here; the status is relayed as-is.
    async fn notify(&self, update: &Update) -> Result<u16, NotifyError>;
}

/// [`Notifier`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    notify_url: String,
}

impl HttpNotifier {
    /// Build a notifier for the given downstream base URL.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Configuration`] when the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Configuration {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            notify_url: format!("{}{}", base_url.trim_end_matches('/'), NOTIFY_PATH),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    #[instrument(skip(self, update), fields(kind = match update {
        Update::Image { .. } => "image",
        Update::Git { .. } => "git",
    }))]
    async fn notify(&self, update: &Update) -> Result<u16, NotifyError> {
        let response = self
            .client
            .post(&self.notify_url)
            .json(update)
            .send()
            .await
            .map_err(|e| NotifyError::Transport {
                message: e.to_string(),
            })?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
