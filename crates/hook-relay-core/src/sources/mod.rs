//! Source adapters: per-provider authentication and payload normalization.
//!
//! Each supported provider has its own module implementing the same
//! contract: given the inbound request and the endpoint's secret, either
//! produce a canonical [`Update`] or fail with a classified
//! [`SourceError`]. Adapters are pure functions of their inputs, with no I/O and
//! no shared state, which keeps each provider independently testable.
//!
//! Where a provider supports request verification, it is evaluated against
//! the exact raw body bytes before the payload is trusted. A body that
//! carries a correct signature but fails to parse is a malformed payload,
//! not an authentication failure: the signature proves the body arrived
//! intact, not that it is well-formed.

pub mod bitbucket_cloud;
pub mod bitbucket_server;
pub mod dockerhub;
pub mod github;
pub mod gitlab;

mod signature;

use crate::endpoint::SourceKind;
use crate::secrets::Secret;
use crate::update::Update;
use bytes::Bytes;
use std::collections::HashMap;

// ============================================================================
// HookRequest
// ============================================================================

/// The provider-visible parts of an inbound hook request.
///
/// Header names are lowercased on construction so adapters can match them
/// case-insensitively; the body is kept as the exact raw bytes received,
/// because signatures are computed over those bytes.
#[derive(Debug, Clone)]
pub struct HookRequest {
    headers: HashMap<String, String>,
    body: Bytes,
}

impl HookRequest {
    /// Build a request from header pairs and the raw body.
    pub fn new(headers: impl IntoIterator<Item = (String, String)>, body: Bytes) -> Self {
        Self {
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body,
        }
    }

    /// Look up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// The raw body bytes as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

// ============================================================================
// SourceError
// ============================================================================

/// Classified adapter failure.
///
/// The three variants map to distinct HTTP outcomes at the dispatch layer:
/// authentication failures to 401, everything else to 400.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Signature or token did not match the endpoint's secret.
    #[error("request authentication failed")]
    AuthenticationFailed,

    /// The body is not the payload shape this provider sends.
    #[error("malformed payload: {message}")]
    MalformedPayload { message: String },

    /// A recognized provider sent an event kind the gateway does not handle.
    #[error("unsupported event type '{event}'")]
    UnsupportedEvent { event: String },
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::MalformedPayload {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Authenticate a request and extract its canonical update.
///
/// Dispatches to the adapter for `source`. DockerHub and Bitbucket Cloud
/// perform no verification of their own (those providers cannot sign their
/// hooks); for them, reaching the adapter at all already required knowing
/// the unguessable hook URL.
///
/// # Errors
///
/// Returns the adapter's [`SourceError`] classification unchanged.
pub fn normalize(
    source: SourceKind,
    request: &HookRequest,
    secret: &Secret,
) -> Result<Update, SourceError> {
    match source {
        SourceKind::DockerHub => dockerhub::normalize(request),
        SourceKind::GitHub => github::normalize(request, secret),
        SourceKind::GitLab => gitlab::normalize(request, secret),
        SourceKind::BitbucketCloud => bitbucket_cloud::normalize(request),
        SourceKind::BitbucketServer => bitbucket_server::normalize(request, secret),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
