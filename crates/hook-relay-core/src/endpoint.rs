//! Endpoint and provider-kind types.
//!
//! An [`Endpoint`] is one configured hook: the provider it expects traffic
//! from and the identifier of the secret used to authenticate (or, for
//! providers without native verification, to derive the routing
//! fingerprint).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SourceKind
// ============================================================================

/// Closed enumeration of the providers the gateway understands.
///
/// The serde spelling (`DockerHub`, `GitHub`, ...) is what appears in
/// configuration files; [`SourceKind::as_str`] yields the lowercase
/// identifier used in logs and fingerprint derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    DockerHub,
    GitHub,
    GitLab,
    BitbucketCloud,
    BitbucketServer,
}

impl SourceKind {
    /// Every supported provider, in a fixed order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::DockerHub,
        SourceKind::GitHub,
        SourceKind::GitLab,
        SourceKind::BitbucketCloud,
        SourceKind::BitbucketServer,
    ];

    /// Stable lowercase identifier for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::DockerHub => "dockerhub",
            SourceKind::GitHub => "github",
            SourceKind::GitLab => "gitlab",
            SourceKind::BitbucketCloud => "bitbucket-cloud",
            SourceKind::BitbucketServer => "bitbucket-server",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = UnknownSourceKind;

    /// Accepts both the configuration spelling (`GitHub`) and the lowercase
    /// identifier (`github`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::ALL
            .iter()
            .find(|kind| {
                s == kind.as_str() || s == format!("{kind:?}")
            })
            .copied()
            .ok_or_else(|| UnknownSourceKind {
                value: s.to_string(),
            })
    }
}

/// Error returned when a provider name cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("unknown hook source kind '{value}'")]
pub struct UnknownSourceKind {
    pub value: String,
}

// ============================================================================
// Endpoint
// ============================================================================

/// A configured hook: provider kind plus the identifier of its secret.
///
/// Endpoints are created from static configuration at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Provider this endpoint accepts traffic from.
    pub source: SourceKind,

    /// Identifier handed to the secret store to obtain the raw secret.
    pub key_id: String,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(source: SourceKind, key_id: impl Into<String>) -> Self {
        Self {
            source,
            key_id: key_id.into(),
        }
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
