//! Fingerprint derivation for hook routing.
//!
//! Each registered endpoint is served at `POST /hook/{fingerprint}`. For
//! providers without native request verification (DockerHub, Bitbucket
//! Cloud) the fingerprint's unguessability is the only authentication
//! barrier, so derivation is a one-way function of the secret: knowing the
//! provider kind and any provider-visible data is not enough to reconstruct
//! it.

use crate::endpoint::SourceKind;
use crate::secrets::Secret;
use sha2::{Digest, Sha256};
use std::fmt;

/// Domain-separation prefix folded into every digest. Changing it changes
/// every fingerprint and therefore every hook URL.
const DERIVATION_CONTEXT: &[u8] = b"hook-relay:v1:";

// ============================================================================
// Fingerprint
// ============================================================================

/// Opaque routing token derived from an endpoint's provider kind and secret.
///
/// Derivation is deterministic: the same `(SourceKind, secret)` pair always
/// yields the same fingerprint, so restarting the gateway preserves hook
/// URLs. The fingerprint doubles as a bearer credential for providers that
/// cannot sign their requests; `Display` and `Debug` therefore show only a
/// short prefix, and callers must never log the full value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint for an endpoint.
    pub fn derive(source: SourceKind, secret: &Secret) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DERIVATION_CONTEXT);
        hasher.update(source.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(secret.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// The full token, as used in the hook URL path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    /// Renders a truncated prefix only; the full value is a credential.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…", &self.0[..8])
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fingerprint")
            .field(&format_args!("{}…", &self.0[..8]))
            .finish()
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
