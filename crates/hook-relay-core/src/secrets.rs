//! Secret loading and in-memory secret handling.
//!
//! Secrets are loaded once at startup, one per configured endpoint, and held
//! for the lifetime of the process. A missing secret for a configured
//! endpoint is a startup-fatal error: the gateway must not serve a hook it
//! cannot authenticate.

use std::path::{Path, PathBuf};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Secret
// ============================================================================

/// Raw secret bytes for one endpoint.
///
/// The value is zeroized when dropped and never appears in `Debug` output
/// or logs. Comparison against a candidate value goes through
/// [`Secret::matches`], which is constant-time in the secret's contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the raw bytes, e.g. as an HMAC key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Constant-time comparison against a candidate value.
    ///
    /// A length mismatch fails without examining content; matching-length
    /// comparison does not short-circuit.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.0.ct_eq(candidate).into()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Secret").field(&"<REDACTED>").finish()
    }
}

// ============================================================================
// SecretError
// ============================================================================

/// Error returned when a secret cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// The key identifier is not a plain file name.
    #[error("secret key id '{key_id}' must be a bare file name")]
    InvalidKeyId { key_id: String },

    /// The secret file is absent or unreadable.
    #[error("secret '{key_id}' could not be read: {source}")]
    Unreadable {
        key_id: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// SecretStore
// ============================================================================

/// Source of raw secret bytes, keyed by identifier.
///
/// Consulted only during registry construction at startup; request handling
/// never touches the store.
pub trait SecretStore: Send + Sync {
    /// Load the secret for `key_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError`] when the identifier is malformed or the
    /// secret is absent.
    fn load(&self, key_id: &str) -> Result<Secret, SecretError>;
}

/// Secret store backed by a directory of key files.
///
/// The secret for key id `github_key` lives at `<root>/github_key` and is
/// read as raw bytes, with no trimming or decoding. Key ids must be bare file
/// names; path separators and `..` are rejected so configuration cannot
/// reach outside the key directory.
#[derive(Debug, Clone)]
pub struct DirectorySecretStore {
    root: PathBuf,
}

impl DirectorySecretStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl SecretStore for DirectorySecretStore {
    fn load(&self, key_id: &str) -> Result<Secret, SecretError> {
        if key_id.is_empty()
            || key_id == ".."
            || key_id.contains('/')
            || key_id.contains('\\')
        {
            return Err(SecretError::InvalidKeyId {
                key_id: key_id.to_string(),
            });
        }

        let bytes = std::fs::read(self.root.join(key_id)).map_err(|source| {
            SecretError::Unreadable {
                key_id: key_id.to_string(),
                source,
            }
        })?;

        Ok(Secret::new(bytes))
    }
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
