//! Endpoint registry: fingerprint-keyed hook lookup.
//!
//! The registry is populated once at startup from configuration and read
//! concurrently afterwards, so it is built behind `&mut self` and then
//! shared immutably (typically via `Arc`). Lookup is the only operation on
//! the request path.

use crate::endpoint::Endpoint;
use crate::fingerprint::Fingerprint;
use crate::secrets::{Secret, SecretError, SecretStore};
use std::collections::HashMap;
use tracing::info;

// ============================================================================
// RegisteredHook
// ============================================================================

/// A registered endpoint together with its resolved secret.
#[derive(Debug, Clone)]
pub struct RegisteredHook {
    endpoint: Endpoint,
    secret: Secret,
}

impl RegisteredHook {
    /// The configured endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The secret loaded for this endpoint at startup.
    pub fn secret(&self) -> &Secret {
        &self.secret
    }
}

// ============================================================================
// HookRegistry
// ============================================================================

/// Mapping from fingerprint to registered hook.
///
/// # Examples
///
/// ```rust,no_run
/// use hook_relay_core::{DirectorySecretStore, Endpoint, HookRegistry, SourceKind};
///
/// let store = DirectorySecretStore::new("keys");
/// let mut registry = HookRegistry::new();
/// let fp = registry
///     .register(Endpoint::new(SourceKind::GitLab, "gitlab_key"), &store)
///     .unwrap();
/// assert!(registry.resolve(fp.as_str()).is_some());
/// ```
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, RegisteredHook>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint, loading its secret and deriving its fingerprint.
    ///
    /// Registering the identical endpoint twice is idempotent: derivation is
    /// deterministic, so the second registration lands on the same key.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError`] when the endpoint's secret cannot be loaded.
    /// Callers treat this as fatal at startup: a configured hook without a
    /// credential must not be served.
    pub fn register(
        &mut self,
        endpoint: Endpoint,
        store: &dyn SecretStore,
    ) -> Result<Fingerprint, SecretError> {
        let secret = store.load(&endpoint.key_id)?;
        let fingerprint = Fingerprint::derive(endpoint.source, &secret);

        info!(
            source = endpoint.source.as_str(),
            key_id = %endpoint.key_id,
            "registered hook endpoint"
        );

        self.hooks
            .insert(fingerprint.as_str().to_string(), RegisteredHook {
                endpoint,
                secret,
            });
        Ok(fingerprint)
    }

    /// Look up a hook by the fingerprint taken from the request path.
    ///
    /// Returns `None` for unknown fingerprints; the caller maps that to a
    /// not-found response without provider-specific handling.
    pub fn resolve(&self, fingerprint: &str) -> Option<&RegisteredHook> {
        self.hooks.get(fingerprint)
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the registry has no hooks.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
