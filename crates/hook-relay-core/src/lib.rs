//! # Hook-Relay Core
//!
//! Core logic for the hook-relay webhook fan-in gateway.
//!
//! This crate contains everything below the HTTP surface: the canonical
//! update model forwarded downstream, the per-provider source adapters that
//! authenticate and normalize inbound hook payloads, secret loading, and the
//! fingerprint-keyed endpoint registry used for routing.
//!
//! ## Architecture
//!
//! The gateway serves one URL per registered hook, keyed by a
//! [`Fingerprint`] derived from the endpoint's provider kind and secret.
//! Each inbound request is resolved against the [`HookRegistry`], handed to
//! the matching source adapter in [`sources`], and, when the adapter
//! accepts it, forwarded downstream as an [`Update`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hook_relay_core::{DirectorySecretStore, Endpoint, HookRegistry, SourceKind};
//!
//! let store = DirectorySecretStore::new("/etc/hook-relay/keys");
//! let mut registry = HookRegistry::new();
//! let fingerprint = registry
//!     .register(Endpoint::new(SourceKind::GitHub, "github_key"), &store)
//!     .expect("secret must exist for a configured endpoint");
//! println!("hook URL path: /hook/{}", fingerprint.as_str());
//! ```

pub mod endpoint;
pub mod fingerprint;
pub mod registry;
pub mod secrets;
pub mod sources;
pub mod update;

pub use endpoint::{Endpoint, SourceKind};
pub use fingerprint::Fingerprint;
pub use registry::{HookRegistry, RegisteredHook};
pub use secrets::{DirectorySecretStore, Secret, SecretError, SecretStore};
pub use sources::{HookRequest, SourceError};
pub use update::{ImageName, Update};
