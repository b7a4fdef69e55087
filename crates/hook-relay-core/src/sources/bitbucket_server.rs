//! Bitbucket Server (Data Center) refs-changed hook adapter.
//!
//! Bitbucket Server signs the raw body with the same `X-Hub-Signature`
//! HMAC-SHA512 scheme GitHub uses. The payload lists clone links per
//! protocol; the canonical update takes the `ssh` one.

use crate::secrets::Secret;
use crate::sources::signature::{verify_hub_signature, HUB_SIGNATURE_HEADER};
use crate::sources::{HookRequest, SourceError};
use crate::update::Update;
use serde::Deserialize;

/// Header naming the event kind of the delivery.
pub const EVENT_HEADER: &str = "x-event-key";

const REFS_CHANGED_EVENT: &str = "repo:refs_changed";

#[derive(Debug, Deserialize)]
struct RefsChangedPayload {
    repository: Repository,
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    links: Links,
}

#[derive(Debug, Deserialize)]
struct Links {
    clone: Vec<CloneLink>,
}

#[derive(Debug, Deserialize)]
struct CloneLink {
    name: String,
    href: String,
}

#[derive(Debug, Deserialize)]
struct Change {
    #[serde(rename = "ref")]
    changed_ref: ChangedRef,
}

#[derive(Debug, Deserialize)]
struct ChangedRef {
    id: String,
}

/// Authenticate a Bitbucket Server delivery and extract its git update.
///
/// The signature is verified against the raw bytes actually received, so a
/// mutated body whose signature was recomputed over the mutation still
/// authenticates and is then classified by what the parser finds. A body
/// mutated after signing fails authentication instead.
///
/// # Errors
///
/// - [`SourceError::AuthenticationFailed`] when `X-Hub-Signature` is
///   missing or does not match the raw body.
/// - [`SourceError::UnsupportedEvent`] for any event other than
///   `repo:refs_changed`.
/// - [`SourceError::MalformedPayload`] when the body does not parse, lists
///   no changes, or the repository has no SSH clone link.
pub(super) fn normalize(request: &HookRequest, secret: &Secret) -> Result<Update, SourceError> {
    verify_hub_signature(request.header(HUB_SIGNATURE_HEADER), request.body(), secret)?;

    match request.header(EVENT_HEADER) {
        Some(REFS_CHANGED_EVENT) => {}
        other => {
            return Err(SourceError::UnsupportedEvent {
                event: other.unwrap_or_default().to_string(),
            });
        }
    }

    let payload: RefsChangedPayload = serde_json::from_slice(request.body())?;

    let ssh_url = payload
        .repository
        .links
        .clone
        .iter()
        .find(|link| link.name == "ssh")
        .map(|link| link.href.clone())
        .ok_or_else(|| SourceError::MalformedPayload {
            message: "repository has no ssh clone link".to_string(),
        })?;
    let change = payload
        .changes
        .first()
        .ok_or_else(|| SourceError::MalformedPayload {
            message: "delivery lists no ref changes".to_string(),
        })?;

    Ok(Update::git(ssh_url, &change.changed_ref.id))
}

#[cfg(test)]
#[path = "bitbucket_server_tests.rs"]
mod tests;
