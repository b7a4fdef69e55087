//! Bitbucket Cloud push hook adapter.
//!
//! The Bitbucket Cloud webhook API carries no secret or signature, so the
//! hook URL's secrecy is the only barrier, as with DockerHub. The payload
//! names the pushed branch in short form already and does not include an
//! SSH clone URL, so the URL is reconstructed from the repository's
//! `full_name`.

use crate::sources::{HookRequest, SourceError};
use crate::update::Update;
use serde::Deserialize;

/// Header naming the event kind of the delivery.
pub const EVENT_HEADER: &str = "x-event-key";

const PUSH_EVENT: &str = "repo:push";

#[derive(Debug, Deserialize)]
struct PushPayload {
    push: Push,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct Push {
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    new: Option<NewRef>,
}

#[derive(Debug, Deserialize)]
struct NewRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
}

/// Extract a git update from a Bitbucket Cloud push.
///
/// # Errors
///
/// - [`SourceError::UnsupportedEvent`] when `X-Event-Key` is anything
///   other than `repo:push`. No secret was violated here, so this is a
///   client error rather than an authentication failure.
/// - [`SourceError::MalformedPayload`] when the body does not parse or the
///   push carries no new ref (e.g. a branch deletion).
pub(super) fn normalize(request: &HookRequest) -> Result<Update, SourceError> {
    match request.header(EVENT_HEADER) {
        Some(PUSH_EVENT) => {}
        other => {
            return Err(SourceError::UnsupportedEvent {
                event: other.unwrap_or_default().to_string(),
            });
        }
    }

    let payload: PushPayload = serde_json::from_slice(request.body())?;
    let branch = payload
        .push
        .changes
        .first()
        .and_then(|change| change.new.as_ref())
        .map(|new| new.name.as_str())
        .ok_or_else(|| SourceError::MalformedPayload {
            message: "push carries no new ref".to_string(),
        })?;

    let url = format!("git@bitbucket.org:{}.git", payload.repository.full_name);
    Ok(Update::git(url, branch))
}

#[cfg(test)]
#[path = "bitbucket_cloud_tests.rs"]
mod tests;
