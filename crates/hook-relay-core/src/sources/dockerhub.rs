//! DockerHub push hook adapter.
//!
//! DockerHub cannot sign its webhooks, so there is nothing to verify here;
//! a request only reaches this adapter by knowing the endpoint's
//! unguessable hook URL. The payload's `repository.repo_name` already
//! carries the `namespace/name` form and the registry domain is implied, so
//! the canonical update uses an empty domain.

use crate::sources::{HookRequest, SourceError};
use crate::update::Update;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PushPayload {
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct Repository {
    repo_name: String,
}

/// Extract an image update from a DockerHub push description.
///
/// # Errors
///
/// Returns [`SourceError::MalformedPayload`] when the body does not parse
/// as a push description.
pub(super) fn normalize(request: &HookRequest) -> Result<Update, SourceError> {
    let payload: PushPayload = serde_json::from_slice(request.body())?;
    Ok(Update::image(payload.repository.repo_name))
}

#[cfg(test)]
#[path = "dockerhub_tests.rs"]
mod tests;
