//! GitLab push hook adapter.
//!
//! GitLab's model is a static shared secret, not a signature: the
//! `X-Gitlab-Token` header must equal the endpoint's secret bytes exactly.
//! The comparison is constant-time.

use crate::secrets::Secret;
use crate::sources::{HookRequest, SourceError};
use crate::update::Update;
use serde::Deserialize;

/// Header carrying the shared secret token.
pub const TOKEN_HEADER: &str = "x-gitlab-token";

/// Header naming the event kind of the delivery.
pub const EVENT_HEADER: &str = "x-gitlab-event";

const PUSH_HOOK_EVENT: &str = "Push Hook";

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    project: Project,
}

#[derive(Debug, Deserialize)]
struct Project {
    git_ssh_url: String,
}

/// Authenticate a GitLab delivery and extract its git update.
///
/// # Errors
///
/// - [`SourceError::AuthenticationFailed`] when the token header is
///   missing or differs from the secret.
/// - [`SourceError::UnsupportedEvent`] for any event other than
///   `Push Hook`.
/// - [`SourceError::MalformedPayload`] when the body does not parse as a
///   push payload.
pub(super) fn normalize(request: &HookRequest, secret: &Secret) -> Result<Update, SourceError> {
    let token = request
        .header(TOKEN_HEADER)
        .ok_or(SourceError::AuthenticationFailed)?;
    if !secret.matches(token.as_bytes()) {
        return Err(SourceError::AuthenticationFailed);
    }

    match request.header(EVENT_HEADER) {
        Some(PUSH_HOOK_EVENT) => {}
        other => {
            return Err(SourceError::UnsupportedEvent {
                event: other.unwrap_or_default().to_string(),
            });
        }
    }

    let payload: PushPayload = serde_json::from_slice(request.body())?;
    Ok(Update::git(payload.project.git_ssh_url, &payload.git_ref))
}

#[cfg(test)]
#[path = "gitlab_tests.rs"]
mod tests;
